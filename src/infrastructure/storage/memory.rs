//! In-memory client store

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{Client, ClientRepository, StoreError, StoreResult};
use crate::support::{ClientSortField, Page, PageRequest, SortDirection};

/// In-memory storage for development and testing.
///
/// Listings are ordered by id, matching the database store's default order.
pub struct InMemoryClientRepository {
    clients: DashMap<i64, Client>,
    id_counter: AtomicI64,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
            id_counter: AtomicI64::new(1),
        }
    }

    fn sorted(&self) -> Vec<Client> {
        let mut all: Vec<Client> = self.clients.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|c| c.id);
        all
    }
}

impl Default for InMemoryClientRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &Client, b: &Client, field: ClientSortField) -> CmpOrdering {
    match field {
        ClientSortField::Id => a.id.cmp(&b.id),
        ClientSortField::Name => a.name.cmp(&b.name),
        ClientSortField::TaxId => a.tax_id.cmp(&b.tax_id),
        ClientSortField::Income => a.income.total_cmp(&b.income),
        ClientSortField::BirthDate => a.birth_date.cmp(&b.birth_date),
        ClientSortField::Children => a.children.cmp(&b.children),
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Client>> {
        Ok(self.clients.get(&id).map(|c| c.clone()))
    }

    async fn find_all(&self) -> StoreResult<Vec<Client>> {
        Ok(self.sorted())
    }

    async fn find_all_paged(&self, request: &PageRequest) -> StoreResult<Page<Client>> {
        let mut all = self.sorted();
        if let Some(sort) = request.sort {
            // stable sort keeps id order between equal keys
            all.sort_by(|a, b| {
                let ord = compare(a, b, sort.field);
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();
        Ok(Page::new(items, total, request))
    }

    async fn find_by_income(&self, income: f64) -> StoreResult<Vec<Client>> {
        Ok(self
            .sorted()
            .into_iter()
            .filter(|c| c.income == income)
            .collect())
    }

    async fn get_reference(&self, id: i64) -> StoreResult<Client> {
        self.clients
            .get(&id)
            .map(|c| c.clone())
            .ok_or(StoreError::EntityNotFound { entity: "Client", id })
    }

    async fn save(&self, mut client: Client) -> StoreResult<Client> {
        match client.id {
            Some(id) => {
                let Some(mut slot) = self.clients.get_mut(&id) else {
                    return Err(StoreError::EntityNotFound { entity: "Client", id });
                };
                *slot = client.clone();
            }
            None => {
                let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
                client.id = Some(id);
                self.clients.insert(id, client.clone());
            }
        }
        Ok(client)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.clients
            .remove(&id)
            .ok_or(StoreError::EmptyResult { entity: "Client", id })?;
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.clients.len() as u64)
    }
}

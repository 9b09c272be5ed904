//! Client business logic service

use std::sync::Arc;

use log::{debug, info};

use super::dto::ClientDto;
use crate::domain::{ClientRepository, DomainError, DomainResult, StoreError};
use crate::support::{Page, PageRequest};

const ENTITY: &str = "Client";

/// CRUD and queries over clients.
///
/// Every call goes straight to the store; nothing is cached between calls.
/// Store "record absent" signals become [`DomainError::ResourceNotFound`],
/// any other store failure is passed through as [`DomainError::Store`].
pub struct ClientService {
    repo: Arc<dyn ClientRepository>,
}

impl ClientService {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> DomainResult<Vec<ClientDto>> {
        debug!("Listing all clients");
        let clients = self.repo.find_all().await?;
        Ok(clients.into_iter().map(ClientDto::from).collect())
    }

    pub async fn find_all_paged(&self, request: PageRequest) -> DomainResult<Page<ClientDto>> {
        debug!(
            "Listing clients page={} size={} sort={:?}",
            request.page, request.size, request.sort
        );
        let page = self.repo.find_all_paged(&request).await?;
        Ok(page.map(ClientDto::from))
    }

    pub async fn find_by_income(&self, income: f64) -> DomainResult<Vec<ClientDto>> {
        debug!("Finding clients with income={}", income);
        let clients = self.repo.find_by_income(income).await?;
        Ok(clients.into_iter().map(ClientDto::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> DomainResult<ClientDto> {
        debug!("Finding client {}", id);
        self.repo
            .find_by_id(id)
            .await?
            .map(ClientDto::from)
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    /// Saves `dto` as a new client. A supplied id is ignored.
    pub async fn insert(&self, dto: ClientDto) -> DomainResult<ClientDto> {
        let saved = self.repo.save(dto.into_entity()).await?;
        info!("Client created: {} ({:?})", saved.name, saved.id);
        Ok(saved.into())
    }

    /// Overwrites name, tax id, income, birth date and children of client `id`.
    pub async fn update(&self, id: i64, dto: ClientDto) -> DomainResult<ClientDto> {
        let reference_miss = |e: StoreError| match e {
            StoreError::EntityNotFound { .. } => DomainError::not_found(ENTITY, id),
            other => other.into(),
        };

        let mut entity = self.repo.get_reference(id).await.map_err(reference_miss)?;
        dto.copy_onto(&mut entity);
        let saved = self.repo.save(entity).await.map_err(reference_miss)?;
        info!("Client {} updated", id);
        Ok(saved.into())
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repo.delete_by_id(id).await.map_err(|e| match e {
            StoreError::EmptyResult { .. } => DomainError::not_found(ENTITY, id),
            other => other.into(),
        })?;
        info!("Client {} deleted", id);
        Ok(())
    }
}

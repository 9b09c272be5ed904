//! SeaORM implementation of ClientRepository

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{Client, ClientRepository, StoreError, StoreResult};
use crate::infrastructure::database::entities::client;
use crate::support::{ClientSortField, Page, PageRequest, SortDirection};

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: client::Model) -> Client {
    Client {
        id: Some(m.id),
        name: m.name,
        tax_id: m.tax_id,
        income: m.income,
        birth_date: m.birth_date,
        children: m.children,
    }
}

fn domain_to_active(c: Client) -> client::ActiveModel {
    client::ActiveModel {
        id: c.id.map(Set).unwrap_or(NotSet),
        name: Set(c.name),
        tax_id: Set(c.tax_id),
        income: Set(c.income),
        birth_date: Set(c.birth_date),
        children: Set(c.children),
    }
}

fn sort_column(field: ClientSortField) -> client::Column {
    match field {
        ClientSortField::Id => client::Column::Id,
        ClientSortField::Name => client::Column::Name,
        ClientSortField::TaxId => client::Column::TaxId,
        ClientSortField::Income => client::Column::Income,
        ClientSortField::BirthDate => client::Column::BirthDate,
        ClientSortField::Children => client::Column::Children,
    }
}

fn sort_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

// ── SeaOrmClientRepository ──────────────────────────────────────

pub struct SeaOrmClientRepository {
    db: DatabaseConnection,
}

impl SeaOrmClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Client>> {
        let model = client::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> StoreResult<Vec<Client>> {
        let models = client::Entity::find()
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_all_paged(&self, request: &PageRequest) -> StoreResult<Page<Client>> {
        let mut query = client::Entity::find();
        if let Some(sort) = request.sort {
            query = query.order_by(sort_column(sort.field), sort_order(sort.direction));
        }
        // id breaks ties so pages never overlap
        query = query.order_by_asc(client::Column::Id);

        let total = query.clone().count(&self.db).await?;
        let models = query
            .offset(request.offset())
            .limit(request.size)
            .all(&self.db)
            .await?;

        debug!(
            "Loaded client page {} ({} of {} rows)",
            request.page,
            models.len(),
            total
        );
        let items = models.into_iter().map(entity_to_domain).collect();
        Ok(Page::new(items, total, request))
    }

    async fn find_by_income(&self, income: f64) -> StoreResult<Vec<Client>> {
        let models = client::Entity::find()
            .filter(client::Column::Income.eq(income))
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn get_reference(&self, id: i64) -> StoreResult<Client> {
        client::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(entity_to_domain)
            .ok_or(StoreError::EntityNotFound { entity: "Client", id })
    }

    async fn save(&self, c: Client) -> StoreResult<Client> {
        let model = match c.id {
            Some(id) => domain_to_active(c)
                .update(&self.db)
                .await
                .map_err(|e| match e {
                    DbErr::RecordNotUpdated => StoreError::EntityNotFound { entity: "Client", id },
                    other => other.into(),
                })?,
            None => {
                let inserted = domain_to_active(c).insert(&self.db).await?;
                info!("Client saved: {} ({})", inserted.name, inserted.id);
                inserted
            }
        };
        Ok(entity_to_domain(model))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let result = client::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::EmptyResult { entity: "Client", id });
        }
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(client::Entity::find().count(&self.db).await?)
    }
}

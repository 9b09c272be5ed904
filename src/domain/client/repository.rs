//! Client store interface

use async_trait::async_trait;

use super::model::Client;
use crate::support::{Page, PageRequest, StoreResult};

/// Persistence abstraction for clients.
///
/// Implementations must make each single-record read, save and delete atomic.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Client>>;

    async fn find_all(&self) -> StoreResult<Vec<Client>>;

    async fn find_all_paged(&self, request: &PageRequest) -> StoreResult<Page<Client>>;

    /// Clients whose income equals `income` exactly.
    async fn find_by_income(&self, income: f64) -> StoreResult<Vec<Client>>;

    /// Reference to an existing client, to be modified and saved.
    ///
    /// Fails with `StoreError::EntityNotFound` when `id` does not exist.
    async fn get_reference(&self, id: i64) -> StoreResult<Client>;

    /// Inserts when `client.id` is `None`, otherwise overwrites that record.
    async fn save(&self, client: Client) -> StoreResult<Client>;

    /// Fails with `StoreError::EmptyResult` when no record matched.
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<u64>;
}

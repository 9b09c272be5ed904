//! Domain layer: entities and the store interfaces they are persisted through.

pub mod client;

pub use client::{Client, ClientRepository};
pub use crate::support::errors::{DomainError, DomainResult, StoreError, StoreResult};

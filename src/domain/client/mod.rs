//! Client aggregate
//!
//! Contains the Client entity and the store interface the service depends on.

pub mod model;
pub mod repository;

pub use model::Client;
pub use repository::ClientRepository;

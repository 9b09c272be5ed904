//! Client use cases: CRUD, income lookup and paging over the client store.

pub mod dto;
pub mod seed;
pub mod service;

pub use dto::ClientDto;
pub use seed::seed_sample_clients;
pub use service::ClientService;

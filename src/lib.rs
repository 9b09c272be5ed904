//! # Client Registry
//!
//! REST service for registering clients and querying them by id, income
//! or page.
//!
//! ## Architecture
//!
//! - **domain**: The `Client` entity and the `ClientRepository` port
//! - **application**: `ClientService` use cases and the `ClientDto` transfer object
//! - **infrastructure**: SeaORM/SQLite and in-memory client stores
//! - **interfaces**: REST API with Swagger documentation
//! - **support**: Errors, pagination and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

pub use application::{ClientDto, ClientService};
pub use domain::{Client, ClientRepository, DomainError, DomainResult};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryClientRepository};

// Re-export API router
pub use interfaces::http::create_api_router;

pub use support::{Page, PageRequest};

//! Application layer: use cases orchestrating the domain stores.

pub mod client;

pub use client::{seed_sample_clients, ClientDto, ClientService};

//! HTTP modules: one sub-module per resource plus cross-cutting middleware

pub mod clients;
pub mod health;
pub mod metrics;
pub mod request_id;

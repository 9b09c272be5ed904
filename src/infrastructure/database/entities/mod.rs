//! Database entities module

pub mod client;

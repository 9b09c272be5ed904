//! Client REST endpoints

pub mod dto;
pub mod handlers;

pub use handlers::*;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::application::ClientService;
use crate::config::PaginationConfig;

/// State shared by the client handlers
#[derive(Clone)]
pub struct ClientState {
    pub service: Arc<ClientService>,
    pub pagination: PaginationConfig,
}

/// Routes mounted under `/api/v1/clients`
pub fn routes(state: ClientState) -> Router {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/all", get(list_all_clients))
        .route("/income", get(find_clients_by_income))
        .route(
            "/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .with_state(state)
}

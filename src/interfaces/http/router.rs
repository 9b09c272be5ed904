//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PaginatedResponse};
use super::modules::clients::{self, dto::ClientRequest, ClientState};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use crate::application::{ClientDto, ClientService};
use crate::config::{AppConfig, StorageBackend};
use crate::domain::ClientRepository;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        clients::list_clients,
        clients::list_all_clients,
        clients::find_clients_by_income,
        clients::get_client,
        clients::create_client,
        clients::update_client,
        clients::delete_client,
    ),
    components(schemas(
        ClientDto,
        ClientRequest,
        ApiResponse<ClientDto>,
        PaginatedResponse<ClientDto>,
        HealthResponse,
        ComponentHealth,
    )),
    tags(
        (name = "Clients", description = "Client registration and lookup"),
        (name = "Health", description = "Service liveness"),
    ),
    info(
        title = "Client Registry API",
        version = "1.0.0",
        description = "REST API for registering and querying clients",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    service: Arc<ClientService>,
    repo: Arc<dyn ClientRepository>,
    config: &AppConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let client_state = ClientState {
        service,
        pagination: config.pagination.clone(),
    };

    let health_state = HealthState {
        repo,
        backend: match config.database.backend {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        },
        started_at: Arc::new(Instant::now()),
    };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: prometheus_handle,
        });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/clients", clients::routes(client_state))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

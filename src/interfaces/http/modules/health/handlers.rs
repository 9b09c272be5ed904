//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ClientRepository;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub repo: Arc<dyn ClientRepository>,
    /// `sqlite` or `memory`
    pub backend: &'static str,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub store: ComponentHealth,
    /// Number of stored clients, when the store answered
    pub clients: Option<u64>,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub backend: String,
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Client store is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    // A count round-trips through the store
    let store_start = Instant::now();
    let (store, clients) = match state.repo.count().await {
        Ok(count) => (
            ComponentHealth {
                backend: state.backend.to_string(),
                status: "ok".to_string(),
                latency_ms: Some(store_start.elapsed().as_millis() as u64),
            },
            Some(count),
        ),
        Err(e) => {
            tracing::warn!("Health check store probe failed: {}", e);
            (
                ComponentHealth {
                    backend: state.backend.to_string(),
                    status: "error".to_string(),
                    latency_ms: None,
                },
                None,
            )
        }
    };

    let healthy = clients.is_some();
    let http_status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            store,
            clients,
        }),
    )
}

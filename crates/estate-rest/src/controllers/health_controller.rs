//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use estate_core::HealthStatus;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Outcome of one dependency check.
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub name: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    fn new(name: &str, status: HealthStatus) -> Self {
        let (status, message) = match status {
            HealthStatus::Healthy => ("healthy", None),
            HealthStatus::Degraded(msg) => ("degraded", Some(msg)),
            HealthStatus::Unhealthy(msg) => ("unhealthy", Some(msg)),
        };
        Self {
            name: name.to_string(),
            status,
            message,
        }
    }
}

/// Readiness response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub cache_backend: &'static str,
    pub components: Vec<ComponentStatus>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Checks every registered dependency.
///
/// Returns 503 if any of them is unhealthy. A degraded cache still counts as
/// ready because reads fall back to the store.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut components = Vec::with_capacity(state.health_checks.len());
    for check in &state.health_checks {
        components.push(ComponentStatus::new(check.name(), check.check().await));
    }

    let ready = components.iter().all(|c| c.status != "unhealthy");
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready,
            cache_backend: state.cache_backend,
            components,
        }),
    )
}

pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

//! Health check endpoint for container orchestration.
//!
//! Reports the readiness flag. Used by Kubernetes, ECS, systemd, and load
//! balancers to decide whether to send traffic here. Never touches the dice log.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Health check handler.
///
/// Returns 200 while the service is ready and 500 once it has started draining.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.readiness.is_ready() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                message: "Service is ready",
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse {
                status: "unhealthy",
                message: "Service is not ready",
            }),
        )
    }
}

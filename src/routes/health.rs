use crate::routes::types::HealthCheckResponse;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use super::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.to_string(),
        uptime_seconds: now.signed_duration_since(state.started_at).num_seconds(),
        timestamp: now,
    })
}

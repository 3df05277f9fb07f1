use crate::config::CorsConfig;
use crate::cors::build_cors_layer;
use crate::error::{AppError, AppResult};
use crate::middleware::request_id_middleware;
use axum::http::Uri;
use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::health;
use super::AppState;

/// Create application router
///
/// The CORS layer wraps the routes and the fallback, so the policy applies to
/// every path whether or not a handler exists for it.
pub fn create_router(state: Arc<AppState>, cors_config: &CorsConfig) -> AppResult<axum::Router> {
    let cors = build_cors_layer(cors_config)?;

    let router = axum::Router::new()
        .route("/_health", get(health::health_check))
        .fallback(not_found)
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

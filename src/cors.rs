//! Cross-origin resource sharing policy.
//!
//! The policy is built once from [`CorsConfig`] and layered over the whole
//! router, so it covers every path (`/**`), including paths that fall through
//! to the not-found fallback. `OPTIONS` requests are treated as preflight and
//! answered by the layer itself with `200 OK`; they never reach a handler.
//!
//! `Access-Control-Allow-Origin` is only emitted when the request's `Origin`
//! is byte-for-byte equal to a configured origin. Any other origin gets no
//! allow header and the browser enforces the same-origin policy.

use crate::config::CorsConfig;
use crate::error::{AppError, AppResult};
use http::{HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::info;

/// Path pattern the policy is registered for.
pub const ALL_PATHS: &str = "/**";

/// Build the CORS middleware for the given configuration.
///
/// # Errors
///
/// Returns `AppError::Configuration` if any configured origin, method or
/// header cannot be represented on the wire.
pub fn build_cors_layer(config: &CorsConfig) -> AppResult<CorsLayer> {
    config.validate().map_err(AppError::Configuration)?;

    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| {
                    AppError::Configuration(format!("Invalid origin '{}': {}", origin, e))
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    let allow_methods = if config.allows_any_method() {
        AllowMethods::mirror_request()
    } else {
        let methods = config
            .allowed_methods
            .iter()
            .map(|method| {
                Method::from_bytes(method.as_bytes()).map_err(|e| {
                    AppError::Configuration(format!("Invalid method '{}': {}", method, e))
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        AllowMethods::list(methods)
    };

    let allow_headers = if config.allows_any_header() {
        AllowHeaders::mirror_request()
    } else {
        let headers = config
            .allowed_headers
            .iter()
            .map(|header| {
                HeaderName::from_bytes(header.as_bytes()).map_err(|e| {
                    AppError::Configuration(format!("Invalid header '{}': {}", header, e))
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        AllowHeaders::list(headers)
    };

    info!(
        path = ALL_PATHS,
        origins = ?config.allowed_origins,
        methods = ?config.allowed_methods,
        headers = ?config.allowed_headers,
        max_age_seconds = config.max_age_seconds,
        "CORS policy configured"
    );

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(allow_methods)
        .allow_headers(allow_headers)
        .max_age(Duration::from_secs(config.max_age_seconds)))
}

/// Serializable view of the effective policy
#[derive(Debug, Clone, Serialize)]
pub struct PolicySummary {
    pub path_pattern: String,
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age_seconds: u64,
}

impl From<&CorsConfig> for PolicySummary {
    fn from(config: &CorsConfig) -> Self {
        Self {
            path_pattern: ALL_PATHS.to_string(),
            allowed_origins: config.allowed_origins.clone(),
            allowed_methods: config.allowed_methods.clone(),
            allowed_headers: config.allowed_headers.clone(),
            max_age_seconds: config.max_age_seconds,
        }
    }
}

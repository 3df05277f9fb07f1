use chrono::{DateTime, Utc};

/// Application state shared across all HTTP handlers.
///
/// Wrapped in `Arc` and handed to handlers through Axum's State extraction.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Crate version reported by the health check
    pub version: &'static str,

    /// When the process started serving
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            started_at: Utc::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

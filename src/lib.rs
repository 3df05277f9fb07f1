//! corsgate - CORS edge for the clinic scheduling backend.
//!
//! The crate builds an axum router whose every path is covered by a single
//! static cross-origin policy, loaded once from the environment.

pub mod config;
pub mod cors;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};

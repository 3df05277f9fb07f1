use http::{HeaderName, Method};
use serde::{Deserialize, Serialize};
use url::Url;

/// Origin of the deployed frontend.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://historical-pepi-puc-tis-d0d4bf2c.koyeb.app";

pub const DEFAULT_ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];

/// Preflight cache lifetime sent as `Access-Control-Max-Age`.
pub const DEFAULT_MAX_AGE_SECONDS: u64 = 1800;

pub const WILDCARD: &str = "*";

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed to read responses (use ["*"] for all origins)
    pub allowed_origins: Vec<String>,

    /// Methods advertised on preflight (use ["*"] to mirror the requested method)
    pub allowed_methods: Vec<String>,

    /// Request headers accepted on preflight (use ["*"] to mirror the requested headers)
    pub allowed_headers: Vec<String>,

    /// Value of `Access-Control-Max-Age` in seconds
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            allowed_methods: DEFAULT_ALLOWED_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_headers: vec![WILDCARD.to_string()],
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        is_wildcard(&self.allowed_origins)
    }

    pub fn allows_any_method(&self) -> bool {
        is_wildcard(&self.allowed_methods)
    }

    pub fn allows_any_header(&self) -> bool {
        is_wildcard(&self.allowed_headers)
    }

    /// Validate CORS configuration values
    pub fn validate(&self) -> Result<(), String> {
        validate_list("CORS_ALLOWED_ORIGINS", &self.allowed_origins)?;
        validate_list("CORS_ALLOWED_METHODS", &self.allowed_methods)?;
        validate_list("CORS_ALLOWED_HEADERS", &self.allowed_headers)?;

        if !self.allows_any_origin() {
            for origin in &self.allowed_origins {
                validate_origin(origin)?;
            }
        }

        if !self.allows_any_method() {
            for method in &self.allowed_methods {
                Method::from_bytes(method.as_bytes()).map_err(|_| {
                    format!("CORS_ALLOWED_METHODS entry '{}' is not a valid method", method)
                })?;
            }
        }

        if !self.allows_any_header() {
            for header in &self.allowed_headers {
                HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
                    format!("CORS_ALLOWED_HEADERS entry '{}' is not a valid header name", header)
                })?;
            }
        }

        Ok(())
    }
}

fn is_wildcard(values: &[String]) -> bool {
    values.len() == 1 && values[0] == WILDCARD
}

fn validate_list(var: &str, values: &[String]) -> Result<(), String> {
    if values.is_empty() {
        return Err(format!("{} must contain at least one entry", var));
    }

    if values.len() > 1 && values.iter().any(|v| v == WILDCARD) {
        return Err(format!("{} cannot combine '*' with explicit entries", var));
    }

    Ok(())
}

/// Browsers send `Origin` in its ASCII serialization, so a configured origin
/// only ever matches if it is already in that form.
fn validate_origin(origin: &str) -> Result<(), String> {
    let parsed = Url::parse(origin)
        .map_err(|e| format!("CORS_ALLOWED_ORIGINS entry '{}' is not a URL: {}", origin, e))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "CORS_ALLOWED_ORIGINS entry '{}' must use http or https",
            origin
        ));
    }

    if parsed.origin().ascii_serialization() != origin {
        return Err(format!(
            "CORS_ALLOWED_ORIGINS entry '{}' must be a bare origin like https://app.example.com \
             (lowercase host, no path, no trailing slash, no default port)",
            origin
        ));
    }

    Ok(())
}

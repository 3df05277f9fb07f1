mod cors;
mod logging;
mod server;

pub use cors::{
    CorsConfig, DEFAULT_ALLOWED_METHODS, DEFAULT_ALLOWED_ORIGIN, DEFAULT_MAX_AGE_SECONDS, WILDCARD,
};
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Unset variables fall back to the defaults of each section.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = lookup("SERVER_HOST").unwrap_or(defaults.server.host);
        let port = parse_var(&lookup, "SERVER_PORT", defaults.server.port)?;

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| split_list(&s))
            .unwrap_or(defaults.cors.allowed_origins);
        let allowed_methods = lookup("CORS_ALLOWED_METHODS")
            .map(|s| {
                split_list(&s)
                    .into_iter()
                    .map(|m| m.to_ascii_uppercase())
                    .collect()
            })
            .unwrap_or(defaults.cors.allowed_methods);
        let allowed_headers = lookup("CORS_ALLOWED_HEADERS")
            .map(|s| split_list(&s))
            .unwrap_or(defaults.cors.allowed_headers);
        let max_age_seconds =
            parse_var(&lookup, "CORS_MAX_AGE_SECONDS", defaults.cors.max_age_seconds)?;

        let format = match lookup("LOG_FORMAT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Configuration(format!("Invalid LOG_FORMAT: {}", e)))?,
            None => defaults.logging.format,
        };

        let config = Config {
            server: ServerConfig { host, port },
            cors: CorsConfig {
                allowed_origins,
                allowed_methods,
                allowed_headers,
                max_age_seconds,
            },
            logging: LoggingConfig { format },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::Configuration(
                "SERVER_HOST cannot be empty".to_string(),
            ));
        }

        self.cors.validate().map_err(AppError::Configuration)?;

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}

/// Split a comma separated variable, dropping blank entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> AppResult<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cors.allowed_origins, vec![DEFAULT_ALLOWED_ORIGIN]);
        assert_eq!(
            config.cors.allowed_methods,
            vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"]
        );
        assert_eq!(config.cors.allowed_headers, vec!["*"]);
        assert_eq!(config.cors.max_age_seconds, 1800);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_origin_list_override() {
        let config = load(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://app.example.com, http://localhost:3000,",
        )])
        .unwrap();

        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://app.example.com", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_methods_are_uppercased() {
        let config = load(&[("CORS_ALLOWED_METHODS", "get,post")]).unwrap();
        assert_eq!(config.cors.allowed_methods, vec!["GET", "POST"]);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("SERVER_PORT", "not_a_port")]).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn test_invalid_max_age() {
        let err = load(&[("CORS_MAX_AGE_SECONDS", "-5")]).unwrap_err();
        assert!(err.to_string().contains("CORS_MAX_AGE_SECONDS"));
    }

    #[test]
    fn test_invalid_origin_rejected_at_load() {
        let err = load(&[("CORS_ALLOWED_ORIGINS", "https://app.example.com/")]).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_blank_origins_rejected() {
        assert!(load(&[("CORS_ALLOWED_ORIGINS", " , ")]).is_err());
    }

    #[test]
    fn test_json_log_format() {
        let config = load(&[("LOG_FORMAT", "json")]).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(load(&[("LOG_FORMAT", "yaml")]).is_err());
    }
}

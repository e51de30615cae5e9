//! CORS (Cross-Origin Resource Sharing) middleware configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

/// Creates a CORS layer based on the provided configuration.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.to_header_values())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(config.allow_credentials)
        .max_age(config.max_age())
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins.
    /// If empty, defaults to localhost origins for development.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[arg(long, env = "CORS_MAX_AGE", default_value = "3600")]
    pub max_age_seconds: u64,

    /// Whether to allow credentials in CORS requests.
    #[arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value = "true")]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Returns localhost origins for development.
    fn localhost_origins() -> Vec<HeaderValue> {
        [
            "http://localhost:3000",
            "http://localhost:5173",
            "http://127.0.0.1:3000",
            "http://127.0.0.1:5173",
        ]
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect()
    }

    /// Converts configured origins to HeaderValue list.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            Self::localhost_origins()
        } else {
            self.allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_localhost_origins() {
        let config = CorsConfig::default();
        assert!(!config.to_header_values().is_empty());
    }

    #[test]
    fn configured_origins_replace_defaults() {
        let config = CorsConfig {
            allowed_origins: vec!["https://example.com".to_owned()],
            ..CorsConfig::default()
        };

        let origins = config.to_header_values();
        assert_eq!(origins, vec![HeaderValue::from_static("https://example.com")]);
    }

    #[test]
    fn invalid_origins_are_dropped() {
        let config = CorsConfig {
            allowed_origins: vec!["https://ok.example".to_owned(), "bad\norigin".to_owned()],
            ..CorsConfig::default()
        };

        assert_eq!(config.to_header_values().len(), 1);
    }
}

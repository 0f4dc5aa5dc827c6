//! Configuration types for the Axum HTTP server.
//!
//! This module provides configuration options for the REST API server,
//! including network binding and the origins a browser front-end may call
//! the API from.

use axum::http::{HeaderValue, Method, header};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{self, AllowOrigin, CorsLayer};

/// Configuration for the Axum HTTP server.
///
/// # Examples
///
/// ```
/// use breakeven_axum::config::AxumConfig;
///
/// // Use default configuration
/// let config = AxumConfig::default();
///
/// // Custom configuration
/// let config = AxumConfig {
///     bind_address: "127.0.0.1:3000".parse().unwrap(),
///     allowed_origins: vec!["https://app.example.com".to_string()],
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address to bind the server to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Origins allowed to make cross-origin requests; `*` allows any
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl AxumConfig {
    /// Build the CORS policy for the configured origins.
    ///
    /// Origins that are not valid header values are skipped with a warning.
    pub fn cors_layer(&self) -> CorsLayer {
        let origin = if self.allowed_origins.iter().any(|origin| origin == "*") {
            AllowOrigin::from(cors::Any)
        } else {
            AllowOrigin::list(self.allowed_origins.iter().filter_map(|origin| {
                HeaderValue::from_str(origin)
                    .inspect_err(|_| tracing::warn!(origin, "ignoring invalid CORS origin"))
                    .ok()
            }))
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: AxumConfig = serde_json::from_str(r#"{"bind_address": "127.0.0.1:8080"}"#)
            .expect("valid config");
        assert_eq!(config.bind_address, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.allowed_origins, vec!["http://localhost:5173"]);
    }
}

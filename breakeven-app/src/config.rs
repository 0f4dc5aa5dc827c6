//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple sources
//! with a clear precedence order. Configuration can come from default values,
//! configuration files, and environment variables. The result is built once at
//! start-up and never changes afterwards.

use crate::Cli;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, allowed origins)
    #[serde(default)]
    pub server: breakeven_axum::config::AxumConfig,

    /// Database configuration (file path, creation)
    #[serde(default)]
    pub database: breakeven_sqlite::config::SqliteConfig,

    /// Token lifetime and the initial administrator
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Authentication settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// How long an issued token stays valid, e.g. `"7d"` or `"12h"`
    #[serde(default = "default_token_ttl", with = "humantime_serde")]
    pub token_ttl: Duration,

    /// An administrator account to create on start-up, if it does not exist
    #[serde(default)]
    pub admin: Option<AdminAccount>,
}

fn default_token_ttl() -> Duration {
    Duration::from_secs(7 * 24 * 60 * 60)
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: default_token_ttl(),
            admin: None,
        }
    }
}

/// Credentials of the administrator account seeded at start-up.
#[derive(Clone, Deserialize, Serialize)]
pub struct AdminAccount {
    /// Login email of the administrator
    pub email: String,
    /// Initial password of the administrator
    pub password: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Store the database in a file
    /// export APP_DATABASE__DATABASE_PATH="/data/breakeven.db"
    ///
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    ///
    /// # Shorten the token lifetime
    /// export APP_AUTH__TOKEN_TTL="12h"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        match &cli.config {
            Some(path) if path.exists() => Self::layered(Some(config::File::from(path.as_path()))),
            Some(path) => Err(anyhow::anyhow!(
                "Config file {} does not exist",
                path.display()
            )),
            None => Self::layered(None::<config::File<config::FileSourceFile, config::FileFormat>>),
        }
    }

    fn layered<S>(file: Option<S>) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(file) = file {
            config = config.add_source(file);
        }

        // Override with environment variables
        // This maps APP_SERVER__BIND_ADDRESS to server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_overrides_defaults() -> anyhow::Result<()> {
        let file = config::File::from_str(
            r#"
            [server]
            bind_address = "127.0.0.1:3000"

            [database]
            database_path = "analytics.db"

            [auth]
            token_ttl = "12h"

            [auth.admin]
            email = "admin@example.com"
            password = "change-me"
            "#,
            config::FileFormat::Toml,
        );

        let config = AppConfig::layered(Some(file))?;
        assert_eq!(config.server.bind_address, "127.0.0.1:3000".parse::<std::net::SocketAddr>()?);
        assert_eq!(
            config.server.allowed_origins,
            AppConfig::default().server.allowed_origins
        );
        assert_eq!(
            config.database.database_path,
            Some(PathBuf::from("analytics.db"))
        );
        assert_eq!(config.auth.token_ttl, Duration::from_secs(12 * 60 * 60));
        assert_eq!(config.auth.admin.unwrap().email, "admin@example.com");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/breakeven.toml")),
            secret: "secret".into(),
            schema: None,
        };
        assert!(AppConfig::load(&cli).is_err());
    }

    #[test]
    fn test_password_is_not_logged() {
        let admin = AdminAccount {
            email: "admin@example.com".into(),
            password: "change-me".into(),
        };
        assert!(!format!("{admin:?}").contains("change-me"));
    }
}

//! Application configuration module
//!
//! Configuration is loaded from environment variables with the
//! `PROJECT_TRACKER` prefix; nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use project_tracker::config::AppConfig;
//!
//! let config = AppConfig::from_env().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.port);
//! ```

mod database;
mod error;
mod features;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection; the in-memory store is used when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables with the
    /// `PROJECT_TRACKER` prefix:
    ///
    /// - `PROJECT_TRACKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PROJECT_TRACKER__DATABASE__URL=...` -> `database.url = ...`
    /// - `PROJECT_TRACKER__FEATURES__LOAD_FIXTURES=true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PROJECT_TRACKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Loads and validates configuration.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Load` if values cannot be parsed
    /// - `ConfigError::Invalid` if a value is unusable
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.features.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

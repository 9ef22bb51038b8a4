//! Configuration error types

use thiserror::Error;

/// Errors raised while reading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// A configuration value that parsed but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("server.host '{0}' does not form a socket address")]
    InvalidHost(String),

    #[error("server.port must not be 0")]
    InvalidPort,

    #[error("server.request_timeout_secs must be within 1..={max}, got {secs}")]
    InvalidTimeout { secs: u64, max: u64 },

    #[error("database.url must start with postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("database.min_connections ({min}) exceeds max_connections ({max})")]
    InvalidPoolSize { min: u32, max: u32 },

    #[error("database.max_connections ({0}) exceeds 100")]
    PoolSizeTooLarge(u32),

    #[error("features.fixture_group must not be blank")]
    BlankFixtureGroup,
}

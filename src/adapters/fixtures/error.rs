//! Fixture loading errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ValidationError};

/// Errors raised while ordering or running fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Fixture '{0}' is registered twice")]
    DuplicateFixture(String),

    #[error("Fixture '{fixture}' depends on unknown fixture '{dependency}'")]
    UnknownDependency { fixture: String, dependency: String },

    #[error("Fixture dependencies form a cycle between: {}", .0.join(", "))]
    Cycle(Vec<String>),

    #[error("Reference '{0}' has not been added by any loaded fixture")]
    MissingReference(String),

    #[error("Reference '{0}' is already set")]
    DuplicateReference(String),

    #[error("Invalid fixture data: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Store rejected fixture data: {0}")]
    Store(#[from] DomainError),
}

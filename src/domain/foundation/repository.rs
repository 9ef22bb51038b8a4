//! Base repository trait for persistence operations.
//!
//! This module provides the [`Record`] contract every persisted entity
//! satisfies and the generic `Repository<T, ID>` trait that defines the
//! standard CRUD interface for all stores.
//!
//! # Example
//!
//! ```ignore
//! #[async_trait]
//! pub trait ProjectRepository: Repository<Project, ProjectId> {
//!     async fn find_by_key(&self, key: RecordKey) -> Result<Option<Project>, DomainError>;
//! }
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use super::{DomainError, RecordKey, StoreId, Validate};

/// A value the store must keep unique across all records of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueKey {
    /// Constraint name reported on violation.
    pub constraint: &'static str,
    /// Canonical value compared by the store.
    pub value: String,
}

impl UniqueKey {
    pub fn new(constraint: &'static str, value: impl Into<String>) -> Self {
        Self {
            constraint,
            value: value.into(),
        }
    }
}

/// Contract between entities and the store.
///
/// Records are created with no store id; the store assigns one on first save.
pub trait Record: Validate + Clone + Send + Sync + 'static {
    /// Store identifier type.
    type Id: StoreId;

    /// Stable attribute names, shared with the admin descriptors.
    const ATTRIBUTES: &'static [&'static str];

    /// Object identity of this record.
    fn key(&self) -> RecordKey;

    /// Store id, `None` until persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Called by the store exactly once, on first save.
    fn assign_id(&mut self, id: Self::Id);

    /// Values that must be unique among all records of this type.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }

    /// Whether the store has assigned an id.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Base trait for record repositories.
///
/// Provides standard CRUD operations that all repositories share.
/// Entity-specific repositories extend this trait with additional queries.
///
/// # Error Handling
///
/// All methods return `Result<_, DomainError>`. Implementations convert
/// adapter-specific errors into `DatabaseError`, constraint failures into
/// `ValidationFailed` or `UniqueViolation`.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync + Debug + 'static,
{
    /// Finds a record by its store id.
    ///
    /// Returns `Ok(None)` if it doesn't exist.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, DomainError>;

    /// Persists a new record, assigning and returning its id.
    ///
    /// # Errors
    ///
    /// - `AlreadyPersisted` if the record already has an id
    /// - `ValidationFailed` if a declared constraint fails
    /// - `UniqueViolation` if a unique value is taken
    async fn save(&self, entity: &mut T) -> Result<ID, DomainError>;

    /// Updates a persisted record.
    ///
    /// # Errors
    ///
    /// - `NotPersisted` if the record has no id
    /// - `RecordNotFound` if the id is unknown
    /// - `ValidationFailed` / `UniqueViolation` as for `save`
    async fn update(&self, entity: &mut T) -> Result<(), DomainError>;

    /// Deletes a record by id.
    ///
    /// # Errors
    ///
    /// - `RecordNotFound` if the id is unknown
    async fn delete(&self, id: ID) -> Result<(), DomainError>;

    /// All records in id order.
    async fn find_all(&self) -> Result<Vec<T>, DomainError>;

    /// Checks if a record with the given id exists.
    ///
    /// Default implementation uses `find_by_id`.
    async fn exists(&self, id: ID) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_is_object_safe() {
        #[derive(Clone)]
        struct Dummy;
        fn _accepts_dyn(_repo: &dyn Repository<Dummy, i64>) {}
    }

    #[test]
    fn unique_keys_compare_by_constraint_and_value() {
        let a = UniqueKey::new("email", "a@cgiar.org");
        let b = UniqueKey::new("email", "a@cgiar.org");
        let c = UniqueKey::new("username", "a@cgiar.org");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

//! Project repository port.

use crate::domain::foundation::{DomainError, ProjectId, RecordKey, Repository};
use crate::domain::project::Project;
use async_trait::async_trait;

/// Repository port for projects.
///
/// `principal_investigator` is the persisted side of the
/// StaffMember ↔ Project association.
#[async_trait]
pub trait ProjectRepository: Repository<Project, ProjectId> {
    /// Find a project by record key.
    async fn find_by_key(&self, key: RecordKey) -> Result<Option<Project>, DomainError>;

    /// Projects led by the given staff member, in id order.
    async fn find_by_principal_investigator(
        &self,
        staff_member: RecordKey,
    ) -> Result<Vec<Project>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn project_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProjectRepository) {}
    }
}

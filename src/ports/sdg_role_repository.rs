//! SDG role repository port.

use crate::domain::foundation::{DomainError, RecordKey, Repository, SdgRoleId};
use crate::domain::project::SdgRole;
use async_trait::async_trait;

/// Repository port for SDG roles.
///
/// Implementations reject a second role for the same (project, sdg) pair
/// with `UniqueViolation` and constraint detail `project_sdg`.
#[async_trait]
pub trait SdgRoleRepository: Repository<SdgRole, SdgRoleId> {
    /// Roles of one project, in id order.
    async fn find_by_project(&self, project: RecordKey) -> Result<Vec<SdgRole>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn sdg_role_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SdgRoleRepository) {}
    }
}

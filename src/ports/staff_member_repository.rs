//! Staff member repository port (write side).
//!
//! Staff members own their roles: implementations persist roles together
//! with the member and delete roles the member has dropped.

use crate::domain::foundation::{DomainError, RecordKey, Repository, StaffMemberId};
use crate::domain::staff::StaffMember;
use async_trait::async_trait;

/// Repository port for the StaffMember aggregate.
///
/// Implementations must ensure:
/// - `save`/`update` persist every role in `staff_roles`, assigning ids to
///   new ones, and delete the roles returned by `take_orphaned_roles`
/// - `delete` removes the member's roles with it
/// - loaded members have `projects` rebuilt from the projects' principal
///   investigator
#[async_trait]
pub trait StaffMemberRepository: Repository<StaffMember, StaffMemberId> {
    /// Find a member by (lower-case) username.
    ///
    /// Returns `None` if not found.
    async fn find_by_username(&self, username: &str) -> Result<Option<StaffMember>, DomainError>;

    /// Find a member by record key.
    async fn find_by_key(&self, key: RecordKey) -> Result<Option<StaffMember>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn staff_member_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn StaffMemberRepository) {}
    }
}

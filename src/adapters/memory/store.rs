//! In-memory implementation of every storage port.
//!
//! All tables live behind one `tokio::sync::RwLock`, so each mutation runs
//! as a single writer and sees the whole store consistently. Used by tests
//! and by the binary when no database is configured.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::expenditure::Expenditure;
use crate::domain::foundation::{
    DomainError, ExpenditureId, PartnershipId, ProjectId, Record, RecordKey, ReferenceId,
    Repository, SamplingDocumentationId, SdgRoleId, StaffMemberId,
};
use crate::domain::project::{Partnership, Project, SdgRole};
use crate::domain::reference::{
    Organisation, PartnershipType, SamplingActivity, SamplingDocumentType, Sdg,
};
use crate::domain::sampling::SamplingDocumentation;
use crate::domain::staff::{StaffMember, StaffRole};
use crate::ports::{
    ExpenditureRepository, ListOptions, PartnershipRepository, ProjectRepository,
    SamplingDocumentationRepository, SdgRoleRepository, StaffList, StaffMemberRepository,
    StaffReader, StaffView,
};

use super::table::Table;

#[derive(Default)]
struct Tables {
    staff_members: Table<StaffMember>,
    staff_roles: Table<StaffRole>,
    projects: Table<Project>,
    sdg_roles: Table<SdgRole>,
    partnerships: Table<Partnership>,
    expenditures: Table<Expenditure>,
    sampling_documentation: Table<SamplingDocumentation>,
    organisations: Table<Organisation>,
    partnership_types: Table<PartnershipType>,
    sdgs: Table<Sdg>,
    sampling_activities: Table<SamplingActivity>,
    sampling_document_types: Table<SamplingDocumentType>,
}

impl Tables {
    /// Rebuilds a member from its row, its role rows, and the projects that
    /// name it as principal investigator.
    fn assemble(&self, id: StaffMemberId, row: &StaffMember) -> StaffMember {
        let key = row.key();
        let roles = self
            .staff_roles
            .filter(|role| role.staff_member() == Some(key));
        let projects = self
            .projects
            .filter(|project| project.principal_investigator() == Some(key))
            .into_iter()
            .map(|project| project.key())
            .collect();
        StaffMember::reconstitute(
            key,
            id,
            row.username().map(String::from),
            row.email().map(String::from),
            row.first_name().map(String::from),
            row.last_name().map(String::from),
            row.home_program().map(String::from),
            projects,
            roles,
        )
    }

    fn members(&self) -> Vec<StaffMember> {
        self.staff_members
            .rows()
            .map(|(id, row)| self.assemble(*id, row))
            .collect()
    }

    fn member_where(&self, predicate: impl Fn(&StaffMember) -> bool) -> Option<StaffMember> {
        self.staff_members
            .rows()
            .find(|(_, row)| predicate(*row))
            .map(|(id, row)| self.assemble(*id, row))
    }

    /// Persists the member's roles and deletes the ones it dropped.
    fn cascade_roles(&mut self, member: &mut StaffMember) -> Result<(), DomainError> {
        for role in member.staff_roles_mut() {
            self.staff_roles.put(role)?;
        }
        let orphaned = member.take_orphaned_roles();
        if !orphaned.is_empty() {
            let removed = self
                .staff_roles
                .remove_where(|role| orphaned.contains(&role.key()));
            debug!(member = %member.key(), removed, "orphaned staff roles deleted");
        }
        Ok(())
    }
}

/// In-memory store implementing all repository and reader ports.
///
/// Cloning shares the underlying tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored staff roles across all members.
    pub async fn staff_role_count(&self) -> usize {
        self.tables.read().await.staff_roles.len()
    }

    /// Whether a staff role with this key is stored.
    pub async fn has_staff_role(&self, key: RecordKey) -> bool {
        self.tables.read().await.staff_roles.find_by_key(key).is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Staff members (aggregate with cascading roles)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Repository<StaffMember, StaffMemberId> for InMemoryStore {
    async fn find_by_id(&self, id: StaffMemberId) -> Result<Option<StaffMember>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .staff_members
            .get(id)
            .map(|row| tables.assemble(id, &row)))
    }

    async fn save(&self, member: &mut StaffMember) -> Result<StaffMemberId, DomainError> {
        let mut tables = self.tables.write().await;
        tables.staff_members.check_insert(member)?;
        let id = tables.staff_members.next_id()?;
        member.assign_id(id);
        tables.cascade_roles(member)?;
        tables.staff_members.put(member)?;
        debug!(%id, roles = member.staff_roles().len(), "staff member inserted");
        Ok(id)
    }

    async fn update(&self, member: &mut StaffMember) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let id = tables.staff_members.check_update(member)?;
        tables.cascade_roles(member)?;
        tables.staff_members.put(member)?;
        debug!(%id, roles = member.staff_roles().len(), "staff member updated");
        Ok(())
    }

    async fn delete(&self, id: StaffMemberId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let row = tables.staff_members.remove(id)?;
        let key = row.key();
        let removed = tables
            .staff_roles
            .remove_where(|role| role.staff_member() == Some(key));
        tables.projects.modify_where(
            |project| project.principal_investigator() == Some(key),
            |project| {
                project.set_principal_investigator(None);
            },
        );
        debug!(%id, removed, "staff member roles deleted");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<StaffMember>, DomainError> {
        Ok(self.tables.read().await.members())
    }
}

#[async_trait]
impl StaffMemberRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<StaffMember>, DomainError> {
        let username = username.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .member_where(|row| row.username() == Some(username.as_str())))
    }

    async fn find_by_key(&self, key: RecordKey) -> Result<Option<StaffMember>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .member_where(|row| row.key() == key))
    }
}

#[async_trait]
impl StaffReader for InMemoryStore {
    async fn get_by_username(&self, username: &str) -> Result<Option<StaffView>, DomainError> {
        match StaffMemberRepository::find_by_username(self, username).await? {
            Some(member) => Ok(Some(StaffView::from_member(&member)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, options: &ListOptions) -> Result<StaffList, DomainError> {
        let members = self.tables.read().await.members();
        let total = members.len() as u64;
        let items = options
            .window(members)
            .iter()
            .map(StaffView::from_member)
            .collect::<Result<Vec<_>, _>>()?;
        let has_more = u64::from(options.offset.unwrap_or(0)) + (items.len() as u64) < total;
        Ok(StaffList {
            items,
            total,
            has_more,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plain tables
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! table_repository {
    ($record:ty, $id:ty, $table:ident) => {
        #[async_trait]
        impl Repository<$record, $id> for InMemoryStore {
            async fn find_by_id(&self, id: $id) -> Result<Option<$record>, DomainError> {
                Ok(self.tables.read().await.$table.get(id))
            }

            async fn save(&self, entity: &mut $record) -> Result<$id, DomainError> {
                self.tables.write().await.$table.insert(entity)
            }

            async fn update(&self, entity: &mut $record) -> Result<(), DomainError> {
                self.tables.write().await.$table.update(entity)
            }

            async fn delete(&self, id: $id) -> Result<(), DomainError> {
                self.tables.write().await.$table.remove(id).map(|_| ())
            }

            async fn find_all(&self) -> Result<Vec<$record>, DomainError> {
                Ok(self.tables.read().await.$table.all())
            }

            async fn exists(&self, id: $id) -> Result<bool, DomainError> {
                Ok(self.tables.read().await.$table.contains(id))
            }
        }
    };
}

table_repository!(Project, ProjectId, projects);
table_repository!(SdgRole, SdgRoleId, sdg_roles);
table_repository!(Partnership, PartnershipId, partnerships);
table_repository!(Expenditure, ExpenditureId, expenditures);
table_repository!(
    SamplingDocumentation,
    SamplingDocumentationId,
    sampling_documentation
);
table_repository!(Organisation, ReferenceId, organisations);
table_repository!(PartnershipType, ReferenceId, partnership_types);
table_repository!(Sdg, ReferenceId, sdgs);
table_repository!(SamplingActivity, ReferenceId, sampling_activities);
table_repository!(SamplingDocumentType, ReferenceId, sampling_document_types);

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn find_by_key(&self, key: RecordKey) -> Result<Option<Project>, DomainError> {
        Ok(self.tables.read().await.projects.find_by_key(key))
    }

    async fn find_by_principal_investigator(
        &self,
        staff_member: RecordKey,
    ) -> Result<Vec<Project>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .projects
            .filter(|project| project.principal_investigator() == Some(staff_member)))
    }
}

#[async_trait]
impl SdgRoleRepository for InMemoryStore {
    async fn find_by_project(&self, project: RecordKey) -> Result<Vec<SdgRole>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .sdg_roles
            .filter(|role| role.project() == Some(project)))
    }
}

#[async_trait]
impl PartnershipRepository for InMemoryStore {
    async fn find_by_project(&self, project: RecordKey) -> Result<Vec<Partnership>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .partnerships
            .filter(|partnership| partnership.project() == Some(project)))
    }
}

#[async_trait]
impl ExpenditureRepository for InMemoryStore {
    async fn find_by_ilri_code(&self, ilri_code: &str) -> Result<Vec<Expenditure>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .expenditures
            .filter(|expenditure| expenditure.ilri_code() == Some(ilri_code)))
    }
}

#[async_trait]
impl SamplingDocumentationRepository for InMemoryStore {
    async fn find_by_activity(
        &self,
        activity: RecordKey,
    ) -> Result<Vec<SamplingDocumentation>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .sampling_documentation
            .filter(|doc| doc.sampling_activity() == Some(activity)))
    }
}

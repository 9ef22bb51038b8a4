//! Staff member aggregate.
//!
//! A staff member is the aggregate root of its staff roles: roles are added
//! and removed only through the member, and a removed role is deleted by the
//! store rather than detached.
//!
//! # Associations
//!
//! - `projects` is the inverse side of `Project::principal_investigator`.
//!   It is not persisted; stores rebuild it from the projects table.
//! - `staff_roles` owns its roles (cascade persist and delete, orphan removal).

use std::fmt;

use crate::domain::foundation::{
    nest, running_total, violations_of, AggregationError, AssociationError, AttributeValue,
    Constraint, LinkedSet, OwnedSet, Record, RecordKey, Rule, StaffMemberId, UniqueKey,
    Validate,
};
use crate::domain::project::Project;

use super::StaffRole;

/// Maximum length of a username.
pub const MAX_USERNAME_LENGTH: usize = 15;

/// Maximum length of an email address.
pub const MAX_EMAIL_LENGTH: usize = 100;

/// Maximum length of a home program name.
pub const MAX_HOME_PROGRAM_LENGTH: usize = 30;

/// A member of staff.
///
/// # Invariants
///
/// - `username` and `email` are stored lower-cased
/// - every role in `staff_roles` points back at this member
/// - every key in `projects` belongs to a project whose principal
///   investigator is this member, unless the caller reassigned it since
#[derive(Debug, Clone, PartialEq)]
pub struct StaffMember {
    key: RecordKey,
    id: Option<StaffMemberId>,
    username: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    home_program: Option<String>,
    projects: LinkedSet,
    staff_roles: OwnedSet<StaffRole>,
}

impl StaffMember {
    /// Creates an empty, unpersisted staff member.
    pub fn new() -> Self {
        Self {
            key: RecordKey::new(),
            id: None,
            username: None,
            email: None,
            first_name: None,
            last_name: None,
            home_program: None,
            projects: LinkedSet::new(),
            staff_roles: OwnedSet::new(),
        }
    }

    /// Reconstitute a staff member from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        key: RecordKey,
        id: StaffMemberId,
        username: Option<String>,
        email: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
        home_program: Option<String>,
        project_keys: Vec<RecordKey>,
        staff_roles: Vec<StaffRole>,
    ) -> Self {
        Self {
            key,
            id: Some(id),
            username,
            email,
            first_name,
            last_name,
            home_program,
            projects: LinkedSet::from_keys(project_keys),
            staff_roles: OwnedSet::from_members(key, staff_roles),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn home_program(&self) -> Option<&str> {
        self.home_program.as_deref()
    }

    /// Keys of projects led by this member.
    pub fn projects(&self) -> &LinkedSet {
        &self.projects
    }

    pub fn staff_roles(&self) -> &OwnedSet<StaffRole> {
        &self.staff_roles
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scalar mutators
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets the username, lower-cased.
    pub fn set_username(&mut self, username: impl Into<String>) -> &mut Self {
        self.username = Some(username.into().to_lowercase());
        self
    }

    /// Sets the email, lower-cased.
    pub fn set_email(&mut self, email: impl Into<String>) -> &mut Self {
        self.email = Some(email.into().to_lowercase());
        self
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> &mut Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> &mut Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn set_home_program(&mut self, home_program: impl Into<String>) -> &mut Self {
        self.home_program = Some(home_program.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Associations
    // ─────────────────────────────────────────────────────────────────────────

    /// Makes this member the principal investigator of `project`.
    ///
    /// Returns false, changing nothing, if the project is already listed.
    pub fn add_project(&mut self, project: &mut Project) -> bool {
        self.projects.link(self.key, project)
    }

    /// Drops `project` from this member's list and clears its principal
    /// investigator if it still points here.
    ///
    /// Returns false if the project was not listed.
    pub fn remove_project(&mut self, project: &mut Project) -> bool {
        self.projects.unlink(self.key, project)
    }

    /// Adds `role` to this member, pointing it back here.
    ///
    /// Returns false if a role with the same key is already present.
    pub fn add_staff_role(&mut self, role: StaffRole) -> bool {
        self.staff_roles.add(self.key, role)
    }

    /// Removes the role with `role_key`; the store deletes it on the next
    /// save. Returns the detached role, or `None` if it was not present.
    pub fn remove_staff_role(&mut self, role_key: RecordKey) -> Option<StaffRole> {
        self.staff_roles.remove(self.key, role_key)
    }

    /// Checks both associations against the given projects.
    pub fn verify_associations<'a>(
        &self,
        projects: impl IntoIterator<Item = &'a Project>,
    ) -> Result<(), AssociationError> {
        self.staff_roles.verify(self.key)?;
        self.projects.verify(self.key, projects)
    }

    /// Mutable role access for stores assigning role ids.
    pub(crate) fn staff_roles_mut(&mut self) -> impl Iterator<Item = &mut StaffRole> {
        self.staff_roles.iter_mut()
    }

    /// Keys of roles removed since the last save, handed to the store for
    /// deletion.
    pub fn take_orphaned_roles(&mut self) -> Vec<RecordKey> {
        self.staff_roles.take_orphaned()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived values
    // ─────────────────────────────────────────────────────────────────────────

    /// Sum of role percents, rounded to two places after each role.
    pub fn total_roles_percent(&self) -> Result<f64, AggregationError> {
        running_total(self.staff_roles.iter())
    }

    /// Full name for display, empty until persisted.
    pub fn display_name(&self) -> String {
        if self.id.is_none() {
            return String::new();
        }
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

impl Default for StaffMember {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StaffMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Validate for StaffMember {
    const ENTITY: &'static str = "StaffMember";
    const CONSTRAINTS: &'static [Constraint] = &[
        Constraint::new("username", Rule::NotBlank),
        Constraint::new(
            "username",
            Rule::MaxLength {
                max: MAX_USERNAME_LENGTH,
            },
        ),
        Constraint::new("email", Rule::NotBlank),
        Constraint::new("email", Rule::Email),
        Constraint::new(
            "email",
            Rule::MaxLength {
                max: MAX_EMAIL_LENGTH,
            },
        ),
        Constraint::new("homeProgram", Rule::NotBlank),
        Constraint::new(
            "homeProgram",
            Rule::MaxLength {
                max: MAX_HOME_PROGRAM_LENGTH,
            },
        ),
        Constraint::new("staffRoles", Rule::Valid),
    ];

    fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
        match name {
            "username" => Some(AttributeValue::Text(self.username.as_deref())),
            "email" => Some(AttributeValue::Text(self.email.as_deref())),
            "firstName" => Some(AttributeValue::Text(self.first_name.as_deref())),
            "lastName" => Some(AttributeValue::Text(self.last_name.as_deref())),
            "homeProgram" => Some(AttributeValue::Text(self.home_program.as_deref())),
            "staffRoles" => Some(AttributeValue::Nested(
                self.staff_roles
                    .iter()
                    .enumerate()
                    .flat_map(|(i, role)| nest("staffRoles", i, violations_of(role)))
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl Record for StaffMember {
    type Id = StaffMemberId;

    const ATTRIBUTES: &'static [&'static str] = &[
        "id",
        "username",
        "email",
        "firstName",
        "lastName",
        "homeProgram",
        "projects",
        "staffRoles",
    ];

    fn key(&self) -> RecordKey {
        self.key
    }

    fn id(&self) -> Option<StaffMemberId> {
        self.id
    }

    fn assign_id(&mut self, id: StaffMemberId) {
        self.id = Some(id);
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        let mut keys = Vec::new();
        if let Some(username) = &self.username {
            keys.push(UniqueKey::new("username", username.clone()));
        }
        if let Some(email) = &self.email {
            keys.push(UniqueKey::new("email", email.clone()));
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> StaffMember {
        let mut member = StaffMember::new();
        member
            .set_username("JDoe")
            .set_email("J.Doe@CGIAR.org")
            .set_first_name("Jane")
            .set_last_name("Doe")
            .set_home_program("Livestock Genetics");
        member
    }

    fn role(percent: f64) -> StaffRole {
        let mut role = StaffRole::new();
        role.set_percent(percent);
        role
    }

    #[test]
    fn username_and_email_are_lower_cased_on_write() {
        let member = member();
        assert_eq!(member.username(), Some("jdoe"));
        assert_eq!(member.email(), Some("j.doe@cgiar.org"));
    }

    #[test]
    fn display_name_is_empty_until_persisted() {
        let mut member = member();
        assert_eq!(member.to_string(), "");
        member.assign_id(StaffMemberId::new(1).unwrap());
        assert_eq!(member.to_string(), "Jane Doe");
    }

    #[test]
    fn add_project_links_both_sides() {
        let mut member = member();
        let mut project = Project::new();

        assert!(member.add_project(&mut project));
        assert!(member.projects().contains(project.key()));
        assert_eq!(project.principal_investigator(), Some(member.key()));
    }

    #[test]
    fn add_project_twice_is_idempotent() {
        let mut member = member();
        let mut project = Project::new();

        member.add_project(&mut project);
        assert!(!member.add_project(&mut project));
        assert_eq!(member.projects().len(), 1);
        assert_eq!(project.principal_investigator(), Some(member.key()));
    }

    #[test]
    fn remove_project_clears_principal_investigator() {
        let mut member = member();
        let mut project = Project::new();
        member.add_project(&mut project);

        assert!(member.remove_project(&mut project));
        assert!(member.projects().is_empty());
        assert_eq!(project.principal_investigator(), None);
    }

    #[test]
    fn remove_project_keeps_reassigned_principal_investigator() {
        let mut member = member();
        let mut other = StaffMember::new();
        let mut project = Project::new();
        member.add_project(&mut project);
        project.set_principal_investigator(Some(other.key()));

        assert!(member.remove_project(&mut project));
        assert_eq!(project.principal_investigator(), Some(other.key()));
        assert!(!other.remove_project(&mut project));
    }

    #[test]
    fn remove_unlisted_project_is_a_no_op() {
        let mut member = member();
        let mut project = Project::new();
        assert!(!member.remove_project(&mut project));
        assert_eq!(project.principal_investigator(), None);
    }

    #[test]
    fn project_moves_between_members() {
        let mut first = member();
        let mut second = StaffMember::new();
        let mut project = Project::new();

        first.add_project(&mut project);
        second.add_project(&mut project);
        assert_eq!(project.principal_investigator(), Some(second.key()));

        first.remove_project(&mut project);
        assert_eq!(project.principal_investigator(), Some(second.key()));
        assert!(second.verify_associations([&project]).is_ok());
        assert!(first.verify_associations([&project]).is_ok());
    }

    #[test]
    fn add_staff_role_points_role_back() {
        let mut member = member();
        let role = role(25.0);
        let key = role.key();

        assert!(member.add_staff_role(role.clone()));
        assert!(!member.add_staff_role(role));
        assert_eq!(member.staff_roles().len(), 1);
        assert_eq!(
            member.staff_roles().get(key).unwrap().staff_member(),
            Some(member.key())
        );
        assert!(member.verify_associations(std::iter::empty::<&Project>()).is_ok());
    }

    #[test]
    fn remove_staff_role_orphans_it() {
        let mut member = member();
        let role = role(25.0);
        let key = role.key();
        member.add_staff_role(role);

        let removed = member.remove_staff_role(key).unwrap();
        assert_eq!(removed.staff_member(), None);
        assert!(member.staff_roles().is_empty());
        assert_eq!(member.take_orphaned_roles(), vec![key]);
        assert!(member.remove_staff_role(key).is_none());
    }

    #[test]
    fn total_roles_percent_is_zero_without_roles() {
        assert_eq!(member().total_roles_percent().unwrap(), 0.0);
    }

    #[test]
    fn total_roles_percent_rounds_each_step() {
        let mut member = member();
        for percent in [33.333, 33.333, 33.334] {
            member.add_staff_role(role(percent));
        }
        assert_eq!(member.total_roles_percent().unwrap(), 99.99);
    }

    #[test]
    fn total_roles_percent_fails_on_role_without_percent() {
        let mut member = member();
        let blank = StaffRole::new();
        let key = blank.key();
        member.add_staff_role(blank);

        assert_eq!(
            member.total_roles_percent(),
            Err(AggregationError::InvalidRole { role: key })
        );
    }

    #[test]
    fn valid_member_passes_validation() {
        let mut member = member();
        member.add_staff_role(role(50.0));
        assert!(member.validate().is_ok());
    }

    #[test]
    fn blank_member_reports_each_required_field() {
        let err = StaffMember::new().validate().unwrap_err();
        assert!(err.has("username"));
        assert!(err.has("email"));
        assert!(err.has("homeProgram"));
    }

    #[test]
    fn overlong_username_and_bad_email_are_rejected() {
        let mut member = member();
        member
            .set_username("averyveryverylongname")
            .set_email("not-an-address");
        let err = member.validate().unwrap_err();
        assert!(err.has("username"));
        assert!(err.has("email"));
    }

    #[test]
    fn invalid_role_fails_member_validation() {
        let mut member = member();
        member.add_staff_role(StaffRole::new());
        let err = member.validate().unwrap_err();
        assert!(err.has("staffRoles[0].percent"));
    }

    #[test]
    fn unique_keys_cover_username_and_email() {
        let keys = member().unique_keys();
        assert_eq!(
            keys,
            vec![
                UniqueKey::new("username", "jdoe"),
                UniqueKey::new("email", "j.doe@cgiar.org"),
            ]
        );
    }
}

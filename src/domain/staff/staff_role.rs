//! Staff role entity: a staff member's percentage allocation.

use crate::domain::foundation::{
    Allocation, AttributeValue, BackReference, Constraint, Record, RecordKey, Rule, StaffRoleId,
    Validate,
};

/// A fractional allocation of one staff member, optionally to a project.
///
/// The `staff_member` back-reference is the owning side of the
/// StaffMember ↔ StaffRole association; it is managed by
/// [`StaffMember::add_staff_role`](super::StaffMember::add_staff_role) and
/// [`StaffMember::remove_staff_role`](super::StaffMember::remove_staff_role).
#[derive(Debug, Clone, PartialEq)]
pub struct StaffRole {
    key: RecordKey,
    id: Option<StaffRoleId>,
    staff_member: Option<RecordKey>,
    project: Option<RecordKey>,
    percent: Option<f64>,
}

impl StaffRole {
    /// Creates an empty, unpersisted role.
    pub fn new() -> Self {
        Self {
            key: RecordKey::new(),
            id: None,
            staff_member: None,
            project: None,
            percent: None,
        }
    }

    /// Reconstitute a role from persistence.
    pub fn reconstitute(
        key: RecordKey,
        id: StaffRoleId,
        staff_member: Option<RecordKey>,
        project: Option<RecordKey>,
        percent: Option<f64>,
    ) -> Self {
        Self {
            key,
            id: Some(id),
            staff_member,
            project,
            percent,
        }
    }

    pub fn staff_member(&self) -> Option<RecordKey> {
        self.staff_member
    }

    pub fn project(&self) -> Option<RecordKey> {
        self.project
    }

    pub fn percent(&self) -> Option<f64> {
        self.percent
    }

    pub fn set_project(&mut self, project: Option<RecordKey>) -> &mut Self {
        self.project = project;
        self
    }

    pub fn set_percent(&mut self, percent: f64) -> &mut Self {
        self.percent = Some(percent);
        self
    }
}

impl Default for StaffRole {
    fn default() -> Self {
        Self::new()
    }
}

impl BackReference for StaffRole {
    fn record_key(&self) -> RecordKey {
        self.key
    }

    fn back_reference(&self) -> Option<RecordKey> {
        self.staff_member
    }

    fn set_back_reference(&mut self, owner: Option<RecordKey>) {
        self.staff_member = owner;
    }
}

impl Allocation for StaffRole {
    fn allocation_key(&self) -> RecordKey {
        self.key
    }

    fn percent(&self) -> Option<f64> {
        self.percent
    }
}

impl Validate for StaffRole {
    const ENTITY: &'static str = "StaffRole";
    const CONSTRAINTS: &'static [Constraint] = &[
        Constraint::new("staffMember", Rule::NotBlank),
        Constraint::new("percent", Rule::NotBlank),
        Constraint::new("percent", Rule::Range { min: 0.0, max: 100.0 }),
    ];

    fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
        match name {
            "staffMember" => Some(AttributeValue::Link(self.staff_member)),
            "project" => Some(AttributeValue::Link(self.project)),
            "percent" => Some(AttributeValue::Number(self.percent)),
            _ => None,
        }
    }
}

impl Record for StaffRole {
    type Id = StaffRoleId;

    const ATTRIBUTES: &'static [&'static str] = &["id", "staffMember", "project", "percent"];

    fn key(&self) -> RecordKey {
        self.key
    }

    fn id(&self) -> Option<StaffRoleId> {
        self.id
    }

    fn assign_id(&mut self, id: StaffRoleId) {
        self.id = Some(id);
    }
}

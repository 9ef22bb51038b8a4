//! Project entity.

use chrono::NaiveDate;

use crate::domain::foundation::{
    AttributeValue, BackReference, Constraint, ProjectId, Record, RecordKey, Rule, Validate,
};

/// A research project led by a principal investigator.
///
/// `principal_investigator` is the owning side of the
/// StaffMember ↔ Project association. Setting it directly does not update
/// the staff member's project list; use
/// [`StaffMember::add_project`](crate::domain::staff::StaffMember::add_project)
/// to keep both sides in step.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    key: RecordKey,
    id: Option<ProjectId>,
    ilri_code: Option<String>,
    full_name: Option<String>,
    principal_investigator: Option<RecordKey>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl Project {
    pub fn new() -> Self {
        Self {
            key: RecordKey::new(),
            id: None,
            ilri_code: None,
            full_name: None,
            principal_investigator: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Reconstitute a project from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        key: RecordKey,
        id: ProjectId,
        ilri_code: Option<String>,
        full_name: Option<String>,
        principal_investigator: Option<RecordKey>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            key,
            id: Some(id),
            ilri_code,
            full_name,
            principal_investigator,
            start_date,
            end_date,
        }
    }

    pub fn ilri_code(&self) -> Option<&str> {
        self.ilri_code.as_deref()
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn principal_investigator(&self) -> Option<RecordKey> {
        self.principal_investigator
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn set_ilri_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.ilri_code = Some(code.into());
        self
    }

    pub fn set_full_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.full_name = Some(name.into());
        self
    }

    /// Sets the owning side only.
    pub fn set_principal_investigator(&mut self, staff_member: Option<RecordKey>) -> &mut Self {
        self.principal_investigator = staff_member;
        self
    }

    pub fn set_start_date(&mut self, date: NaiveDate) -> &mut Self {
        self.start_date = Some(date);
        self
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) -> &mut Self {
        self.end_date = date;
        self
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl BackReference for Project {
    fn record_key(&self) -> RecordKey {
        self.key
    }

    fn back_reference(&self) -> Option<RecordKey> {
        self.principal_investigator
    }

    fn set_back_reference(&mut self, owner: Option<RecordKey>) {
        self.principal_investigator = owner;
    }
}

impl Validate for Project {
    const ENTITY: &'static str = "Project";
    const CONSTRAINTS: &'static [Constraint] = &[
        Constraint::new("ilriCode", Rule::NotBlank),
        Constraint::new("fullName", Rule::NotBlank),
    ];

    fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
        match name {
            "ilriCode" => Some(AttributeValue::Text(self.ilri_code.as_deref())),
            "fullName" => Some(AttributeValue::Text(self.full_name.as_deref())),
            "principalInvestigator" => Some(AttributeValue::Link(self.principal_investigator)),
            "startDate" => Some(AttributeValue::Present(self.start_date.is_some())),
            "endDate" => Some(AttributeValue::Present(self.end_date.is_some())),
            _ => None,
        }
    }
}

impl Record for Project {
    type Id = ProjectId;

    const ATTRIBUTES: &'static [&'static str] = &[
        "id",
        "ilriCode",
        "fullName",
        "principalInvestigator",
        "startDate",
        "endDate",
    ];

    fn key(&self) -> RecordKey {
        self.key
    }

    fn id(&self) -> Option<ProjectId> {
        self.id
    }

    fn assign_id(&mut self, id: ProjectId) {
        self.id = Some(id);
    }
}

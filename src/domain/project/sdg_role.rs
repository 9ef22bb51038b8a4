//! SDG role entity: links one project to one Sustainable Development Goal.

use crate::domain::foundation::{
    running_total, AggregationError, Allocation, AttributeValue, Constraint, Record, RecordKey,
    Rule, SdgRoleId, UniqueKey, ValidationError, Validate,
};

/// Name of the composite unique constraint over (project, sdg).
pub const PROJECT_SDG_CONSTRAINT: &str = "project_sdg";

/// The contribution of a project to one SDG.
///
/// `project` and `sdg` identify the role: once set they cannot be changed,
/// and no two roles may share the same pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SdgRole {
    key: RecordKey,
    id: Option<SdgRoleId>,
    project: Option<RecordKey>,
    sdg: Option<RecordKey>,
    percent: Option<f64>,
}

impl SdgRole {
    pub fn new() -> Self {
        Self {
            key: RecordKey::new(),
            id: None,
            project: None,
            sdg: None,
            percent: None,
        }
    }

    /// Reconstitute a role from persistence.
    pub fn reconstitute(
        key: RecordKey,
        id: SdgRoleId,
        project: Option<RecordKey>,
        sdg: Option<RecordKey>,
        percent: Option<f64>,
    ) -> Self {
        Self {
            key,
            id: Some(id),
            project,
            sdg,
            percent,
        }
    }

    pub fn project(&self) -> Option<RecordKey> {
        self.project
    }

    pub fn sdg(&self) -> Option<RecordKey> {
        self.sdg
    }

    pub fn percent(&self) -> Option<f64> {
        self.percent
    }

    /// Sets the project. Setting the current value again is allowed.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if a different project is already set
    pub fn set_project(&mut self, project: RecordKey) -> Result<&mut Self, ValidationError> {
        set_once(&mut self.project, project, "project")?;
        Ok(self)
    }

    /// Sets the SDG. Setting the current value again is allowed.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if a different SDG is already set
    pub fn set_sdg(&mut self, sdg: RecordKey) -> Result<&mut Self, ValidationError> {
        set_once(&mut self.sdg, sdg, "sdg")?;
        Ok(self)
    }

    pub fn set_percent(&mut self, percent: f64) -> &mut Self {
        self.percent = Some(percent);
        self
    }
}

fn set_once(
    slot: &mut Option<RecordKey>,
    value: RecordKey,
    field: &str,
) -> Result<(), ValidationError> {
    match *slot {
        Some(current) if current != value => Err(ValidationError::invalid_format(
            field,
            "cannot be changed once set",
        )),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

/// Total SDG allocation of a project's roles, rounded per step.
pub fn total_sdg_percent<'a>(
    roles: impl IntoIterator<Item = &'a SdgRole>,
) -> Result<f64, AggregationError> {
    running_total(roles)
}

impl Default for SdgRole {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocation for SdgRole {
    fn allocation_key(&self) -> RecordKey {
        self.key
    }

    fn percent(&self) -> Option<f64> {
        self.percent
    }
}

impl Validate for SdgRole {
    const ENTITY: &'static str = "SDGRole";
    const CONSTRAINTS: &'static [Constraint] = &[
        Constraint::new("project", Rule::NotBlank),
        Constraint::new("sdg", Rule::NotBlank),
        Constraint::new("percent", Rule::Range { min: 0.0, max: 100.0 }),
    ];

    fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
        match name {
            "project" => Some(AttributeValue::Link(self.project)),
            "sdg" => Some(AttributeValue::Link(self.sdg)),
            "percent" => Some(AttributeValue::Number(self.percent)),
            _ => None,
        }
    }
}

impl Record for SdgRole {
    type Id = SdgRoleId;

    const ATTRIBUTES: &'static [&'static str] = &["id", "project", "sdg", "percent"];

    fn key(&self) -> RecordKey {
        self.key
    }

    fn id(&self) -> Option<SdgRoleId> {
        self.id
    }

    fn assign_id(&mut self, id: SdgRoleId) {
        self.id = Some(id);
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        match (self.project, self.sdg) {
            (Some(project), Some(sdg)) => vec![UniqueKey::new(
                PROJECT_SDG_CONSTRAINT,
                format!("{}:{}", project, sdg),
            )],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_and_sdg_are_set_once() {
        let project = RecordKey::new();
        let sdg = RecordKey::new();
        let mut role = SdgRole::new();
        role.set_project(project).unwrap();
        role.set_sdg(sdg).unwrap();

        assert!(role.set_project(project).is_ok());
        assert!(role.set_project(RecordKey::new()).is_err());
        assert!(role.set_sdg(RecordKey::new()).is_err());
        assert_eq!(role.project(), Some(project));
        assert_eq!(role.sdg(), Some(sdg));
    }

    #[test]
    fn roles_with_the_same_pair_share_a_unique_key() {
        let project = RecordKey::new();
        let sdg = RecordKey::new();
        let mut first = SdgRole::new();
        first.set_project(project).unwrap().set_sdg(sdg).unwrap();
        let mut second = SdgRole::new();
        second.set_project(project).unwrap().set_sdg(sdg).unwrap();

        assert_ne!(first.key(), second.key());
        assert_eq!(first.unique_keys(), second.unique_keys());
    }

    #[test]
    fn incomplete_role_has_no_unique_key_and_is_invalid() {
        let mut role = SdgRole::new();
        role.set_project(RecordKey::new()).unwrap();
        assert!(role.unique_keys().is_empty());
        assert!(role.validate().unwrap_err().has("sdg"));
    }

    #[test]
    fn project_totals_round_per_step() {
        let project = RecordKey::new();
        let roles: Vec<SdgRole> = [0.005, 0.005, 0.005]
            .iter()
            .map(|p| {
                let mut role = SdgRole::new();
                role.set_project(project).unwrap();
                role.set_sdg(RecordKey::new()).unwrap();
                role.set_percent(*p);
                role
            })
            .collect();
        assert_eq!(total_sdg_percent(&roles).unwrap(), 0.03);
    }
}

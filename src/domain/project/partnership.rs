//! Partnership entity: a project working with a partner organisation.

use crate::domain::foundation::{
    AttributeValue, Constraint, PartnershipId, Record, RecordKey, Rule, Validate,
};

/// Links a project, a partner organisation, and a partnership type.
///
/// Pure reference assignment; no side of these links keeps a mirrored list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partnership {
    key: RecordKey,
    id: Option<PartnershipId>,
    project: Option<RecordKey>,
    partner: Option<RecordKey>,
    partnership_type: Option<RecordKey>,
}

impl Partnership {
    pub fn new() -> Self {
        Self {
            key: RecordKey::new(),
            id: None,
            project: None,
            partner: None,
            partnership_type: None,
        }
    }

    /// Reconstitute a partnership from persistence.
    pub fn reconstitute(
        key: RecordKey,
        id: PartnershipId,
        project: Option<RecordKey>,
        partner: Option<RecordKey>,
        partnership_type: Option<RecordKey>,
    ) -> Self {
        Self {
            key,
            id: Some(id),
            project,
            partner,
            partnership_type,
        }
    }

    pub fn project(&self) -> Option<RecordKey> {
        self.project
    }

    pub fn partner(&self) -> Option<RecordKey> {
        self.partner
    }

    pub fn partnership_type(&self) -> Option<RecordKey> {
        self.partnership_type
    }

    pub fn set_project(&mut self, project: Option<RecordKey>) -> &mut Self {
        self.project = project;
        self
    }

    pub fn set_partner(&mut self, organisation: Option<RecordKey>) -> &mut Self {
        self.partner = organisation;
        self
    }

    pub fn set_partnership_type(&mut self, partnership_type: Option<RecordKey>) -> &mut Self {
        self.partnership_type = partnership_type;
        self
    }
}

impl Default for Partnership {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for Partnership {
    const ENTITY: &'static str = "Partnership";
    const CONSTRAINTS: &'static [Constraint] = &[
        Constraint::new("project", Rule::NotBlank),
        Constraint::new("partner", Rule::NotBlank),
        Constraint::new("partnershipType", Rule::NotBlank),
    ];

    fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
        match name {
            "project" => Some(AttributeValue::Link(self.project)),
            "partner" => Some(AttributeValue::Link(self.partner)),
            "partnershipType" => Some(AttributeValue::Link(self.partnership_type)),
            _ => None,
        }
    }
}

impl Record for Partnership {
    type Id = PartnershipId;

    const ATTRIBUTES: &'static [&'static str] = &["id", "project", "partner", "partnershipType"];

    fn key(&self) -> RecordKey {
        self.key
    }

    fn id(&self) -> Option<PartnershipId> {
        self.id
    }

    fn assign_id(&mut self, id: PartnershipId) {
        self.id = Some(id);
    }
}

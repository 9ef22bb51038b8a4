//! Reference data: named records other entities link to.
//!
//! Organisations, partnership types, SDGs, sampling activities, and sampling
//! document types carry nothing but a name. They share one shape, generated
//! by `reference_record!`.

use std::fmt;

use crate::domain::foundation::{
    AttributeValue, Constraint, Record, RecordKey, ReferenceId, Rule, Validate,
};

macro_rules! reference_record {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            key: RecordKey,
            id: Option<ReferenceId>,
            name: Option<String>,
        }

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    key: RecordKey::new(),
                    id: None,
                    name: Some(name.into()),
                }
            }

            /// Reconstitute from persistence.
            pub fn reconstitute(key: RecordKey, id: ReferenceId, name: Option<String>) -> Self {
                Self {
                    key,
                    id: Some(id),
                    name,
                }
            }

            pub fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }

            pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
                self.name = Some(name.into());
                self
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name.as_deref().unwrap_or_default())
            }
        }

        impl Validate for $name {
            const ENTITY: &'static str = $entity;
            const CONSTRAINTS: &'static [Constraint] = &[Constraint::new("name", Rule::NotBlank)];

            fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
                match name {
                    "name" => Some(AttributeValue::Text(self.name.as_deref())),
                    _ => None,
                }
            }
        }

        impl Record for $name {
            type Id = ReferenceId;

            const ATTRIBUTES: &'static [&'static str] = &["id", "name"];

            fn key(&self) -> RecordKey {
                self.key
            }

            fn id(&self) -> Option<ReferenceId> {
                self.id
            }

            fn assign_id(&mut self, id: ReferenceId) {
                self.id = Some(id);
            }
        }
    };
}

reference_record!(
    /// A partner organisation.
    Organisation,
    "Organisation"
);
reference_record!(
    /// Kind of partnership (e.g. funding, implementing).
    PartnershipType,
    "PartnershipType"
);
reference_record!(
    /// A Sustainable Development Goal.
    Sdg,
    "SDG"
);
reference_record!(
    /// A field sampling activity; parent of sampling documentation.
    SamplingActivity,
    "SamplingActivity"
);
reference_record!(
    /// Classification of a sampling document.
    SamplingDocumentType,
    "SamplingDocumentType"
);

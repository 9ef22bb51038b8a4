//! Sampling documentation entity.

use crate::domain::foundation::{
    AttributeValue, Constraint, Record, RecordKey, Rule, SamplingDocumentationId, Validate,
};

use super::MediaReference;

/// A document filed under a sampling activity.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingDocumentation {
    key: RecordKey,
    id: Option<SamplingDocumentationId>,
    sampling_activity: Option<RecordKey>,
    sampling_document_type: Option<RecordKey>,
    document: Option<MediaReference>,
}

impl SamplingDocumentation {
    pub fn new() -> Self {
        Self {
            key: RecordKey::new(),
            id: None,
            sampling_activity: None,
            sampling_document_type: None,
            document: None,
        }
    }

    /// Reconstitute from persistence.
    pub fn reconstitute(
        key: RecordKey,
        id: SamplingDocumentationId,
        sampling_activity: Option<RecordKey>,
        sampling_document_type: Option<RecordKey>,
        document: Option<MediaReference>,
    ) -> Self {
        Self {
            key,
            id: Some(id),
            sampling_activity,
            sampling_document_type,
            document,
        }
    }

    pub fn sampling_activity(&self) -> Option<RecordKey> {
        self.sampling_activity
    }

    pub fn sampling_document_type(&self) -> Option<RecordKey> {
        self.sampling_document_type
    }

    pub fn document(&self) -> Option<&MediaReference> {
        self.document.as_ref()
    }

    pub fn set_sampling_activity(&mut self, activity: Option<RecordKey>) -> &mut Self {
        self.sampling_activity = activity;
        self
    }

    pub fn set_sampling_document_type(&mut self, document_type: Option<RecordKey>) -> &mut Self {
        self.sampling_document_type = document_type;
        self
    }

    pub fn set_document(&mut self, document: Option<MediaReference>) -> &mut Self {
        self.document = document;
        self
    }
}

impl Default for SamplingDocumentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for SamplingDocumentation {
    const ENTITY: &'static str = "SamplingDocumentation";
    const CONSTRAINTS: &'static [Constraint] = &[
        Constraint::new("samplingActivity", Rule::NotBlank),
        Constraint::new("samplingDocumentType", Rule::NotBlank),
    ];

    fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
        match name {
            "samplingActivity" => Some(AttributeValue::Link(self.sampling_activity)),
            "samplingDocumentType" => Some(AttributeValue::Link(self.sampling_document_type)),
            "document" => Some(AttributeValue::Present(self.document.is_some())),
            _ => None,
        }
    }
}

impl Record for SamplingDocumentation {
    type Id = SamplingDocumentationId;

    const ATTRIBUTES: &'static [&'static str] =
        &["id", "samplingActivity", "samplingDocumentType", "document"];

    fn key(&self) -> RecordKey {
        self.key
    }

    fn id(&self) -> Option<SamplingDocumentationId> {
        self.id
    }

    fn assign_id(&mut self, id: SamplingDocumentationId) {
        self.id = Some(id);
    }
}

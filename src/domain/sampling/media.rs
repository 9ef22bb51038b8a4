//! Media reference value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Provider storing uploaded files as-is.
pub const FILE_PROVIDER: &str = "file";

/// Context used when none is given.
pub const DEFAULT_MEDIA_CONTEXT: &str = "default";

/// A stored media file, addressed by provider, context and file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaReference {
    provider: String,
    context: String,
    file_name: String,
    content_type: String,
}

impl MediaReference {
    /// A file held by the file provider in the default context.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the file name or content type is blank
    pub fn file(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        let content_type = content_type.into();
        if file_name.trim().is_empty() {
            return Err(ValidationError::empty_field("fileName"));
        }
        if content_type.trim().is_empty() {
            return Err(ValidationError::empty_field("contentType"));
        }
        Ok(Self {
            provider: FILE_PROVIDER.to_string(),
            context: DEFAULT_MEDIA_CONTEXT.to_string(),
            file_name,
            content_type,
        })
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_uses_file_provider_and_default_context() {
        let media = MediaReference::file("protocol.pdf", "application/pdf").unwrap();
        assert_eq!(media.provider(), "file");
        assert_eq!(media.context(), "default");
        assert_eq!(media.file_name(), "protocol.pdf");
    }

    #[test]
    fn file_rejects_blank_name() {
        assert_eq!(
            MediaReference::file("  ", "application/pdf").unwrap_err(),
            ValidationError::empty_field("fileName")
        );
    }

    #[test]
    fn serializes_camel_case() {
        let media = MediaReference::file("a.csv", "text/csv").unwrap();
        let json = serde_json::to_value(&media).unwrap();
        assert_eq!(json["fileName"], "a.csv");
        assert_eq!(json["contentType"], "text/csv");
    }
}

//! Feature flags configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Load sample fixtures into the store at startup
    #[serde(default)]
    pub load_fixtures: bool,

    /// Restrict fixture loading to one group (plus its dependencies)
    pub fixture_group: Option<String>,
}

impl FeatureFlags {
    /// Validate feature flags
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.fixture_group {
            Some(group) if group.trim().is_empty() => Err(ValidationError::BlankFixtureGroup),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(!flags.load_fixtures);
        assert!(flags.fixture_group.is_none());
        assert!(flags.validate().is_ok());
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "load_fixtures": true,
            "fixture_group": "api"
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(flags.load_fixtures);
        assert_eq!(flags.fixture_group.as_deref(), Some("api"));
    }

    #[test]
    fn test_blank_fixture_group_is_rejected() {
        let flags = FeatureFlags {
            load_fixtures: true,
            fixture_group: Some("  ".to_string()),
        };
        assert!(flags.validate().is_err());
    }
}

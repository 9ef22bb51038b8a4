//! Strongly-typed identifier value objects.
//!
//! Records carry two identities: a [`RecordKey`] fixed at construction, used
//! for association bookkeeping and identity comparison, and a numeric store id
//! that stays empty until the record is first persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Object identity of a record, stable from construction onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(Uuid);

impl RecordKey {
    /// Creates a new random RecordKey.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RecordKey from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordKey {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Numeric identifier assigned by a store.
pub trait StoreId:
    Copy + Eq + Ord + std::hash::Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Wraps a raw store value, rejecting non-positive ids.
    fn from_raw(value: i64) -> Result<Self, ValidationError>;

    /// The raw store value.
    fn raw(&self) -> i64;
}

/// Declares a store-assigned numeric identifier newtype.
macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a store-assigned value, rejecting non-positive ids.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::invalid_format(
                        $field,
                        format!("store ids are positive, got {}", value),
                    ));
                }
                Ok(Self(value))
            }

            /// Returns the raw numeric value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl StoreId for $name {
            fn from_raw(value: i64) -> Result<Self, ValidationError> {
                Self::new(value)
            }

            fn raw(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .parse::<i64>()
                    .map_err(|e| ValidationError::invalid_format($field, e.to_string()))?;
                Self::new(value)
            }
        }
    };
}

store_id!(
    /// Store identifier of a staff member.
    StaffMemberId,
    "staff_member_id"
);
store_id!(
    /// Store identifier of a staff role.
    StaffRoleId,
    "staff_role_id"
);
store_id!(
    /// Store identifier of a project.
    ProjectId,
    "project_id"
);
store_id!(
    /// Store identifier of an SDG role.
    SdgRoleId,
    "sdg_role_id"
);
store_id!(
    /// Store identifier of a partnership.
    PartnershipId,
    "partnership_id"
);
store_id!(
    /// Store identifier of an expenditure.
    ExpenditureId,
    "expenditure_id"
);
store_id!(
    /// Store identifier of a sampling document.
    SamplingDocumentationId,
    "sampling_documentation_id"
);
store_id!(
    /// Store identifier of reference data (organisations, SDGs, types).
    ReferenceId,
    "reference_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_generates_unique_values() {
        let k1 = RecordKey::new();
        let k2 = RecordKey::new();
        assert_ne!(k1, k2);
    }

    #[test]
    fn record_key_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let key: RecordKey = uuid_str.parse().unwrap();
        assert_eq!(key.to_string(), uuid_str);
    }

    #[test]
    fn record_key_serializes_to_json() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let key: RecordKey = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn store_id_accepts_positive_values() {
        let id = StaffMemberId::new(42).unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn store_id_rejects_zero_and_negative() {
        assert!(ProjectId::new(0).is_err());
        match SdgRoleId::new(-3) {
            Err(ValidationError::InvalidFormat { field, .. }) => assert_eq!(field, "sdg_role_id"),
            _ => panic!("Expected InvalidFormat error"),
        }
    }

    #[test]
    fn store_id_trait_round_trips_raw_value() {
        let id = ReferenceId::from_raw(11).unwrap();
        assert_eq!(id.raw(), 11);
        assert!(PartnershipId::from_raw(0).is_err());
    }

    #[test]
    fn store_id_parses_from_string() {
        let id: ExpenditureId = "7".parse().unwrap();
        assert_eq!(id.value(), 7);
        assert!("seven".parse::<ExpenditureId>().is_err());
    }

    #[test]
    fn store_id_serializes_as_number() {
        let id = StaffRoleId::new(3).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
    }
}

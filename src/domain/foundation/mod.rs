//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, value objects, error types, and the cross-cutting
//! contracts every entity builds on: association bookkeeping, allocation
//! totals, declared constraints, and the store-facing `Record` trait.

mod allocation;
mod association;
mod constraints;
mod errors;
mod ids;
mod money;
mod repository;
mod rounding;

pub use allocation::{running_total, AggregationError, Allocation, TOTAL_PERCENT_PLACES};
pub use association::{AssociationError, BackReference, LinkedSet, OwnedSet};
pub use constraints::{
    is_strict_email, nest, violations_of, AttributeValue, Constraint, ConstraintViolations,
    Rule, Validate, Violation,
};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ExpenditureId, PartnershipId, ProjectId, RecordKey, ReferenceId, SamplingDocumentationId,
    SdgRoleId, StaffMemberId, StaffRoleId, StoreId,
};
pub use money::Money;
pub use repository::{Record, Repository, UniqueKey};
pub use rounding::round_to;

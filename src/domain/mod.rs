//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, errors, associations, constraints, rounding)
//! - `staff` - Staff members and their percentage roles
//! - `project` - Projects, SDG roles, and partnerships
//! - `expenditure` - Reported expenditures
//! - `sampling` - Sampling documentation and media references
//! - `reference` - Named reference data (organisations, SDGs, ...)

pub mod expenditure;
pub mod foundation;
pub mod project;
pub mod reference;
pub mod sampling;
pub mod staff;

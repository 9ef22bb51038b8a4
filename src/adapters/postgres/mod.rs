//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresStaffMemberRepository` - Staff members with cascading roles
//! - `PostgresStaffReader` - Staff views for the public API
//!
//! The schema lives in `migrations/` and is applied with `sqlx::migrate!`.
//!
//! The server binary only reads through `PostgresStaffReader`; it exposes no
//! write routes. `PostgresStaffMemberRepository` is the write side for
//! callers embedding the library (imports, admin tooling).

mod staff_member_repository;
mod staff_reader;

pub use staff_member_repository::PostgresStaffMemberRepository;
pub use staff_reader::PostgresStaffReader;

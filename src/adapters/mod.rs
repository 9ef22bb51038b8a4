//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory store implementing every repository port
//! - `postgres` - PostgreSQL staff member repository and staff reader
//! - `http` - Axum routes for the public staff API and admin descriptors
//! - `fixtures` - Sample data loaded in dependency order

pub mod fixtures;
pub mod http;
pub mod memory;
pub mod postgres;

pub use fixtures::{default_fixtures, FixtureLoader, Repositories};
pub use http::app_router;
pub use memory::InMemoryStore;
pub use postgres::{PostgresStaffMemberRepository, PostgresStaffReader};

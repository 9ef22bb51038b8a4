//! Fixtures - named sample data loaded in dependency order.
//!
//! Each fixture saves records through the repositories and publishes their
//! keys as named references. A fixture lists the fixtures it depends on; the
//! loader orders them so references exist before they are looked up.

mod context;
mod error;
mod loader;
mod repositories;
mod sample;

pub use context::FixtureContext;
pub use error::FixtureError;
pub use loader::{Fixture, FixtureLoader};
pub use repositories::Repositories;
pub use sample::{
    default_fixtures, ExpenditureFixture, OrganisationFixture, PartnershipFixture,
    PartnershipTypeFixture, ProjectFixture, SamplingActivityFixture,
    SamplingDocumentTypeFixture, SamplingDocumentationFixture, SdgFixture, SdgRoleFixture,
    StaffMemberFixture,
};

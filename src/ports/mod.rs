//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Write Ports
//!
//! - `StaffMemberRepository` - Staff members with cascading roles
//! - `ProjectRepository` - Projects and their principal investigator
//! - `SdgRoleRepository` - SDG roles, unique per (project, sdg)
//! - `PartnershipRepository`, `ExpenditureRepository`,
//!   `SamplingDocumentationRepository`
//!
//! Reference data uses the generic `Repository` from the domain foundation.
//!
//! ## Read Ports
//!
//! - `StaffReader` - Public staff views with aggregated role percentage

mod expenditure_repository;
mod partnership_repository;
mod project_repository;
mod sampling_documentation_repository;
mod sdg_role_repository;
mod staff_member_repository;
mod staff_reader;

pub use expenditure_repository::ExpenditureRepository;
pub use partnership_repository::PartnershipRepository;
pub use project_repository::ProjectRepository;
pub use sampling_documentation_repository::SamplingDocumentationRepository;
pub use sdg_role_repository::SdgRoleRepository;
pub use staff_member_repository::StaffMemberRepository;
pub use staff_reader::{ListOptions, StaffList, StaffReader, StaffView, DEFAULT_PER_PAGE};

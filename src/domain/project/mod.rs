//! Project domain module.
//!
//! Projects, their SDG roles, and their partnerships with organisations.

mod partnership;
mod project;
mod sdg_role;

pub use partnership::Partnership;
pub use project::Project;
pub use sdg_role::{total_sdg_percent, SdgRole, PROJECT_SDG_CONSTRAINT};

//! Staff domain module.
//!
//! Staff members, their percentage roles, and the association with the
//! projects they lead as principal investigator.

mod staff_member;
mod staff_role;

pub use staff_member::{
    StaffMember, MAX_EMAIL_LENGTH, MAX_HOME_PROGRAM_LENGTH, MAX_USERNAME_LENGTH,
};
pub use staff_role::StaffRole;

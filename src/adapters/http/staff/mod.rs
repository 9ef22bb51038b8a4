//! Public staff API.

mod dto;
mod handlers;
mod routes;

pub use dto::{ListStaffQuery, StaffListResponse};
pub use handlers::{is_route_username, StaffHandlers};
pub use routes::staff_routes;

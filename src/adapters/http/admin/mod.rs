//! Admin descriptor API.

mod dto;
mod handlers;
mod routes;

pub use dto::{ActionButtonsResponse, AdminSummary};
pub use routes::admin_routes;

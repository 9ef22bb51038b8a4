//! HTTP routes for staff endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_staff, list_staff, StaffHandlers};

/// Creates the staff router, mounted under `/api/staff`.
pub fn staff_routes(handlers: StaffHandlers) -> Router {
    Router::new()
        .route("/", get(list_staff))
        .route("/:username", get(get_staff))
        .with_state(handlers)
}

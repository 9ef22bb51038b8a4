//! HTTP adapters - REST API implementations.
//!
//! - `staff` - Public staff read API under `/api/staff`
//! - `admin` - Admin presentation descriptors under `/admin`
//! - `error` - Shared error bodies and status mapping

pub mod admin;
pub mod error;
pub mod staff;

use std::sync::Arc;

use axum::Router;

use crate::ports::StaffReader;

pub use admin::admin_routes;
pub use error::{handle_domain_error, status_for, ErrorResponse};
pub use staff::{staff_routes, StaffHandlers};

/// Assembles the full API router.
pub fn app_router(reader: Arc<dyn StaffReader>) -> Router {
    Router::new()
        .nest("/api/staff", staff_routes(StaffHandlers::new(reader)))
        .nest("/admin", admin_routes())
}

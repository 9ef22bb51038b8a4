//! HTTP routes for admin descriptor endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_action_buttons, get_admin, list_admins};

/// Creates the admin router, mounted under `/admin`.
pub fn admin_routes() -> Router {
    Router::new()
        .route("/", get(list_admins))
        .route("/:entity", get(get_admin))
        .route("/:entity/buttons/:action", get(get_action_buttons))
}

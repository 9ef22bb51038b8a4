//! HTTP handlers for admin descriptor endpoints.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::admin::{self, AdminAction};

use super::dto::{ActionButtonsResponse, AdminSummary};

/// GET /admin - List admin entities with their dashboard actions
pub async fn list_admins() -> Response {
    let summaries: Vec<AdminSummary> = admin::descriptors().map(AdminSummary::from).collect();
    (StatusCode::OK, Json(summaries)).into_response()
}

/// GET /admin/:entity - Get one admin descriptor
pub async fn get_admin(Path(slug): Path<String>) -> Response {
    match admin::descriptor(&slug) {
        Some(descriptor) => (StatusCode::OK, Json(descriptor)).into_response(),
        None => unknown_admin(&slug),
    }
}

/// GET /admin/:entity/buttons/:action - Header buttons of one page
pub async fn get_action_buttons(Path((slug, action)): Path<(String, String)>) -> Response {
    let Some(descriptor) = admin::descriptor(&slug) else {
        return unknown_admin(&slug);
    };

    match action.parse::<AdminAction>() {
        Ok(action) => {
            let response = ActionButtonsResponse {
                action: action.to_string(),
                buttons: descriptor.action_buttons(action),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(message) => (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message)))
            .into_response(),
    }
}

fn unknown_admin(slug: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("Admin", slug)),
    )
        .into_response()
}

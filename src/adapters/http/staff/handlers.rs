//! HTTP handlers for staff endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_domain_error, ErrorResponse};
use crate::ports::{ListOptions, StaffReader, DEFAULT_PER_PAGE};

use super::dto::{ListStaffQuery, StaffListResponse};

/// Largest page size a client may request.
const MAX_PER_PAGE: u32 = 100;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct StaffHandlers {
    reader: Arc<dyn StaffReader>,
}

impl StaffHandlers {
    pub fn new(reader: Arc<dyn StaffReader>) -> Self {
        Self { reader }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/staff - List staff members
pub async fn list_staff(
    State(handlers): State<StaffHandlers>,
    Query(query): Query<ListStaffQuery>,
) -> Response {
    let options = match (query.page, query.per_page) {
        (None, None) => ListOptions::default(),
        (page, per_page) => ListOptions::paginated(
            page.unwrap_or(1).max(1),
            per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        ),
    };

    match handlers.reader.list(&options).await {
        Ok(list) => (StatusCode::OK, Json(StaffListResponse::from(list))).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// GET /api/staff/:username - Get one staff member
///
/// Usernames outside `[a-z]+` never match the route.
pub async fn get_staff(
    State(handlers): State<StaffHandlers>,
    Path(username): Path<String>,
) -> Response {
    if !is_route_username(&username) {
        return not_found(&username);
    }

    match handlers.reader.get_by_username(&username).await {
        Ok(Some(view)) => (StatusCode::OK, Json(view)).into_response(),
        Ok(None) => not_found(&username),
        Err(e) => handle_domain_error(e),
    }
}

fn not_found(username: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("StaffMember", username)),
    )
        .into_response()
}

/// Whether `username` matches `[a-z]+`.
pub fn is_route_username(username: &str) -> bool {
    !username.is_empty() && username.bytes().all(|b| b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_username_is_lower_case_letters_only() {
        assert!(is_route_username("jdoe"));
        assert!(!is_route_username(""));
        assert!(!is_route_username("JDoe"));
        assert!(!is_route_username("j.doe"));
        assert!(!is_route_username("jdoe2"));
    }
}

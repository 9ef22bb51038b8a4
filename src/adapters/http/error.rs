//! Error responses shared by all HTTP adapters.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let details = (!err.details.is_empty())
            .then(|| serde_json::to_value(&err.details).ok())
            .flatten();
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            details,
        }
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::RecordNotFound | ErrorCode::ReferenceNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ValidationFailed | ErrorCode::UniqueViolation => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Converts a domain error into a response. Server errors are logged and
/// their message is not exposed.
pub fn handle_domain_error(err: DomainError) -> Response {
    let status = status_for(err.code);
    if status.is_server_error() {
        error!(code = %err.code, error = %err, "request failed");
        return (status, Json(ErrorResponse::internal("Internal server error"))).into_response();
    }
    (status, Json(ErrorResponse::from(&err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_error_codes() {
        assert_eq!(status_for(ErrorCode::RecordNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(ErrorCode::UniqueViolation),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(ErrorCode::ValidationFailed),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(ErrorCode::InvalidRole),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_carries_code_and_details() {
        let err = DomainError::new(ErrorCode::UniqueViolation, "taken")
            .with_detail("constraint", "username");
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, "UNIQUE_VIOLATION");
        assert_eq!(body.details.unwrap()["constraint"], "username");
    }

    #[test]
    fn error_response_not_found_creates_correctly() {
        let error = ErrorResponse::not_found("StaffMember", "jdoe");
        assert_eq!(error.code, "NOT_FOUND");
        assert!(error.message.contains("jdoe"));
    }

    #[test]
    fn server_errors_hide_message() {
        let response =
            handle_domain_error(DomainError::new(ErrorCode::DatabaseError, "connection refused"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

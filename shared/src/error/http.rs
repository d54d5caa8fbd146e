//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use super::types::AppError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::ItemNotFound => StatusCode::NOT_FOUND,

            Self::InternalError | Self::DatabaseError | Self::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Request bodies that fail to parse are reported like any other invalid
/// payload: `400` with the unified error body
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
            .with_detail("rejectedStatus", rejection.status().as_u16())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation(rejection.body_text())
            .with_detail("rejectedStatus", rejection.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ItemNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_status() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::ReorderIncomplete.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::ReorderInvalid.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_system_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::Unknown.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

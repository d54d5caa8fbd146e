//! Client error types

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The store answered with a structured error body
    #[error("Store rejected request ({status}): {error}")]
    Api { status: u16, error: AppError },

    /// Resource not found (no structured body)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload rejected locally; no request was sent
    #[error("Validation error: {0}")]
    Validation(AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Error code carried by the store or by local validation, if any
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { error, .. } | ClientError::Validation(error) => Some(error.code),
            _ => None,
        }
    }

    /// Failed before any response arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.status().is_none())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_exposed_for_structured_errors() {
        let api = ClientError::Api {
            status: 404,
            error: AppError::item_not_found(3),
        };
        assert_eq!(api.code(), Some(ErrorCode::ItemNotFound));
        assert_eq!(api.to_string(), "Store rejected request (404): Item 3 not found");

        let local = ClientError::Validation(AppError::new(ErrorCode::ItemNameRequired));
        assert_eq!(local.code(), Some(ErrorCode::ItemNameRequired));

        assert_eq!(ClientError::Internal("boom".into()).code(), None);
    }
}

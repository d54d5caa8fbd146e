//! Unified error codes for the trabajos store and its clients
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Item (trabajo) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the wire format stays a
/// plain number for every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Item ====================
    /// Item not found
    ItemNotFound = 1001,
    /// Item name is missing or blank
    ItemNameRequired = 1002,
    /// Reorder payload does not cover the whole collection
    ReorderIncomplete = 1003,
    /// Reorder payload orders are not a permutation of 1..N
    ReorderInvalid = 1004,
    /// A form field descriptor is malformed
    FormFieldInvalid = 1005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",

            // Item
            ErrorCode::ItemNotFound => "Item not found",
            ErrorCode::ItemNameRequired => "Item name is required",
            ErrorCode::ReorderIncomplete => "Reorder must list every item exactly once",
            ErrorCode::ReorderInvalid => "Reorder orders must be a permutation of 1..N",
            ErrorCode::FormFieldInvalid => "Form field is invalid",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            7 => Ok(ErrorCode::RequiredField),

            // Item
            1001 => Ok(ErrorCode::ItemNotFound),
            1002 => Ok(ErrorCode::ItemNameRequired),
            1003 => Ok(ErrorCode::ReorderIncomplete),
            1004 => Ok(ErrorCode::ReorderInvalid),
            1005 => Ok(ErrorCode::FormFieldInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

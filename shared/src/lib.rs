//! Shared types for the trabajos store
//!
//! Wire models, the drag-and-drop reorder reducer, boundary validation and
//! the unified error types used by both the store server and its clients.

pub mod error;
pub mod models;
pub mod reorder;
pub mod util;
pub mod validation;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use models::{FieldType, FormField, Item, ItemCreate, ItemUpdate, OrderEntry};
pub use reorder::{MoveRequest, Ordered, Reorder};

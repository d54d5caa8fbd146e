//! Data models
//!
//! Shared between the store and its clients (via API).
//! All IDs are `i64` snowflakes assigned by the store.

pub mod item;

// Re-exports
pub use item::*;

//! Trabajos Client - HTTP client and optimistic sync for the item store
//!
//! - [`HttpClient`] / [`HttpItemStore`]: typed calls to the `/items` API
//! - [`ItemStore`]: the store seam (swap in a double for tests)
//! - [`SyncController`]: owns the rendered list, applies drag moves
//!   optimistically and reconciles with the store

pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod notify;
pub mod state;
pub mod store;

pub use config::ClientConfig;
pub use controller::{PersistOutcome, ReorderOutcome, SyncController};
pub use error::{ClientError, ClientResult};
pub use crate::http::HttpClient;
pub use notify::{Notification, NotificationKind, Notifier};
pub use state::ListState;
pub use store::{HttpItemStore, ItemStore};

// Re-export shared types for convenience
pub use shared::models::{Item, ItemCreate, ItemUpdate, OrderEntry};
pub use shared::reorder::MoveRequest;

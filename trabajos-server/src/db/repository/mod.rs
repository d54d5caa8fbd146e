//! Repository Module
//!
//! Free functions over `&SqlitePool`, one submodule per table.

pub mod item;

use shared::{AppError, ErrorCode};
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Request refused by a domain rule; carries the exact error to report
    #[error("{0}")]
    Rejected(AppError),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Record not found".into()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Database(format!("Corrupt JSON column: {err}"))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::ItemNotFound, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Rejected(err) => err,
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Open a transaction that takes the write lock up front
///
/// Read-then-write transactions must not start deferred: under WAL a second
/// writer would fail its upgrade with `SQLITE_BUSY` instead of waiting on
/// `busy_timeout`.
pub(crate) async fn begin_write(pool: &SqlitePool) -> RepoResult<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

//! Database Module
//!
//! Handles SQLite connection pool and migrations

pub mod repository;

use shared::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

use crate::core::config::IN_MEMORY_DATABASE;

/// Database service, owns the SQLite connection pool
#[derive(Clone, Debug)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database at `location` and apply migrations
    ///
    /// `:memory:` opens a private in-memory database held by a single
    /// connection that is never recycled.
    pub async fn new(location: &str) -> Result<Self, AppError> {
        let pool = if location == IN_MEMORY_DATABASE {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
                .foreign_keys(true);

            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
        } else {
            // Build connection options: WAL, foreign keys, normal sync
            let options = SqliteConnectOptions::from_str(&format!("sqlite:{location}"))
                .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5))
                .foreign_keys(true);

            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
        };

        tracing::info!(location = %location, "Database connection established");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Round-trip a trivial query; used by the health check
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

//! Record storage for validated South African ID numbers.
//!
//! This crate provides:
//! - Connection pool management for the embedded SQLite database
//! - Insert, exists, delete, and list operations keyed by the ID number
//! - A birth-date-ordered listing
//!
//! Candidates are validated with `said-id` before anything is written; an
//! invalid ID number never reaches the database. The storage location is an
//! explicit configuration parameter so tests and tools can point the store
//! anywhere, including `sqlite::memory:`.

mod error;
mod record;
mod store;

pub use error::StoreError;
pub use record::IdRecord;
pub use store::RecordStore;

use std::time::Duration;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database connection URL.
    pub database_url: String,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Connection acquire timeout.
    pub acquire_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://sa_id_records.db?mode=rwc".to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database_url = std::env::var("SAID_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://sa_id_records.db?mode=rwc".to_string());

        let max_connections = std::env::var("SAID_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Self {
            database_url,
            max_connections,
            ..Default::default()
        }
    }
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database, creating the records table if it does not exist.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        info!(url = %config.database_url, "Opening record database");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await
            .map_err(StoreError::Connect)?;

        let db = Self { pool };
        db.init_schema().await?;

        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sa_id_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                id_number TEXT UNIQUE NOT NULL,
                birth_date TEXT NOT NULL,
                gender TEXT NOT NULL,
                citizenship TEXT NOT NULL,
                date_added TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        info!("Record table ready");
        Ok(())
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check if the database is reachable.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(())
    }

    /// Get a record store handle.
    pub fn records(&self) -> RecordStore {
        RecordStore::new(self.pool.clone())
    }
}

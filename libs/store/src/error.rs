//! Store error types.

use said_id::ValidationError;
use thiserror::Error;

/// Record store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to open the database.
    #[error("failed to open record database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Failed to execute a query.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// The ID number is already registered.
    #[error("ID number {0} is already registered")]
    Duplicate(String),

    /// The candidate failed validation and was not stored.
    #[error("invalid ID number: {0}")]
    InvalidId(#[from] ValidationError),
}

impl StoreError {
    /// Returns true if the operation hit an already-registered ID number.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate(_))
    }
}

//! Custom error types for the common library
//!
//! This module defines the persistence error type shared by every store
//! implementation and surfaced by the services as a store failure.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A unique constraint was violated
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    /// A referenced record does not exist
    #[error("Referenced record missing: {0}")]
    MissingReference(String),

    /// A stored record could not be decoded into a model
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl DatabaseError {
    /// Classify a write failure, separating constraint violations from the rest
    pub fn from_query(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return DatabaseError::Conflict(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return DatabaseError::MissingReference(constraint);
            }
        }
        DatabaseError::Query(err)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

//! # Journal Errors
//!
//! Every way the draft journal can fail. None of these stop a user from
//! editing: the session reports them next to the save failure that caused
//! the journaling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The journal file could not be opened or created.
    ///
    /// ## When This Occurs
    /// - The data directory is missing or not writable
    #[error("Could not open draft journal: {0}")]
    Open(String),

    /// The journal schema could not be brought up to date.
    #[error("Draft journal schema error: {0}")]
    Migration(String),

    /// Another `po` process held the journal longer than the busy timeout.
    #[error("Draft journal is locked by another process")]
    Busy,

    /// A statement against the journal failed.
    #[error("Draft journal query failed: {0}")]
    Query(String),

    /// A journaled draft could not be encoded or decoded.
    #[error("Draft payload error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DbError::Busy,
            sqlx::Error::Database(db_err) if db_err.message().contains("locked") => DbError::Busy,
            sqlx::Error::Database(db_err) => DbError::Query(db_err.message().to_string()),
            other => DbError::Query(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

//! # Journal Connection
//!
//! Opens the draft journal and brings its schema up to date.
//!
//! ```text
//!  DbConfig::new(<data dir>/drafts.db)        DbConfig::in_memory()
//!               │                                      │
//!               └──────────────────┬───────────────────┘
//!                                  ▼
//!                       Database::new(config)
//!                       ├── one SQLite connection
//!                       └── local_drafts schema applied
//!                                  │
//!                                  ▼
//!                       db.drafts() → DraftRepository
//! ```
//!
//! A `po` invocation runs a handful of statements and exits, so one
//! connection is enough. Two invocations may touch the same file at once
//! (a save journaling while `po drafts list` reads); the file runs in WAL
//! mode and a writer waits up to `busy_timeout` for the other's lock.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::draft::DraftRepository;

/// How long a statement waits on another process's lock.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Configuration
// =============================================================================

/// Where the journal lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalLocation {
    /// A database file; created on first use, its directory must exist.
    File(PathBuf),

    /// Discarded when the [`Database`] is dropped. For tests.
    InMemory,
}

impl fmt::Display for JournalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalLocation::File(path) => write!(f, "{}", path.display()),
            JournalLocation::InMemory => f.write_str(":memory:"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: JournalLocation,
    pub busy_timeout: Duration,
}

impl DbConfig {
    /// A journal stored in `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: JournalLocation::File(path.into()),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn in_memory() -> Self {
        DbConfig {
            location: JournalLocation::InMemory,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            JournalLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
            JournalLocation::InMemory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::Open(e.to_string()))?,
        };
        Ok(options.busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// An open draft journal.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the journal and applies pending schema changes.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            // an in-memory journal lives exactly as long as its connection
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(config.busy_timeout)
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::Open(e.to_string()))?;

        migrations::migrate(&pool).await?;

        info!(location = %config.location, "Draft journal ready");
        Ok(Database { pool })
    }

    /// The journal's only table.
    pub fn drafts(&self) -> DraftRepository {
        DraftRepository::new(self.pool.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

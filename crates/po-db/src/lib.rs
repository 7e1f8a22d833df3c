//! # po-db: Local Draft Journal for Purchase Order Desk
//!
//! This crate keeps order drafts that have not reached the backend yet.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Purchase Order Desk Data Flow                         │
//! │                                                                         │
//! │  EditorSession::save() ──► backend down / rejected                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     po-db (THIS CRATE)                          │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (draft.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ 1 connection  │◄───│ DraftRepo     │    │ 001_local_   │  │   │
//! │  │   │ WAL, busy wait│    │ stash / list  │    │   drafts.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/drafts.db                                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Opening the journal (file or in-memory)
//! - `migrations` - Embedded schema, applied on open
//! - [`error`] - Journal error types
//! - [`repository`] - The draft journal repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use po_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("drafts.db")).await?;
//! db.drafts().stash("PO/24/001", &draft, "backend unavailable").await?;
//! let pending = db.drafts().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, JournalLocation};
pub use repository::draft::{DraftRepository, LocalDraft};

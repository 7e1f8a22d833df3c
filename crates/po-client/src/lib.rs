//! # po-client: Order Backend Client for Purchase Order Desk
//!
//! This crate connects the purchase order form to the order backend and
//! keeps drafts safe when the backend is not there.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Client Architecture                             │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 EditorSession (form state machine)               │  │
//! │  │                                                                  │  │
//! │  │  New / View / Edit modes over an immutable OrderDraft            │  │
//! │  │  edit() · begin_edit() · cancel() · save() · open() · delete()   │  │
//! │  └───────────────┬───────────────────────────────┬──────────────────┘  │
//! │                  │                               │ failed save          │
//! │                  ▼                               ▼                      │
//! │  ┌────────────────────────────┐   ┌──────────────────────────────────┐ │
//! │  │ dyn OrderStore             │   │ po_db::DraftRepository           │ │
//! │  │                            │   │                                  │ │
//! │  │ HttpOrderStore (reqwest)   │   │ SQLite journal of unsaved        │ │
//! │  │ GET/POST/PUT/DELETE        │   │ drafts, keyed by PO number       │ │
//! │  │ /api/orders, no retries    │   │                                  │ │
//! │  └────────────────────────────┘   └──────────────────────────────────┘ │
//! │                                                                         │
//! │  ClientConfig: po.toml + PO_* environment overrides                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - API URL, timeout, journal path, company letterhead
//! - [`error`] - Store, session and config error types
//! - [`session`] - `EditorSession`, confirmations and notifications
//! - [`store`] - `OrderStore` trait and its HTTP implementation
//!
//! ## Usage Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use po_client::{ClientConfig, EditorSession, HttpOrderStore};
//! use po_db::{Database, DbConfig};
//!
//! let config = ClientConfig::load(None)?;
//! let store = Arc::new(HttpOrderStore::from_config(&config)?);
//! let db = Database::new(DbConfig::new(config.journal_path())).await?;
//!
//! let mut session = EditorSession::new(store, db.drafts());
//! session.open("PO/24/001").await?;
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ClientConfig;
pub use error::{ConfigError, SessionError, SessionResult, StoreError, StoreResult};
pub use session::{Confirmation, EditMode, EditorSession, Notification, NotificationLevel};
pub use store::{HttpOrderStore, OrderStore};

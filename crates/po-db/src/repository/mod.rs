//! # Repository Module
//!
//! Database repository implementations for Purchase Order Desk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  EditorSession / po CLI                                                │
//! │       │                                                                 │
//! │       │  db.drafts().stash(key, &draft, reason)                        │
//! │       ▼                                                                 │
//! │  DraftRepository                                                       │
//! │  ├── stash(&self, key, draft, reason)                                  │
//! │  ├── get(&self, key)                                                   │
//! │  ├── list(&self)                                                       │
//! │  ├── discard(&self, key)                                               │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (local_drafts)                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`draft::DraftRepository`] - Unsaved order drafts

pub mod draft;

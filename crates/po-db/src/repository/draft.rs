//! # Draft Repository
//!
//! The local journal of orders that have not reached the backend.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  save() fails ──► stash(key, draft, reason)                            │
//! │                      │                                                  │
//! │                      ├── new key      → INSERT (attempts = 1)          │
//! │                      └── existing key → UPDATE (attempts + 1)          │
//! │                                                                         │
//! │  po drafts list ──► list()   most recent first                         │
//! │  po drafts show ──► get(key) → LocalDraft::to_draft()                  │
//! │  save() succeeds ─► discard(key)                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The key is the PO number when the user typed one, otherwise a UUID
//! (see [`DraftRepository::key_for`]).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use po_core::{OrderDraft, PurchaseOrderPayload};

// =============================================================================
// Local Draft Row
// =============================================================================

/// One journaled draft.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct LocalDraft {
    pub draft_key: String,
    pub po_no: String,
    pub party_name: String,
    /// Net amount at the time of stashing, for listing only.
    pub net_amount: f64,
    /// The order in backend JSON shape.
    pub payload: String,
    /// Why the draft was journaled (the save error).
    pub reason: String,
    /// How many times a save of this key has been journaled.
    pub attempts: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocalDraft {
    /// Decodes the stored payload back into an editable draft.
    ///
    /// Totals are recomputed; the stored net amount is not trusted.
    pub fn to_draft(&self) -> DbResult<OrderDraft> {
        let payload: PurchaseOrderPayload = serde_json::from_str(&self.payload)?;
        Ok(payload.into_draft())
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the local draft journal.
#[derive(Debug, Clone)]
pub struct DraftRepository {
    pool: SqlitePool,
}

impl DraftRepository {
    /// Creates a new DraftRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DraftRepository { pool }
    }

    /// Journal key for a draft: its PO number, or a fresh UUID.
    pub fn key_for(draft: &OrderDraft) -> String {
        let po_no = draft.header().po_no.trim();
        if po_no.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            po_no.to_string()
        }
    }

    /// Inserts or replaces the draft stored under `key`.
    pub async fn stash(&self, key: &str, draft: &OrderDraft, reason: &str) -> DbResult<LocalDraft> {
        let now = Utc::now();
        let payload = serde_json::to_string(&PurchaseOrderPayload::from_draft(draft))?;
        let header = draft.header();

        debug!(key = %key, reason = %reason, "Stashing draft");

        let stored = sqlx::query_as::<_, LocalDraft>(
            r#"
            INSERT INTO local_drafts (
                draft_key, po_no, party_name, net_amount, payload,
                reason, attempts, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)
            ON CONFLICT (draft_key) DO UPDATE SET
                po_no = excluded.po_no,
                party_name = excluded.party_name,
                net_amount = excluded.net_amount,
                payload = excluded.payload,
                reason = excluded.reason,
                attempts = local_drafts.attempts + 1,
                updated_at = excluded.updated_at
            RETURNING
                draft_key, po_no, party_name, net_amount, payload,
                reason, attempts, created_at, updated_at
            "#,
        )
        .bind(key)
        .bind(&header.po_no)
        .bind(&header.party_name)
        .bind(draft.totals().net_amount)
        .bind(&payload)
        .bind(reason)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Gets a draft by key.
    pub async fn get(&self, key: &str) -> DbResult<Option<LocalDraft>> {
        let draft = sqlx::query_as::<_, LocalDraft>(
            r#"
            SELECT
                draft_key, po_no, party_name, net_amount, payload,
                reason, attempts, created_at, updated_at
            FROM local_drafts
            WHERE draft_key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(draft)
    }

    /// Lists every journaled draft, most recently updated first.
    pub async fn list(&self) -> DbResult<Vec<LocalDraft>> {
        let drafts = sqlx::query_as::<_, LocalDraft>(
            r#"
            SELECT
                draft_key, po_no, party_name, net_amount, payload,
                reason, attempts, created_at, updated_at
            FROM local_drafts
            ORDER BY updated_at DESC, draft_key ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = drafts.len(), "Listed drafts");
        Ok(drafts)
    }

    /// Removes a draft. Returns `false` if the key was not journaled.
    pub async fn discard(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM local_drafts WHERE draft_key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, removed = result.rows_affected(), "Discarded draft");
        Ok(result.rows_affected() > 0)
    }

    /// Counts journaled drafts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM local_drafts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, DbError};
    use po_core::{HeaderField, LineField};

    async fn repo() -> DraftRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().drafts()
    }

    fn draft(po_no: &str) -> OrderDraft {
        OrderDraft::new()
            .with_header(HeaderField::PoNo(po_no.to_string()))
            .with_header(HeaderField::PartyName("Acme Polymers".to_string()))
            .with_row_added()
            .with_cell(0, LineField::Quantity(2.0))
            .unwrap()
            .with_cell(0, LineField::Rate(100.0))
            .unwrap()
    }

    #[tokio::test]
    async fn test_stash_and_get() {
        let repo = repo().await;
        let stored = repo
            .stash("PO/1", &draft("PO/1"), "backend unavailable")
            .await
            .unwrap();

        assert_eq!(stored.draft_key, "PO/1");
        assert_eq!(stored.party_name, "Acme Polymers");
        assert_eq!(stored.net_amount, 236.0);
        assert_eq!(stored.attempts, 1);

        let restored = repo.get("PO/1").await.unwrap().unwrap().to_draft().unwrap();
        assert_eq!(restored.totals(), draft("PO/1").totals());
        assert_eq!(restored.header(), draft("PO/1").header());
    }

    #[tokio::test]
    async fn test_stash_same_key_upserts() {
        let repo = repo().await;
        repo.stash("PO/1", &draft("PO/1"), "first").await.unwrap();

        let edited = draft("PO/1").with_cell(0, LineField::Quantity(3.0)).unwrap();
        let stored = repo.stash("PO/1", &edited, "second").await.unwrap();

        assert_eq!(stored.attempts, 2);
        assert_eq!(stored.reason, "second");
        assert_eq!(stored.net_amount, 354.0);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let repo = repo().await;
        repo.stash("A", &draft("A"), "x").await.unwrap();
        repo.stash("B", &draft("B"), "x").await.unwrap();
        repo.stash("A", &draft("A"), "again").await.unwrap();

        let keys: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.draft_key)
            .collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_discard() {
        let repo = repo().await;
        repo.stash("PO/1", &draft("PO/1"), "x").await.unwrap();

        assert!(repo.discard("PO/1").await.unwrap());
        assert!(!repo.discard("PO/1").await.unwrap());
        assert!(repo.get("PO/1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_serialization_error() {
        let repo = repo().await;
        let mut stored = repo.stash("PO/1", &draft("PO/1"), "x").await.unwrap();
        stored.payload = "not json".to_string();
        assert!(matches!(stored.to_draft(), Err(DbError::Serialization(_))));
    }

    #[test]
    fn test_key_for() {
        assert_eq!(DraftRepository::key_for(&draft("PO/9")), "PO/9");

        let key = DraftRepository::key_for(&OrderDraft::new());
        assert!(Uuid::parse_str(&key).is_ok());
    }
}

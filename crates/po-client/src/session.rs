//! # Editor Session
//!
//! The order form as a state machine: one draft, one mode, and the
//! operations a user triggers from the toolbar.
//!
//! ## Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            save() ok                         begin_edit()               │
//! │   ┌─────┐ ─────────────► ┌──────────────┐ ─────────────► ┌───────────┐ │
//! │   │ New │                │ View{po_no}  │                │ Edit{..}  │ │
//! │   └─────┘ ◄───────────── └──────────────┘ ◄───────────── └───────────┘ │
//! │      ▲     delete() ok          ▲   │        save() ok /       │        │
//! │      │                          │   │        cancel(✓)         │        │
//! │      └── cancel(✓) resets       └───┘ open(po_no)              │        │
//! │                                                                 │        │
//! │  edit() is refused in View. Failed saves keep the mode and the │        │
//! │  draft, and journal the draft locally.                         ▼        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Local;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{SessionError, SessionResult, StoreError};
use crate::store::OrderStore;
use po_core::validation::{quantity_warnings, validate_for_save, validate_for_update};
use po_core::{
    CoreResult, HeaderField, OrderDraft, OrderHistory, OrderSummary, PurchaseOrderPayload,
};
use po_db::DraftRepository;

// =============================================================================
// Mode, Confirmation, Notification
// =============================================================================

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum EditMode {
    /// Unsaved order; save creates it.
    New,

    /// A stored order, read-only.
    View { po_no: String },

    /// A stored order being changed; `original` is restored on cancel.
    Edit { po_no: String, original: OrderDraft },
}

impl EditMode {
    /// The stored order's identifier, if any.
    pub fn po_no(&self) -> Option<&str> {
        match self {
            EditMode::New => None,
            EditMode::View { po_no } | EditMode::Edit { po_no, .. } => Some(po_no),
        }
    }
}

/// Proof that the user agreed to a destructive action.
///
/// Operations that take an `Option<Confirmation>` refuse to act on `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation(());

impl Confirmation {
    /// The user said yes.
    pub fn yes() -> Self {
        Confirmation(())
    }

    /// Maps a yes/no answer to an optional confirmation.
    pub fn from_answer(confirmed: bool) -> Option<Self> {
        confirmed.then(Self::yes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Failure,
    Warning,
}

/// What the front end shows after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Failure, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Notification {
            level,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// =============================================================================
// Editor Session
// =============================================================================

/// One order form bound to a backend and a local journal.
pub struct EditorSession {
    store: Arc<dyn OrderStore>,
    journal: DraftRepository,
    draft: OrderDraft,
    mode: EditMode,
    /// Audit trail and GRN records of the opened order; read-only.
    history: OrderHistory,
    /// Journal key the current draft was stashed under, if it was.
    journal_key: Option<String>,
}

impl EditorSession {
    /// Starts with a fresh draft in `New` mode.
    pub fn new(store: Arc<dyn OrderStore>, journal: DraftRepository) -> Self {
        EditorSession {
            store,
            journal,
            draft: fresh_draft(),
            mode: EditMode::New,
            history: OrderHistory::default(),
            journal_key: None,
        }
    }

    /// Starts in `New` mode with an existing draft, e.g. one read from a file
    /// or recovered from the journal under `journal_key`.
    pub fn with_draft(mut self, draft: OrderDraft, journal_key: Option<String>) -> Self {
        self.draft = draft;
        self.mode = EditMode::New;
        self.history = OrderHistory::default();
        self.journal_key = journal_key;
        self
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    /// Backend history of the order on screen; empty for a new order.
    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.mode, EditMode::View { .. })
    }

    /// Non-blocking remarks about the current draft (negative quantities).
    pub fn warnings(&self) -> Vec<Notification> {
        quantity_warnings(&self.draft)
            .into_iter()
            .map(Notification::warning)
            .collect()
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Applies one edit to the draft. Totals are recomputed by the draft.
    ///
    /// ## Example
    /// ```rust,ignore
    /// session.edit(|d| d.with_cell(0, LineField::Quantity(2.0)))?;
    /// session.edit(|d| Ok(d.with_header(HeaderField::AddLess(-5.0))))?;
    /// ```
    pub fn edit<F>(&mut self, f: F) -> SessionResult<&OrderDraft>
    where
        F: FnOnce(&OrderDraft) -> CoreResult<OrderDraft>,
    {
        if let EditMode::View { po_no } = &self.mode {
            return Err(SessionError::ReadOnly {
                po_no: po_no.clone(),
            });
        }

        self.draft = f(&self.draft)?;
        Ok(&self.draft)
    }

    /// View → Edit, remembering the current draft for [`cancel`](Self::cancel).
    pub fn begin_edit(&mut self) -> SessionResult<()> {
        match &self.mode {
            EditMode::View { po_no } => {
                debug!(po_no = %po_no, "Entering edit mode");
                self.mode = EditMode::Edit {
                    po_no: po_no.clone(),
                    original: self.draft.clone(),
                };
                Ok(())
            }
            EditMode::Edit { .. } => Ok(()),
            EditMode::New => Err(SessionError::NothingOpen),
        }
    }

    /// Discards unsaved changes.
    ///
    /// Edit returns to View with the snapshot taken by `begin_edit`; New
    /// starts over with an empty draft.
    pub fn cancel(&mut self, confirmation: Option<Confirmation>) -> SessionResult<Notification> {
        if confirmation.is_none() {
            return Err(SessionError::ConfirmationRequired("Cancel"));
        }

        match std::mem::replace(&mut self.mode, EditMode::New) {
            EditMode::Edit { po_no, original } => {
                self.draft = original;
                self.mode = EditMode::View { po_no };
                Ok(Notification::success("Changes discarded"))
            }
            EditMode::New => {
                self.draft = fresh_draft();
                self.history = OrderHistory::default();
                self.journal_key = None;
                Ok(Notification::success("Form cleared"))
            }
            view @ EditMode::View { .. } => {
                self.mode = view;
                Ok(Notification::warning("Nothing to cancel"))
            }
        }
    }

    // =========================================================================
    // Backend Operations
    // =========================================================================

    /// Validates and submits the draft.
    ///
    /// Backend failures are not errors: the draft stays as it is, is
    /// journaled locally, and a failure notification is returned.
    pub async fn save(&mut self) -> SessionResult<Notification> {
        if let EditMode::View { po_no } = &self.mode {
            return Err(SessionError::ReadOnly {
                po_no: po_no.clone(),
            });
        }

        let problems = match &self.mode {
            EditMode::Edit { po_no, .. } => validate_for_update(&self.draft, po_no),
            _ => validate_for_save(&self.draft),
        };
        if !problems.is_empty() {
            return Err(SessionError::Invalid(problems));
        }

        let result = match &self.mode {
            EditMode::Edit { po_no, .. } => {
                let payload = PurchaseOrderPayload::for_update(&self.draft, po_no);
                self.store.update(&payload).await
            }
            _ => {
                let payload = PurchaseOrderPayload::from_draft(&self.draft);
                self.store.create(&payload).await
            }
        };

        match result {
            Ok(reply) => {
                let confirmed_po = match &self.mode {
                    EditMode::Edit { po_no, .. } => po_no.clone(),
                    _ => reply.confirmed_po.clone(),
                };
                info!(po_no = %confirmed_po, "Order saved");

                self.draft = self
                    .draft
                    .with_header(HeaderField::PoNo(confirmed_po.clone()));
                self.mode = EditMode::View {
                    po_no: confirmed_po.clone(),
                };
                self.forget_journaled(&confirmed_po).await;

                let message = if reply.message.is_empty() {
                    format!("Order {} saved", confirmed_po)
                } else {
                    format!("{} (PO: {})", reply.message, confirmed_po)
                };
                Ok(Notification::success(message))
            }
            Err(err) => Ok(self.journal_failed_save(&err).await),
        }
    }

    /// Loads a stored order into View mode.
    pub async fn open(&mut self, po_no: &str) -> SessionResult<&OrderDraft> {
        let order = self
            .store
            .get(po_no)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                po_no: po_no.to_string(),
            })?;

        debug!(po_no = %po_no, items = order.items.len(), "Opened order");
        self.history = order.history();
        self.draft = order.into_draft();
        self.mode = EditMode::View {
            po_no: po_no.to_string(),
        };
        self.journal_key = None;
        Ok(&self.draft)
    }

    /// Deletes a stored order. No request is sent without a confirmation.
    ///
    /// If the deleted order is the one on screen, the form resets to New.
    /// A backend failure leaves the form as it is and comes back as a
    /// failure notification, like a failed save.
    pub async fn delete(
        &mut self,
        po_no: &str,
        confirmation: Option<Confirmation>,
    ) -> SessionResult<Notification> {
        if confirmation.is_none() {
            return Err(SessionError::ConfirmationRequired("Delete"));
        }

        let reply = match self.store.delete(po_no).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(po_no = %po_no, error = %err, "Delete failed");
                return Ok(Notification::failure(format!("Failed to delete: {}", err)));
            }
        };
        if !reply.success {
            return Ok(Notification::failure(format!(
                "Failed to delete: {}",
                reply.message
            )));
        }

        info!(po_no = %po_no, "Order deleted");
        if self.mode.po_no() == Some(po_no) {
            self.draft = fresh_draft();
            self.mode = EditMode::New;
            self.history = OrderHistory::default();
            self.journal_key = None;
        }

        let message = if reply.message.is_empty() {
            format!("Order {} deleted", po_no)
        } else {
            reply.message
        };
        Ok(Notification::success(message))
    }

    /// Summaries of every stored order. There is no form state to keep
    /// here, so a backend failure is returned as an error.
    pub async fn list(&self) -> SessionResult<Vec<OrderSummary>> {
        let orders = self.store.list().await?;
        Ok(orders.iter().map(OrderSummary::from).collect())
    }

    // =========================================================================
    // Journal
    // =========================================================================

    async fn journal_failed_save(&mut self, err: &StoreError) -> Notification {
        error!(error = %err, "Save failed");

        let key = self.journal_key.clone().unwrap_or_else(|| match &self.mode {
            EditMode::Edit { po_no, .. } => po_no.clone(),
            _ => DraftRepository::key_for(&self.draft),
        });

        match self.journal.stash(&key, &self.draft, &err.to_string()).await {
            Ok(stored) => {
                self.journal_key = Some(key.clone());
                Notification::failure(format!(
                    "Failed to save order: {}. Draft kept locally as '{}' (attempt {})",
                    err, key, stored.attempts
                ))
            }
            Err(db_err) => {
                warn!(error = %db_err, "Could not journal draft");
                Notification::failure(format!(
                    "Failed to save order: {}. The draft could not be kept locally: {}",
                    err, db_err
                ))
            }
        }
    }

    async fn forget_journaled(&mut self, confirmed_po: &str) {
        let mut keys: Vec<String> = self.journal_key.take().into_iter().collect();
        if !keys.iter().any(|k| k == confirmed_po) {
            keys.push(confirmed_po.to_string());
        }

        for key in keys {
            if let Err(err) = self.journal.discard(&key).await {
                warn!(key = %key, error = %err, "Could not discard journaled draft");
            }
        }
    }
}

/// An empty order dated today.
fn fresh_draft() -> OrderDraft {
    OrderDraft::new().with_header(HeaderField::Date(
        Local::now().date_naive().format("%Y-%m-%d").to_string(),
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreResult;
    use async_trait::async_trait;
    use po_core::{ConfirmResponse, DeleteResponse, LineField};
    use po_db::{Database, DbConfig};
    use std::sync::Mutex;

    /// In-memory backend that records every request.
    #[derive(Default)]
    struct FakeStore {
        orders: Mutex<Vec<PurchaseOrderPayload>>,
        calls: Mutex<Vec<String>>,
        offline: bool,
    }

    impl FakeStore {
        fn offline() -> Self {
            FakeStore {
                offline: true,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> StoreResult<()> {
            self.calls.lock().unwrap().push(call);
            if self.offline {
                Err(StoreError::Unavailable("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl OrderStore for FakeStore {
        async fn create(&self, order: &PurchaseOrderPayload) -> StoreResult<ConfirmResponse> {
            self.record(format!("create {}", order.po_no()))?;
            self.orders.lock().unwrap().push(order.clone());
            Ok(ConfirmResponse {
                confirmed_po: order.po_no().to_string(),
                message: "Order saved successfully".into(),
            })
        }

        async fn update(&self, order: &PurchaseOrderPayload) -> StoreResult<ConfirmResponse> {
            self.record(format!("update {}", order.po_no()))?;
            let mut orders = self.orders.lock().unwrap();
            match orders.iter_mut().find(|o| o.po_no() == order.po_no()) {
                Some(stored) => *stored = order.clone(),
                None => {
                    return Err(StoreError::NotFound {
                        po_no: order.po_no().to_string(),
                    })
                }
            }
            Ok(ConfirmResponse {
                confirmed_po: order.po_no().to_string(),
                message: "Order updated successfully".into(),
            })
        }

        async fn list(&self) -> StoreResult<Vec<PurchaseOrderPayload>> {
            self.record("list".into())?;
            Ok(self.orders.lock().unwrap().clone())
        }

        async fn delete(&self, po_no: &str) -> StoreResult<DeleteResponse> {
            self.record(format!("delete {}", po_no))?;
            let mut orders = self.orders.lock().unwrap();
            let before = orders.len();
            orders.retain(|o| o.po_no() != po_no);
            Ok(if orders.len() < before {
                DeleteResponse {
                    success: true,
                    message: format!("Order {} deleted successfully", po_no),
                }
            } else {
                DeleteResponse {
                    success: false,
                    message: format!("Order {} not found", po_no),
                }
            })
        }
    }

    async fn session_with(store: Arc<FakeStore>) -> (EditorSession, DraftRepository) {
        let journal = Database::new(DbConfig::in_memory()).await.unwrap().drafts();
        (EditorSession::new(store, journal.clone()), journal)
    }

    fn fill(session: &mut EditorSession, po_no: &str) {
        session
            .edit(|d| {
                Ok(d.with_header(HeaderField::PoNo(po_no.to_string()))
                    .with_header(HeaderField::PartyName("Acme Polymers".to_string()))
                    .with_header(HeaderField::Date("2024-04-01".to_string())))
            })
            .unwrap();
        session
            .edit(|d| d.with_row_added().with_cell(0, LineField::Quantity(2.0)))
            .unwrap();
        session
            .edit(|d| d.with_cell(0, LineField::Rate(100.0)))
            .unwrap();
    }

    #[tokio::test]
    async fn test_new_session_is_empty_and_dated() {
        let (session, _) = session_with(Arc::new(FakeStore::default())).await;
        assert_eq!(session.mode(), &EditMode::New);
        assert!(session.draft().items().is_empty());
        assert_eq!(session.draft().header().date.len(), 10);
    }

    #[tokio::test]
    async fn test_save_new_order_moves_to_view() {
        let store = Arc::new(FakeStore::default());
        let (mut session, _) = session_with(store.clone()).await;
        fill(&mut session, "PO/1");

        let note = session.save().await.unwrap();
        assert!(note.is_success());
        assert!(note.message.contains("PO/1"));
        assert_eq!(
            session.mode(),
            &EditMode::View {
                po_no: "PO/1".into()
            }
        );
        assert_eq!(store.calls(), vec!["create PO/1"]);
    }

    #[tokio::test]
    async fn test_view_mode_is_read_only() {
        let store = Arc::new(FakeStore::default());
        let (mut session, _) = session_with(store).await;
        fill(&mut session, "PO/1");
        session.save().await.unwrap();

        let err = session
            .edit(|d| d.with_cell(0, LineField::Quantity(5.0)))
            .unwrap_err();
        assert!(matches!(err, SessionError::ReadOnly { .. }));
        assert!(matches!(
            session.save().await,
            Err(SessionError::ReadOnly { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_forces_original_po_no() {
        let store = Arc::new(FakeStore::default());
        let (mut session, _) = session_with(store.clone()).await;
        fill(&mut session, "PO/1");
        session.save().await.unwrap();

        session.begin_edit().unwrap();
        session
            .edit(|d| Ok(d.with_header(HeaderField::PoNo("RENAMED".into()))))
            .unwrap();
        session
            .edit(|d| d.with_cell(0, LineField::Quantity(3.0)))
            .unwrap();

        let note = session.save().await.unwrap();
        assert!(note.is_success());
        assert_eq!(store.calls(), vec!["create PO/1", "update PO/1"]);
        assert_eq!(session.draft().header().po_no, "PO/1");

        let stored = store.orders.lock().unwrap()[0].clone();
        assert_eq!(stored.po_no(), "PO/1");
        assert_eq!(stored.net_amount, 354.0);
    }

    fn stored_order(po_no: &str) -> PurchaseOrderPayload {
        let draft = OrderDraft::new()
            .with_header(HeaderField::PoNo(po_no.to_string()))
            .with_header(HeaderField::PartyName("Acme Polymers".to_string()))
            .with_header(HeaderField::Date("2024-04-01".to_string()))
            .with_row_added()
            .with_cell(0, LineField::Quantity(2.0))
            .unwrap()
            .with_cell(0, LineField::Rate(100.0))
            .unwrap();
        PurchaseOrderPayload::from_draft(&draft)
    }

    #[tokio::test]
    async fn test_update_accepts_legacy_po_no() {
        let store = Arc::new(FakeStore::default());
        store.orders.lock().unwrap().push(stored_order("PO 7"));
        let (mut session, _) = session_with(store.clone()).await;

        session.open("PO 7").await.unwrap();
        session.begin_edit().unwrap();
        session
            .edit(|d| d.with_cell(0, LineField::Quantity(3.0)))
            .unwrap();

        let note = session.save().await.unwrap();
        assert!(note.is_success());
        assert_eq!(store.calls(), vec!["list", "update PO 7"]);
        assert_eq!(store.orders.lock().unwrap()[0].net_amount, 354.0);
    }

    #[tokio::test]
    async fn test_update_with_blanked_po_field_uses_original() {
        let store = Arc::new(FakeStore::default());
        store.orders.lock().unwrap().push(stored_order("PO/8"));
        let (mut session, _) = session_with(store.clone()).await;

        session.open("PO/8").await.unwrap();
        session.begin_edit().unwrap();
        session
            .edit(|d| Ok(d.with_header(HeaderField::PoNo(String::new()))))
            .unwrap();

        assert!(session.save().await.unwrap().is_success());
        assert_eq!(store.calls(), vec!["list", "update PO/8"]);
        assert_eq!(session.draft().header().po_no, "PO/8");
    }

    #[tokio::test]
    async fn test_cancel_edit_restores_snapshot() {
        let store = Arc::new(FakeStore::default());
        let (mut session, _) = session_with(store).await;
        fill(&mut session, "PO/1");
        session.save().await.unwrap();
        let saved = session.draft().clone();

        session.begin_edit().unwrap();
        session
            .edit(|d| d.with_cell(0, LineField::Rate(999.0)))
            .unwrap();

        assert!(matches!(
            session.cancel(None),
            Err(SessionError::ConfirmationRequired(_))
        ));
        assert_ne!(session.draft(), &saved);

        session.cancel(Some(Confirmation::yes())).unwrap();
        assert_eq!(session.draft(), &saved);
        assert!(session.is_read_only());
    }

    #[tokio::test]
    async fn test_cancel_new_clears_form() {
        let (mut session, _) = session_with(Arc::new(FakeStore::default())).await;
        fill(&mut session, "PO/1");

        session.cancel(Confirmation::from_answer(true)).unwrap();
        assert!(session.draft().items().is_empty());
        assert_eq!(session.draft().totals().net_amount, 0.0);
    }

    #[tokio::test]
    async fn test_begin_edit_needs_open_order() {
        let (mut session, _) = session_with(Arc::new(FakeStore::default())).await;
        assert!(matches!(session.begin_edit(), Err(SessionError::NothingOpen)));
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let store = Arc::new(FakeStore::default());
        let (mut session, _) = session_with(store.clone()).await;

        let err = session.save().await.unwrap_err();
        assert!(matches!(err, SessionError::Invalid(ref problems) if !problems.is_empty()));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft_and_journals_it() {
        let store = Arc::new(FakeStore::offline());
        let (mut session, journal) = session_with(store).await;
        fill(&mut session, "PO/1");
        let before = session.draft().clone();

        let note = session.save().await.unwrap();
        assert_eq!(note.level, NotificationLevel::Failure);
        assert!(note.message.contains("Backend unavailable"));
        assert_eq!(session.draft(), &before);
        assert_eq!(session.mode(), &EditMode::New);

        let stashed = journal.get("PO/1").await.unwrap().unwrap();
        assert_eq!(stashed.net_amount, 236.0);
        assert_eq!(stashed.to_draft().unwrap().totals(), before.totals());

        session.save().await.unwrap();
        assert_eq!(journal.get("PO/1").await.unwrap().unwrap().attempts, 2);
        assert_eq!(journal.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_successful_save_discards_journaled_draft() {
        let store = Arc::new(FakeStore::default());
        let (mut session, journal) = session_with(store).await;
        fill(&mut session, "PO/1");
        let recovered = session.draft().clone();
        journal.stash("DRAFT-7", &recovered, "offline").await.unwrap();
        journal.stash("PO/1", &recovered, "offline").await.unwrap();

        let mut session = session.with_draft(recovered, Some("DRAFT-7".into()));
        session.save().await.unwrap();
        assert_eq!(journal.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let store = Arc::new(FakeStore::default());
        let (mut session, _) = session_with(store.clone()).await;

        let err = session.delete("PO/1", None).await.unwrap_err();
        assert!(matches!(err, SessionError::ConfirmationRequired("Delete")));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_open_order_resets_form() {
        let store = Arc::new(FakeStore::default());
        let (mut session, _) = session_with(store.clone()).await;
        fill(&mut session, "PO/1");
        session.save().await.unwrap();

        let note = session
            .delete("PO/1", Some(Confirmation::yes()))
            .await
            .unwrap();
        assert!(note.is_success());
        assert_eq!(note.message, "Order PO/1 deleted successfully");
        assert_eq!(session.mode(), &EditMode::New);

        let note = session
            .delete("PO/1", Some(Confirmation::yes()))
            .await
            .unwrap();
        assert_eq!(note.level, NotificationLevel::Failure);
        assert_eq!(note.message, "Failed to delete: Order PO/1 not found");
    }

    #[tokio::test]
    async fn test_failed_delete_is_a_failure_notification() {
        let store = Arc::new(FakeStore::offline());
        let (mut session, _) = session_with(store.clone()).await;
        fill(&mut session, "PO/1");
        let before = session.draft().clone();

        let note = session
            .delete("PO/1", Some(Confirmation::yes()))
            .await
            .unwrap();
        assert_eq!(note.level, NotificationLevel::Failure);
        assert!(note.message.starts_with("Failed to delete: Backend unavailable"));
        assert_eq!(session.draft(), &before);
        assert_eq!(store.calls(), vec!["delete PO/1"]);
    }

    #[tokio::test]
    async fn test_open_and_list() {
        let store = Arc::new(FakeStore::default());
        let (mut session, _) = session_with(store.clone()).await;
        fill(&mut session, "PO/1");
        session.save().await.unwrap();
        session.cancel(Some(Confirmation::yes())).unwrap();

        let summaries = session.list().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].party_name, "Acme Polymers");
        assert_eq!(summaries[0].net_amount, 236.0);

        let mut other = EditorSession::new(
            store,
            Database::new(DbConfig::in_memory()).await.unwrap().drafts(),
        );
        let draft = other.open("PO/1").await.unwrap();
        assert_eq!(draft.totals().net_amount, 236.0);
        assert!(other.is_read_only());

        assert!(matches!(
            other.open("PO/2").await,
            Err(SessionError::Store(StoreError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_open_keeps_history_read_only() {
        let store = Arc::new(FakeStore::default());
        let mut stored = stored_order("PO/9");
        stored.updates = vec![serde_json::json!({ "action": "created", "user": "System" })];
        stored.grn_records = vec![serde_json::json!({ "grn_no": "G1", "items": [] })];
        store.orders.lock().unwrap().push(stored);
        let (mut session, _) = session_with(store).await;

        session.open("PO/9").await.unwrap();
        assert_eq!(session.history().update_entries()[0].action, "created");
        assert_eq!(session.history().grn_entries()[0].grn_no, "G1");

        session
            .delete("PO/9", Some(Confirmation::yes()))
            .await
            .unwrap();
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_negative_quantity_warning() {
        let (mut session, _) = session_with(Arc::new(FakeStore::default())).await;
        fill(&mut session, "PO/1");
        session
            .edit(|d| d.with_cell(0, LineField::Quantity(-1.0)))
            .unwrap();

        let warnings = session.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, NotificationLevel::Warning);
    }
}

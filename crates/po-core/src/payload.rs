//! # Wire Payloads
//!
//! JSON shapes exchanged with the order backend.
//!
//! A stored order is the header fields, the `items` array and a snapshot of
//! the totals, all at the top level of one object:
//!
//! ```json
//! {
//!   "po_no": "PO/24/001", "party_name": "Acme", "discount": 10,
//!   "gst_type": "intra-state", "cgst_percent": 9, "...": "...",
//!   "items": [{ "item_code": "A1", "qty": 2, "rate": 100, "amount": 200 }],
//!   "total_item": 1, "total_qty": 2, "gross_amount": 200, "net_amount": 212.4,
//!   "updates": [], "grn_records": []
//! }
//! ```
//!
//! The totals snapshot is written for reporting only. Loading an order
//! always recomputes from header and items.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::draft::OrderDraft;
use crate::numeric::{lenient_f64, lenient_i64, lenient_string, null_as_default};
use crate::types::{LineItem, OrderHeader};

// =============================================================================
// Purchase Order Payload
// =============================================================================

/// A purchase order as the backend stores it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PurchaseOrderPayload {
    #[serde(flatten)]
    pub header: OrderHeader,

    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<LineItem>,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_item: i64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_qty: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub gross_amount: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_amount: f64,

    /// Audit trail owned by the backend; passed through untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub updates: Vec<Value>,

    /// Goods-received records owned by the backend; passed through untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub grn_records: Vec<Value>,
}

impl PurchaseOrderPayload {
    /// Snapshot of a draft, ready for `POST /api/orders`.
    pub fn from_draft(draft: &OrderDraft) -> Self {
        let totals = draft.totals();
        PurchaseOrderPayload {
            header: draft.header().clone(),
            items: draft.items().to_vec(),
            total_item: totals.total_item as i64,
            total_qty: totals.total_qty,
            gross_amount: totals.gross_amount,
            net_amount: totals.net_amount,
            updates: Vec::new(),
            grn_records: Vec::new(),
        }
    }

    /// Snapshot for `PUT /api/orders`.
    ///
    /// The PO number is the immutable key of an update: whatever the header
    /// says, the payload carries `confirmed_po`.
    pub fn for_update(draft: &OrderDraft, confirmed_po: &str) -> Self {
        let mut payload = Self::from_draft(draft);
        payload.header.po_no = confirmed_po.to_string();
        payload
    }

    /// Rebuilds an editable draft, recomputing line amounts and totals.
    pub fn into_draft(self) -> OrderDraft {
        OrderDraft::from_parts(self.header, self.items)
    }

    /// The backend's audit trail and GRN records, as stored.
    pub fn history(&self) -> OrderHistory {
        OrderHistory {
            updates: self.updates.clone(),
            grn_records: self.grn_records.clone(),
        }
    }

    /// Puts stored history back on a snapshot, e.g. before printing it.
    pub fn with_history(mut self, history: OrderHistory) -> Self {
        self.updates = history.updates;
        self.grn_records = history.grn_records;
        self
    }

    pub fn po_no(&self) -> &str {
        &self.header.po_no
    }
}

// =============================================================================
// Order History (read-only)
// =============================================================================

/// Backend-owned records attached to a stored order.
///
/// Kept as raw JSON so they round-trip untouched; the typed views below
/// are for display only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderHistory {
    pub updates: Vec<Value>,
    pub grn_records: Vec<Value>,
}

impl OrderHistory {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.grn_records.is_empty()
    }

    /// Audit entries, oldest first. Entries that are not objects are skipped.
    pub fn update_entries(&self) -> Vec<UpdateEntry> {
        parse_entries(&self.updates)
    }

    /// Goods-received notes against this order.
    pub fn grn_entries(&self) -> Vec<GrnRecord> {
        parse_entries(&self.grn_records)
    }
}

fn parse_entries<T: DeserializeOwned>(values: &[Value]) -> Vec<T> {
    values
        .iter()
        .filter(|v| v.is_object())
        .filter_map(|v| T::deserialize(v).ok())
        .collect()
}

/// One entry of the audit trail (`created` / `updated`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct UpdateEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: String,

    #[serde(deserialize_with = "lenient_string")]
    pub action: String,

    #[serde(deserialize_with = "lenient_string")]
    pub user: String,

    #[serde(deserialize_with = "null_as_default")]
    pub changes: BTreeMap<String, FieldChange>,
}

/// Old and new value of one field, as the backend recorded them.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FieldChange {
    pub old: Value,
    pub new: Value,
}

/// A goods-received note.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GrnRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub grn_no: String,

    #[serde(deserialize_with = "lenient_string")]
    pub grn_date: String,

    #[serde(deserialize_with = "lenient_string")]
    pub remarks: String,

    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<GrnLine>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GrnLine {
    #[serde(deserialize_with = "lenient_string")]
    pub item_code: String,

    #[serde(deserialize_with = "lenient_f64")]
    pub ordered_qty: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub received_qty: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub pending_qty: f64,
}

// =============================================================================
// Order Summary
// =============================================================================

/// One row of the order list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub po_no: String,
    pub date: String,
    pub party_name: String,
    pub net_amount: f64,
    pub status: String,
}

impl From<&PurchaseOrderPayload> for OrderSummary {
    fn from(order: &PurchaseOrderPayload) -> Self {
        OrderSummary {
            po_no: order.header.po_no.clone(),
            date: order.header.date.clone(),
            party_name: order.header.party_name.clone(),
            net_amount: order.net_amount,
            status: order.header.status.clone(),
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Reply to a create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmResponse {
    #[serde(deserialize_with = "lenient_string")]
    pub confirmed_po: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

/// Reply to a delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,

    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

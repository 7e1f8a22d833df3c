//! # Domain Types
//!
//! Core domain types used throughout Purchase Order Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderHeader    │   │    LineItem     │   │  TotalsRecord   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  po_no          │   │  item_code      │   │  gross_amount   │       │
//! │  │  party_name     │   │  qty, rate      │   │  discount_amount│       │
//! │  │  discount %     │   │  amount (qty ×  │   │  cgst/sgst/igst │       │
//! │  │  gst_type, ...  │   │         rate)   │   │  net_amount     │       │
//! │  └────────┬────────┘   └─────────────────┘   └─────────────────┘       │
//! │           │ tax_params()                              ▲                 │
//! │           ▼                                           │ compute()       │
//! │  ┌─────────────────┐   ┌─────────────────┐            │                 │
//! │  │   TaxParams     │──►│    GstType      │────────────┘                 │
//! │  │  (engine input) │   │  Intra / Inter  │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names follow the order backend's JSON. Where the Rust name is more
//! precise than the wire name, `#[serde(rename)]` keeps the wire stable:
//! `discount_percent` ⇄ `discount`, `freight_amount` ⇄ `freight_amt`.
//!
//! Every struct here deserializes leniently (see [`crate::numeric`]): any
//! field may be absent, `null`, or a number encoded as text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::numeric::{lenient_bool, lenient_f64, lenient_i64, lenient_string};

// =============================================================================
// Defaults
// =============================================================================

/// Default CGST percent for a new order.
pub const DEFAULT_CGST_PERCENT: f64 = 9.0;

/// Default SGST percent for a new order.
pub const DEFAULT_SGST_PERCENT: f64 = 9.0;

/// Default IGST percent for a new order.
pub const DEFAULT_IGST_PERCENT: f64 = 18.0;

/// Default credit days for a new order.
pub const DEFAULT_CREDIT_DAYS: i64 = 60;

/// Terms printed on a new order until the user edits them.
pub const DEFAULT_TERMS: &str = "1. Payment terms: Net 60 days from invoice date\n\
2. Delivery: As per agreed schedule\n\
3. Quality: As per approved samples\n\
4. Returns: Within 7 days with prior approval\n\
5. Disputes: Subject to Surat jurisdiction";

// =============================================================================
// GST Type
// =============================================================================

/// Which GST regime applies to the order.
///
/// The two branches are mutually exclusive: an intra-state order only ever
/// carries CGST + SGST, an inter-state order only IGST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GstType {
    /// Supplier and buyer in the same state: CGST + SGST.
    #[default]
    #[serde(rename = "intra-state")]
    IntraState,

    /// Supplier and buyer in different states: IGST.
    #[serde(rename = "inter-state")]
    InterState,
}

impl GstType {
    /// Returns the wire representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GstType::IntraState => "intra-state",
            GstType::InterState => "inter-state",
        }
    }
}

impl fmt::Display for GstType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GstType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intra-state" | "intra" | "intrastate" | "cgst+sgst" => Ok(GstType::IntraState),
            "inter-state" | "inter" | "interstate" | "igst" => Ok(GstType::InterState),
            other => Err(format!("unknown GST type: {other}")),
        }
    }
}

/// Missing, `null` or unrecognised values fall back to intra-state.
impl<'de> Deserialize<'de> for GstType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of the item grid.
///
/// `amount` is derived: it always equals `qty * rate` once the draft
/// pipeline has run (see [`crate::totals::derive_line`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    #[serde(deserialize_with = "lenient_string")]
    pub item_code: String,

    #[serde(deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(deserialize_with = "lenient_string")]
    pub merge_style: String,

    #[serde(deserialize_with = "lenient_string")]
    pub shade: String,

    /// Quantity still outstanding against this row (informational).
    #[serde(deserialize_with = "lenient_f64")]
    pub pending_qty: f64,

    /// Goods already received (informational).
    #[serde(deserialize_with = "lenient_f64")]
    pub grn_qty: f64,

    #[serde(deserialize_with = "lenient_string")]
    pub remark: String,

    #[serde(deserialize_with = "lenient_string")]
    pub department: String,

    #[serde(deserialize_with = "lenient_string")]
    pub cost_center: String,

    /// Unit of quantity code (KGS, NOS, ...).
    #[serde(deserialize_with = "lenient_string")]
    pub uqc: String,

    /// Ordered quantity.
    #[serde(deserialize_with = "lenient_f64")]
    pub qty: f64,

    /// Unit rate.
    #[serde(deserialize_with = "lenient_f64")]
    pub rate: f64,

    /// Derived line amount (`qty * rate`).
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
}

impl LineItem {
    /// A fresh row as the item grid appends it.
    pub fn new_row() -> Self {
        LineItem {
            cost_center: "DIAPER DIVISION".to_string(),
            ..LineItem::default()
        }
    }
}

/// Defaults for fields the backend omitted.
impl Default for LineItem {
    fn default() -> Self {
        LineItem {
            item_code: String::new(),
            description: String::new(),
            merge_style: String::new(),
            shade: String::new(),
            pending_qty: 0.0,
            grn_qty: 0.0,
            remark: String::new(),
            department: "REGULAR".to_string(),
            cost_center: String::new(),
            uqc: "KGS".to_string(),
            qty: 0.0,
            rate: 0.0,
            amount: 0.0,
        }
    }
}

// =============================================================================
// Order Header
// =============================================================================

/// Header fields of a purchase order, including the tax inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderHeader {
    /// PO number; empty until the backend confirms the first save.
    #[serde(deserialize_with = "lenient_string")]
    pub po_no: String,

    /// Order date, `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,

    #[serde(deserialize_with = "lenient_string")]
    pub ord_mode: String,

    #[serde(deserialize_with = "lenient_string")]
    pub mode: String,

    #[serde(deserialize_with = "lenient_string")]
    pub store: String,

    /// Supplier.
    #[serde(deserialize_with = "lenient_string")]
    pub party_name: String,

    #[serde(deserialize_with = "lenient_string")]
    pub agent: String,

    #[serde(deserialize_with = "lenient_string")]
    pub reference: String,

    #[serde(deserialize_with = "lenient_string")]
    pub ref_date: String,

    #[serde(deserialize_with = "lenient_string")]
    pub currency: String,

    #[serde(deserialize_with = "lenient_i64")]
    pub cr_days: i64,

    #[serde(deserialize_with = "lenient_i64")]
    pub del_days: i64,

    #[serde(deserialize_with = "lenient_string")]
    pub freight_type: String,

    #[serde(deserialize_with = "lenient_bool")]
    pub is_import: bool,

    #[serde(deserialize_with = "lenient_string")]
    pub status: String,

    #[serde(deserialize_with = "lenient_string")]
    pub gstin: String,

    #[serde(deserialize_with = "lenient_string")]
    pub address: String,

    #[serde(deserialize_with = "lenient_string")]
    pub delivery_party: String,

    #[serde(deserialize_with = "lenient_string")]
    pub del_terms: String,

    #[serde(deserialize_with = "lenient_string")]
    pub pay_terms: String,

    #[serde(deserialize_with = "lenient_string")]
    pub despatch_ins: String,

    #[serde(deserialize_with = "lenient_string")]
    pub special_note: String,

    #[serde(deserialize_with = "lenient_string")]
    pub remarks: String,

    #[serde(deserialize_with = "lenient_string")]
    pub terms_conditions_text: String,

    /// Discount on gross, in percent.
    #[serde(rename = "discount", deserialize_with = "lenient_f64")]
    pub discount_percent: f64,

    /// Signed adjustment added to net (negative deducts).
    #[serde(deserialize_with = "lenient_f64")]
    pub add_less: f64,

    #[serde(rename = "freight_amt", deserialize_with = "lenient_f64")]
    pub freight_amount: f64,

    pub gst_type: GstType,

    #[serde(deserialize_with = "lenient_f64")]
    pub cgst_percent: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub sgst_percent: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub igst_percent: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub other_charges: f64,
}

impl OrderHeader {
    /// Extracts the inputs the totals engine reads.
    pub fn tax_params(&self) -> TaxParams {
        TaxParams {
            discount_percent: self.discount_percent,
            gst_type: self.gst_type,
            cgst_percent: self.cgst_percent,
            sgst_percent: self.sgst_percent,
            igst_percent: self.igst_percent,
            other_charges: self.other_charges,
            add_less: self.add_less,
            freight_amount: self.freight_amount,
        }
    }

    /// True once the backend has assigned a PO number.
    pub fn is_saved(&self) -> bool {
        !self.po_no.trim().is_empty()
    }
}

/// The header a new order starts from.
impl Default for OrderHeader {
    fn default() -> Self {
        OrderHeader {
            po_no: String::new(),
            date: String::new(),
            ord_mode: "CONSUMABLE".to_string(),
            mode: "Direct".to_string(),
            store: "SURAT".to_string(),
            party_name: String::new(),
            agent: "DIRECT".to_string(),
            reference: String::new(),
            ref_date: String::new(),
            currency: String::new(),
            cr_days: DEFAULT_CREDIT_DAYS,
            del_days: 0,
            freight_type: "EXTRA".to_string(),
            is_import: false,
            status: "Open".to_string(),
            gstin: String::new(),
            address: String::new(),
            delivery_party: String::new(),
            del_terms: "IMMEDIATELY".to_string(),
            pay_terms: "60 DAYS".to_string(),
            despatch_ins: String::new(),
            special_note: String::new(),
            remarks: String::new(),
            terms_conditions_text: DEFAULT_TERMS.to_string(),
            discount_percent: 0.0,
            add_less: 0.0,
            freight_amount: 0.0,
            gst_type: GstType::IntraState,
            cgst_percent: DEFAULT_CGST_PERCENT,
            sgst_percent: DEFAULT_SGST_PERCENT,
            igst_percent: DEFAULT_IGST_PERCENT,
            other_charges: 0.0,
        }
    }
}

// =============================================================================
// Tax Params
// =============================================================================

/// Order-level inputs to the totals engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TaxParams {
    pub discount_percent: f64,
    pub gst_type: GstType,
    pub cgst_percent: f64,
    pub sgst_percent: f64,
    pub igst_percent: f64,
    pub other_charges: f64,
    pub add_less: f64,
    pub freight_amount: f64,
}

// =============================================================================
// Totals Record
// =============================================================================

/// Every figure the totals panel, print and export display.
///
/// Produced only by [`crate::totals::compute`]. Monetary fields are rounded
/// to two decimals, `total_qty` to three; rates are echoed unrounded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalsRecord {
    pub total_item: usize,
    pub total_qty: f64,
    pub gross_amount: f64,
    pub discount_percent: f64,
    pub discount_amount: f64,
    pub subtotal: f64,
    pub cgst_percent: f64,
    pub cgst_amount: f64,
    pub sgst_percent: f64,
    pub sgst_amount: f64,
    pub igst_percent: f64,
    pub igst_amount: f64,
    pub total_tax: f64,
    pub other_charges: f64,
    pub add_less: f64,
    pub freight_amount: f64,
    pub net_amount: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gst_type_wire_names() {
        assert_eq!(
            serde_json::to_value(GstType::InterState).unwrap(),
            json!("inter-state")
        );
        let parsed: GstType = serde_json::from_value(json!("intra-state")).unwrap();
        assert_eq!(parsed, GstType::IntraState);
    }

    #[test]
    fn test_gst_type_lenient() {
        let parsed: GstType = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(parsed, GstType::IntraState);
        let parsed: GstType = serde_json::from_value(json!("IGST")).unwrap();
        assert_eq!(parsed, GstType::InterState);
        let parsed: GstType = serde_json::from_value(json!("bogus")).unwrap();
        assert_eq!(parsed, GstType::IntraState);
    }

    #[test]
    fn test_line_item_defaults() {
        let item: LineItem = serde_json::from_value(json!({"qty": "5"})).unwrap();
        assert_eq!(item.qty, 5.0);
        assert_eq!(item.department, "REGULAR");
        assert_eq!(item.uqc, "KGS");
        assert_eq!(item.cost_center, "");

        assert_eq!(LineItem::new_row().cost_center, "DIAPER DIVISION");
    }

    #[test]
    fn test_header_wire_renames() {
        let header: OrderHeader = serde_json::from_value(json!({
            "po_no": "PO-1",
            "discount": "10",
            "freight_amt": 20,
            "cr_days": "45",
            "remarks": null
        }))
        .unwrap();
        assert_eq!(header.discount_percent, 10.0);
        assert_eq!(header.freight_amount, 20.0);
        assert_eq!(header.cr_days, 45);
        assert_eq!(header.remarks, "");
        assert_eq!(header.cgst_percent, DEFAULT_CGST_PERCENT);

        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(value["discount"], json!(10.0));
        assert_eq!(value["freight_amt"], json!(20.0));
        assert_eq!(value["gst_type"], json!("intra-state"));
    }

    #[test]
    fn test_header_is_saved() {
        let mut header = OrderHeader::default();
        assert!(!header.is_saved());
        header.po_no = "PO-7".to_string();
        assert!(header.is_saved());
    }
}

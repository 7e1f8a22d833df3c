//! # Totals Engine
//!
//! Turns a set of line items plus the header's tax inputs into a
//! [`TotalsRecord`].
//!
//! ## Pipeline
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  Phase 1 (per row)     derive_line: amount = qty × rate              │
//! │                                  │                                   │
//! │  Phase 2 (whole order) compute:  ▼                                   │
//! │     gross     = Σ amount                                             │
//! │     discount  = gross × discount% / 100                              │
//! │     subtotal  = gross − discount                                     │
//! │     ┌─ intra-state: cgst = subtotal × cgst%, sgst = subtotal × sgst% │
//! │     └─ inter-state: igst = subtotal × igst%                          │
//! │     tax       = cgst + sgst + igst                                   │
//! │     net       = subtotal + tax + other + freight + add_less          │
//! │                                                                      │
//! │  Rounding happens once, when the record is assembled.                │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both phases are pure and total: they never fail, whatever the input.

use crate::numeric::{finite_or_zero, round2, round_to};
use crate::types::{GstType, LineItem, TaxParams, TotalsRecord};
use crate::QTY_DECIMALS;

// =============================================================================
// Phase 1: Line Derivation
// =============================================================================

/// Returns the row with `amount` recomputed from `qty * rate`.
pub fn derive_line(item: &LineItem) -> LineItem {
    LineItem {
        amount: line_amount(item),
        ..item.clone()
    }
}

/// Phase 1 over every row.
pub fn derive_lines(items: &[LineItem]) -> Vec<LineItem> {
    items.iter().map(derive_line).collect()
}

#[inline]
fn line_amount(item: &LineItem) -> f64 {
    finite_or_zero(finite_or_zero(item.qty) * finite_or_zero(item.rate))
}

// =============================================================================
// Phase 2: Order Aggregation
// =============================================================================

/// Computes the order totals from already-derived line items.
///
/// ## Example
/// ```rust
/// use po_core::totals::{compute, derive_lines};
/// use po_core::types::{GstType, LineItem, TaxParams};
///
/// let items = derive_lines(&[LineItem { qty: 2.0, rate: 100.0, ..LineItem::default() }]);
/// let params = TaxParams {
///     gst_type: GstType::InterState,
///     igst_percent: 18.0,
///     ..TaxParams::default()
/// };
///
/// let totals = compute(&items, &params);
/// assert_eq!(totals.igst_amount, 36.0);
/// assert_eq!(totals.net_amount, 236.0);
/// ```
pub fn compute(items: &[LineItem], params: &TaxParams) -> TotalsRecord {
    let total_qty: f64 = items.iter().map(|item| finite_or_zero(item.qty)).sum();
    let gross: f64 = items.iter().map(|item| finite_or_zero(item.amount)).sum();

    let discount_percent = finite_or_zero(params.discount_percent);
    let discount = gross * discount_percent / 100.0;
    let subtotal = gross - discount;

    let cgst_percent = finite_or_zero(params.cgst_percent);
    let sgst_percent = finite_or_zero(params.sgst_percent);
    let igst_percent = finite_or_zero(params.igst_percent);

    let (cgst, sgst, igst) = match params.gst_type {
        GstType::IntraState => (
            subtotal * cgst_percent / 100.0,
            subtotal * sgst_percent / 100.0,
            0.0,
        ),
        GstType::InterState => (0.0, 0.0, subtotal * igst_percent / 100.0),
    };
    let total_tax = cgst + sgst + igst;

    let other_charges = finite_or_zero(params.other_charges);
    let freight = finite_or_zero(params.freight_amount);
    let add_less = finite_or_zero(params.add_less);
    let net = subtotal + total_tax + other_charges + freight + add_less;

    TotalsRecord {
        total_item: items.len(),
        total_qty: round_to(total_qty, QTY_DECIMALS),
        gross_amount: round2(gross),
        discount_percent: round2(discount_percent),
        discount_amount: round2(discount),
        subtotal: round2(subtotal),
        cgst_percent: round2(cgst_percent),
        cgst_amount: round2(cgst),
        sgst_percent: round2(sgst_percent),
        sgst_amount: round2(sgst),
        igst_percent: round2(igst_percent),
        igst_amount: round2(igst),
        total_tax: round2(total_tax),
        other_charges: round2(other_charges),
        add_less: round2(add_less),
        freight_amount: round2(freight),
        net_amount: round2(net),
    }
}

/// Runs both phases: re-derives every row, then aggregates.
pub fn recalculate(items: &[LineItem], params: &TaxParams) -> (Vec<LineItem>, TotalsRecord) {
    let derived = derive_lines(items);
    let totals = compute(&derived, params);
    (derived, totals)
}

// =============================================================================
// Unit Tests
// =============================================================================

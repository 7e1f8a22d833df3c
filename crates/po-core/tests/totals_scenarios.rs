//! End-to-end totals scenarios, driven through the backend JSON shape the
//! way a loaded order reaches the engine.

use po_core::document::{render_export_csv, render_print_html, CompanyProfile, PrintContext};
use po_core::{GstType, HeaderField, PurchaseOrderPayload};
use serde_json::json;

fn load(value: serde_json::Value) -> po_core::OrderDraft {
    serde_json::from_value::<PurchaseOrderPayload>(value)
        .expect("payload should deserialize")
        .into_draft()
}

#[test]
fn intra_state_with_discount_freight_and_deduction() {
    let draft = load(json!({
        "po_no": "PO/A",
        "gst_type": "intra-state",
        "discount": 10,
        "cgst_percent": 9,
        "sgst_percent": 9,
        "other_charges": 0,
        "freight_amt": 20,
        "add_less": -5,
        "items": [{ "qty": 2, "rate": 100 }, { "qty": 1, "rate": 50 }]
    }));
    let t = draft.totals();

    assert_eq!(t.gross_amount, 250.00);
    assert_eq!(t.discount_amount, 25.00);
    assert_eq!(t.subtotal, 225.00);
    assert_eq!(t.cgst_amount, 20.25);
    assert_eq!(t.sgst_amount, 20.25);
    assert_eq!(t.igst_amount, 0.0);
    assert_eq!(t.total_tax, 40.50);
    assert_eq!(t.net_amount, 280.50);
}

#[test]
fn inter_state_with_other_charges() {
    let draft = load(json!({
        "gst_type": "inter-state",
        "discount": 0,
        "cgst_percent": 9,
        "sgst_percent": 9,
        "igst_percent": 18,
        "other_charges": 10,
        "items": [{ "qty": "2", "rate": "100" }, { "qty": "1", "rate": "50" }]
    }));
    let t = draft.totals();

    assert_eq!(t.subtotal, 250.00);
    assert_eq!(t.cgst_amount, 0.0);
    assert_eq!(t.sgst_amount, 0.0);
    assert_eq!(t.igst_amount, 45.00);
    assert_eq!(t.total_tax, 45.00);
    assert_eq!(t.net_amount, 305.00);
}

#[test]
fn empty_order_with_freight_only() {
    let draft = load(json!({ "freight_amt": 50, "items": [] }));
    assert_eq!(draft.totals().gross_amount, 0.0);
    assert_eq!(draft.totals().net_amount, 50.00);
}

#[test]
fn blank_quantity_counts_as_zero() {
    let draft = load(json!({ "items": [{ "qty": "", "rate": 10 }] }));
    assert_eq!(draft.items()[0].amount, 0.0);
    assert_eq!(draft.totals().net_amount, 0.0);
}

#[test]
fn switching_gst_regime_swaps_tax_lines() {
    let intra = load(json!({
        "discount": 10,
        "items": [{ "qty": 2, "rate": 100 }, { "qty": 1, "rate": 50 }]
    }));
    let inter = intra.with_header(HeaderField::GstType(GstType::InterState));

    assert_eq!(intra.totals().igst_amount, 0.0);
    assert_eq!(inter.totals().cgst_amount, 0.0);
    assert_eq!(inter.totals().sgst_amount, 0.0);
    assert_eq!(inter.totals().igst_amount, 40.50);
    assert_eq!(intra.totals().total_tax, inter.totals().total_tax);
}

#[test]
fn printed_and_exported_net_match_screen() {
    let draft = load(json!({
        "po_no": "PO/A",
        "discount": 10,
        "freight_amt": 20,
        "add_less": -5,
        "items": [{ "qty": 2, "rate": 100 }, { "qty": 1, "rate": 50 }]
    }));
    let company = CompanyProfile::default();
    let ctx = PrintContext::new(&company, &draft);
    let shown = format!("{:.2}", draft.totals().net_amount);

    assert!(render_print_html(&ctx)
        .unwrap()
        .contains(&format!("&#8377;{shown}")));
    assert!(render_export_csv(&ctx)
        .unwrap()
        .contains(&format!("Net Amount,{shown}")));
}

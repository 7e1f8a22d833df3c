//! Plain-text tables for terminal output.

use std::fmt::Write;

use po_core::document::totals_lines;
use po_core::{GrnRecord, OrderDraft, OrderSummary, UpdateEntry};
use po_db::LocalDraft;

const RULE_WIDTH: usize = 44;

/// The order header lines a buyer checks before saving.
pub fn header_block(draft: &OrderDraft) -> String {
    let header = draft.header();
    let mut out = String::new();
    let rows = [
        ("PO Number", header.po_no.as_str()),
        ("Date", header.date.as_str()),
        ("Party", header.party_name.as_str()),
        ("Store", header.store.as_str()),
        ("Status", header.status.as_str()),
        ("GST", header.gst_type.as_str()),
    ];
    for (label, value) in rows {
        let value = if value.is_empty() { "-" } else { value };
        let _ = writeln!(out, "{label:<12} {value}");
    }
    out
}

pub fn items_table(draft: &OrderDraft) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<12} {:<28} {:>12} {:>12} {:>14}",
        "#", "Item Code", "Description", "Qty", "Rate", "Amount"
    );
    for (i, item) in draft.items().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<12} {:<28} {:>12.3} {:>12.2} {:>14.2}",
            i + 1,
            clip(&item.item_code, 12),
            clip(&item.description, 28),
            item.qty,
            item.rate,
            item.amount
        );
    }
    out
}

/// The totals panel: counts, the GST branch in force, and the net amount.
pub fn totals_table(draft: &OrderDraft) -> String {
    let totals = draft.totals();
    let mut out = String::new();

    let _ = writeln!(out, "{:<28}{:>16}", "Total Items", totals.total_item);
    let _ = writeln!(out, "{:<28}{:>16.3}", "Total Qty", totals.total_qty);
    for (label, amount) in totals_lines(totals, draft.header().gst_type) {
        let _ = writeln!(out, "{label:<28}{amount:>16.2}");
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{:<28}{:>16.2}", "Net Amount", totals.net_amount);
    out
}

pub fn summaries_table(orders: &[OrderSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<18} {:<10} {:<32} {:>14} {:<10}",
        "PO Number", "Date", "Party", "Net Amount", "Status"
    );
    for order in orders {
        let _ = writeln!(
            out,
            "{:<18} {:<10} {:<32} {:>14.2} {:<10}",
            clip(&order.po_no, 18),
            order.date,
            clip(&order.party_name, 32),
            order.net_amount,
            order.status
        );
    }
    out
}

pub fn drafts_table(drafts: &[LocalDraft]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<36} {:<24} {:>14} {:>8}  {:<16} {}",
        "Key", "Party", "Net Amount", "Attempts", "Updated", "Reason"
    );
    for draft in drafts {
        let _ = writeln!(
            out,
            "{:<36} {:<24} {:>14.2} {:>8}  {:<16} {}",
            draft.draft_key,
            clip(&draft.party_name, 24),
            draft.net_amount,
            draft.attempts,
            draft.updated_at.format("%Y-%m-%d %H:%M"),
            draft.reason
        );
    }
    out
}

/// Update history, one entry per line with its field changes indented.
pub fn updates_table(updates: &[UpdateEntry]) -> String {
    if updates.is_empty() {
        return "No update history available\n".to_string();
    }

    let mut out = String::new();
    for update in updates {
        let when = if update.timestamp.is_empty() {
            "-"
        } else {
            update.timestamp.as_str()
        };
        let _ = writeln!(out, "{:<26} {:<10} by {}", when, update.action, update.user);
        for (field, change) in &update.changes {
            let _ = writeln!(out, "    {field}: {} -> {}", change.old, change.new);
        }
    }
    out
}

/// Goods received against the order.
pub fn grn_table(grns: &[GrnRecord]) -> String {
    if grns.is_empty() {
        return "No GRN records found for this PO\n".to_string();
    }

    let mut out = String::new();
    for grn in grns {
        let _ = writeln!(out, "GRN #{}  Date: {}", grn.grn_no, grn.grn_date);
        if !grn.items.is_empty() {
            let _ = writeln!(
                out,
                "    {:<12} {:>12} {:>12} {:>12}",
                "Item Code", "Ordered", "Received", "Pending"
            );
            for line in &grn.items {
                let _ = writeln!(
                    out,
                    "    {:<12} {:>12.3} {:>12.3} {:>12.3}",
                    clip(&line.item_code, 12),
                    line.ordered_qty,
                    line.received_qty,
                    line.pending_qty
                );
            }
        }
        if !grn.remarks.is_empty() {
            let _ = writeln!(out, "    Remarks: {}", grn.remarks);
        }
    }
    out
}

/// Truncates to `width` characters, marking the cut with `~`.
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('~');
        clipped
    }
}

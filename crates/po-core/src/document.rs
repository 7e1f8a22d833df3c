//! # Documents
//!
//! Printable HTML and CSV export of a purchase order.
//!
//! Both renderers read the draft's [`TotalsRecord`] snapshot and never
//! recompute, so the printed net amount is exactly the one on screen.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │              COMPANY NAME                  │
//! │              company address               │
//! │             PURCHASE ORDER                 │
//! ├────────────────────────────────────────────┤
//! │ PO No / Date / Supplier / Store / ...      │
//! ├───┬──────┬─────────────┬─────┬─────┬───────┤
//! │ # │ Code │ Description │ Qty │Rate │Amount │
//! ├───┴──────┴─────────────┴─────┴─────┴───────┤
//! │                    Gross ... Net Amount    │
//! │ Remarks / Special Note / Terms             │
//! │ Prepared By            Authorized Signature│
//! └────────────────────────────────────────────┘
//! ```

use askama::Template;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::draft::OrderDraft;
use crate::error::{CoreError, CoreResult};
use crate::types::{GstType, LineItem, TotalsRecord};

// =============================================================================
// Company Profile
// =============================================================================

/// Banner printed at the top of every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub address: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "NT INFOSOL LLP".to_string(),
            address: "A-801, Swastik Universal, Beside Valentine Multiplex, \
                      Piplod-Dumas Road, Surat-395007"
                .to_string(),
        }
    }
}

/// Everything a renderer needs.
#[derive(Debug, Clone, Copy)]
pub struct PrintContext<'a> {
    pub company: &'a CompanyProfile,
    pub draft: &'a OrderDraft,
}

impl<'a> PrintContext<'a> {
    pub fn new(company: &'a CompanyProfile, draft: &'a OrderDraft) -> Self {
        PrintContext { company, draft }
    }
}

// =============================================================================
// Print (HTML)
// =============================================================================

/// One labelled value in the details grid.
struct Detail<'a> {
    label: &'static str,
    value: &'a str,
}

/// One row of the totals block.
struct TotalLine {
    label: String,
    amount: f64,
}

#[derive(Template)]
#[template(path = "purchase_order.html")]
struct PrintTemplate<'a> {
    title_po: &'a str,
    company: &'a CompanyProfile,
    details: Vec<Detail<'a>>,
    items: &'a [LineItem],
    totals_block: Vec<TotalLine>,
    totals: &'a TotalsRecord,
    remarks: &'a str,
    special_note: &'a str,
    show_terms: bool,
    terms: &'a str,
}

impl<'a> PrintTemplate<'a> {
    fn new(ctx: &PrintContext<'a>) -> Self {
        let header = ctx.draft.header();
        let totals = ctx.draft.totals();

        let details = [
            ("PO No", &header.po_no),
            ("Date", &header.date),
            ("Vendor/Supplier", &header.party_name),
            ("Store", &header.store),
            ("Mode", &header.mode),
            ("Agent", &header.agent),
            ("Address", &header.address),
            ("GSTIN", &header.gstin),
            ("Payment Terms", &header.pay_terms),
            ("Delivery Terms", &header.del_terms),
        ]
        .into_iter()
        .map(|(label, value)| Detail {
            label,
            value: or_na(value),
        })
        .collect();

        PrintTemplate {
            title_po: if header.po_no.is_empty() {
                "New"
            } else {
                header.po_no.as_str()
            },
            company: ctx.company,
            details,
            items: ctx.draft.items(),
            totals_block: totals_lines(totals, header.gst_type)
                .into_iter()
                .map(|(label, amount)| TotalLine { label, amount })
                .collect(),
            totals,
            remarks: or_na(&header.remarks),
            special_note: or_na(&header.special_note),
            show_terms: !header.terms_conditions_text.trim().is_empty(),
            terms: &header.terms_conditions_text,
        }
    }
}

/// Renders a self-contained printable HTML page.
pub fn render_print_html(ctx: &PrintContext<'_>) -> CoreResult<String> {
    Ok(PrintTemplate::new(ctx).render()?)
}

/// Totals block lines above the net amount. Tax lines follow the active
/// GST branch only.
pub fn totals_lines(totals: &TotalsRecord, gst_type: GstType) -> Vec<(String, f64)> {
    let mut lines = vec![
        ("Gross Amount".to_string(), totals.gross_amount),
        (
            format!("Discount ({}%)", trim_number(totals.discount_percent)),
            totals.discount_amount,
        ),
        ("Subtotal".to_string(), totals.subtotal),
    ];
    match gst_type {
        GstType::IntraState => {
            lines.push((
                format!("CGST ({}%)", trim_number(totals.cgst_percent)),
                totals.cgst_amount,
            ));
            lines.push((
                format!("SGST ({}%)", trim_number(totals.sgst_percent)),
                totals.sgst_amount,
            ));
        }
        GstType::InterState => lines.push((
            format!("IGST ({}%)", trim_number(totals.igst_percent)),
            totals.igst_amount,
        )),
    }
    lines.push(("Other Charges".to_string(), totals.other_charges));
    lines.push(("Add/Less".to_string(), totals.add_less));
    lines.push(("Freight".to_string(), totals.freight_amount));
    lines
}

// =============================================================================
// Export (CSV)
// =============================================================================

/// Renders the order as CSV: a header block, the item table and a totals
/// block, separated by blank lines.
///
/// Only saved orders (with a PO number) can be exported.
pub fn render_export_csv(ctx: &PrintContext<'_>) -> CoreResult<String> {
    let header = ctx.draft.header();
    if !header.is_saved() {
        return Err(CoreError::UnsavedOrder);
    }
    let totals = ctx.draft.totals();

    let head = csv_block(|w| {
        let rows: [(&str, &str); 13] = [
            ("Company", &ctx.company.name),
            ("Address", &ctx.company.address),
            ("PO Number", &header.po_no),
            ("Date", &header.date),
            ("Party Name", &header.party_name),
            ("Store", &header.store),
            ("Mode", &header.mode),
            ("Agent", &header.agent),
            ("GSTIN", &header.gstin),
            ("Party Address", &header.address),
            ("Payment Terms", &header.pay_terms),
            ("Delivery Terms", &header.del_terms),
            ("GST Type", header.gst_type.as_str()),
        ];
        for (key, value) in rows {
            w.write_record([key, value])?;
        }
        Ok(())
    })?;

    let items = csv_block(|w| {
        w.write_record([
            "#",
            "Item Code",
            "Description",
            "Merge Style",
            "Shade",
            "Department",
            "Cost Center",
            "UQC",
            "Qty",
            "Rate",
            "Amount",
            "Remark",
        ])?;
        for (i, item) in ctx.draft.items().iter().enumerate() {
            let n = (i + 1).to_string();
            let qty = format!("{:.3}", item.qty);
            let rate = format!("{:.2}", item.rate);
            let amount = format!("{:.2}", item.amount);
            let row: [&str; 12] = [
                &n,
                &item.item_code,
                &item.description,
                &item.merge_style,
                &item.shade,
                &item.department,
                &item.cost_center,
                &item.uqc,
                &qty,
                &rate,
                &amount,
                &item.remark,
            ];
            w.write_record(row)?;
        }
        Ok(())
    })?;

    let summary = csv_block(|w| {
        w.write_record(["Total Items", totals.total_item.to_string().as_str()])?;
        w.write_record(["Total Qty", format!("{:.3}", totals.total_qty).as_str()])?;
        for (label, amount) in totals_lines(totals, header.gst_type) {
            w.write_record([label.as_str(), format!("{amount:.2}").as_str()])?;
        }
        w.write_record(["Net Amount", format!("{:.2}", totals.net_amount).as_str()])?;
        Ok(())
    })?;

    Ok([head, items, summary].join("\r\n"))
}

/// `PO_<po_no>_<YYYY-MM-DD>.csv`, with path separators in the PO number
/// replaced so the name stays a single path component.
pub fn export_file_name(po_no: &str, date: NaiveDate) -> String {
    let safe: String = po_no
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    format!("PO_{safe}_{}.csv", date.format("%Y-%m-%d"))
}

// =============================================================================
// Helpers
// =============================================================================

/// Writes one CSV block with CRLF line endings. Records may differ in length.
fn csv_block<F>(write: F) -> CoreResult<String>
where
    F: FnOnce(&mut csv::Writer<Vec<u8>>) -> csv::Result<()>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    write(&mut writer)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Render(e.to_string()))
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// `9.0` → `9`, `2.5` → `2.5`.
fn trim_number(value: f64) -> String {
    let s = format!("{value:.2}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Order Draft
//!
//! The order being edited, as an immutable value.
//!
//! Every edit borrows the current draft and returns a new one whose line
//! amounts and totals are already consistent. Nothing is mutated in place,
//! so a caller can keep the previous draft as an undo snapshot for free.
//!
//! ```text
//!   draft ──with_cell(1, Quantity(4.0))──► draft'
//!                │                             │
//!                │   1. derive_line(row 1)     │
//!                │   2. compute(all rows)      │
//!                ▼                             ▼
//!           (unchanged)                  new totals
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::numeric::{parse_bool, parse_f64, parse_i64};
use crate::totals::{compute, derive_line, recalculate};
use crate::types::{GstType, LineItem, OrderHeader, TotalsRecord};

// =============================================================================
// Field Edits
// =============================================================================

/// A single editable cell of the item grid.
///
/// There is no `Amount` variant: the amount is always derived.
#[derive(Debug, Clone, PartialEq)]
pub enum LineField {
    ItemCode(String),
    Description(String),
    MergeStyle(String),
    Shade(String),
    PendingQty(f64),
    GrnQty(f64),
    Remark(String),
    Department(String),
    CostCenter(String),
    Uqc(String),
    Quantity(f64),
    Rate(f64),
}

impl LineField {
    /// Builds an edit from a column name and the raw cell text.
    ///
    /// Numeric columns coerce the text; blank or malformed input is zero.
    pub fn parse(column: &str, raw: &str) -> CoreResult<Self> {
        let text = || raw.to_string();
        let field = match column {
            "item_code" => LineField::ItemCode(text()),
            "description" => LineField::Description(text()),
            "merge_style" => LineField::MergeStyle(text()),
            "shade" => LineField::Shade(text()),
            "pending_qty" => LineField::PendingQty(parse_f64(raw)),
            "grn_qty" => LineField::GrnQty(parse_f64(raw)),
            "remark" => LineField::Remark(text()),
            "department" => LineField::Department(text()),
            "cost_center" => LineField::CostCenter(text()),
            "uqc" => LineField::Uqc(text()),
            "qty" | "quantity" => LineField::Quantity(parse_f64(raw)),
            "rate" => LineField::Rate(parse_f64(raw)),
            "amount" => return Err(CoreError::DerivedField("amount".to_string())),
            other => {
                return Err(CoreError::UnknownField {
                    scope: "line",
                    name: other.to_string(),
                })
            }
        };
        Ok(field)
    }

    fn apply(self, item: &mut LineItem) {
        match self {
            LineField::ItemCode(v) => item.item_code = v,
            LineField::Description(v) => item.description = v,
            LineField::MergeStyle(v) => item.merge_style = v,
            LineField::Shade(v) => item.shade = v,
            LineField::PendingQty(v) => item.pending_qty = v,
            LineField::GrnQty(v) => item.grn_qty = v,
            LineField::Remark(v) => item.remark = v,
            LineField::Department(v) => item.department = v,
            LineField::CostCenter(v) => item.cost_center = v,
            LineField::Uqc(v) => item.uqc = v,
            LineField::Quantity(v) => item.qty = v,
            LineField::Rate(v) => item.rate = v,
        }
    }
}

/// A single editable header field.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderField {
    PoNo(String),
    Date(String),
    OrdMode(String),
    Mode(String),
    Store(String),
    PartyName(String),
    Agent(String),
    Reference(String),
    RefDate(String),
    Currency(String),
    CrDays(i64),
    DelDays(i64),
    FreightType(String),
    IsImport(bool),
    Status(String),
    Gstin(String),
    Address(String),
    DeliveryParty(String),
    DelTerms(String),
    PayTerms(String),
    DespatchIns(String),
    SpecialNote(String),
    Remarks(String),
    TermsConditions(String),
    DiscountPercent(f64),
    AddLess(f64),
    FreightAmount(f64),
    GstType(GstType),
    CgstPercent(f64),
    SgstPercent(f64),
    IgstPercent(f64),
    OtherCharges(f64),
}

impl HeaderField {
    /// Builds an edit from a field name (wire or Rust spelling) and raw text.
    pub fn parse(name: &str, raw: &str) -> CoreResult<Self> {
        let text = || raw.to_string();
        let field = match name {
            "po_no" => HeaderField::PoNo(text()),
            "date" => HeaderField::Date(text()),
            "ord_mode" => HeaderField::OrdMode(text()),
            "mode" => HeaderField::Mode(text()),
            "store" => HeaderField::Store(text()),
            "party_name" => HeaderField::PartyName(text()),
            "agent" => HeaderField::Agent(text()),
            "reference" => HeaderField::Reference(text()),
            "ref_date" => HeaderField::RefDate(text()),
            "currency" => HeaderField::Currency(text()),
            "cr_days" => HeaderField::CrDays(parse_i64(raw)),
            "del_days" => HeaderField::DelDays(parse_i64(raw)),
            "freight_type" => HeaderField::FreightType(text()),
            "is_import" => HeaderField::IsImport(parse_bool(raw)),
            "status" => HeaderField::Status(text()),
            "gstin" => HeaderField::Gstin(text()),
            "address" => HeaderField::Address(text()),
            "delivery_party" => HeaderField::DeliveryParty(text()),
            "del_terms" => HeaderField::DelTerms(text()),
            "pay_terms" => HeaderField::PayTerms(text()),
            "despatch_ins" => HeaderField::DespatchIns(text()),
            "special_note" => HeaderField::SpecialNote(text()),
            "remarks" => HeaderField::Remarks(text()),
            "terms_conditions_text" => HeaderField::TermsConditions(text()),
            "discount" | "discount_percent" => HeaderField::DiscountPercent(parse_f64(raw)),
            "add_less" => HeaderField::AddLess(parse_f64(raw)),
            "freight_amt" | "freight_amount" => HeaderField::FreightAmount(parse_f64(raw)),
            "gst_type" => HeaderField::GstType(raw.parse().map_err(|reason| {
                ValidationError::InvalidFormat {
                    field: "gst_type".to_string(),
                    reason,
                }
            })?),
            "cgst_percent" => HeaderField::CgstPercent(parse_f64(raw)),
            "sgst_percent" => HeaderField::SgstPercent(parse_f64(raw)),
            "igst_percent" => HeaderField::IgstPercent(parse_f64(raw)),
            "other_charges" => HeaderField::OtherCharges(parse_f64(raw)),
            other => {
                return Err(CoreError::UnknownField {
                    scope: "header",
                    name: other.to_string(),
                })
            }
        };
        Ok(field)
    }

    fn apply(self, header: &mut OrderHeader) {
        match self {
            HeaderField::PoNo(v) => header.po_no = v,
            HeaderField::Date(v) => header.date = v,
            HeaderField::OrdMode(v) => header.ord_mode = v,
            HeaderField::Mode(v) => header.mode = v,
            HeaderField::Store(v) => header.store = v,
            HeaderField::PartyName(v) => header.party_name = v,
            HeaderField::Agent(v) => header.agent = v,
            HeaderField::Reference(v) => header.reference = v,
            HeaderField::RefDate(v) => header.ref_date = v,
            HeaderField::Currency(v) => header.currency = v,
            HeaderField::CrDays(v) => header.cr_days = v,
            HeaderField::DelDays(v) => header.del_days = v,
            HeaderField::FreightType(v) => header.freight_type = v,
            HeaderField::IsImport(v) => header.is_import = v,
            HeaderField::Status(v) => header.status = v,
            HeaderField::Gstin(v) => header.gstin = v,
            HeaderField::Address(v) => header.address = v,
            HeaderField::DeliveryParty(v) => header.delivery_party = v,
            HeaderField::DelTerms(v) => header.del_terms = v,
            HeaderField::PayTerms(v) => header.pay_terms = v,
            HeaderField::DespatchIns(v) => header.despatch_ins = v,
            HeaderField::SpecialNote(v) => header.special_note = v,
            HeaderField::Remarks(v) => header.remarks = v,
            HeaderField::TermsConditions(v) => header.terms_conditions_text = v,
            HeaderField::DiscountPercent(v) => header.discount_percent = v,
            HeaderField::AddLess(v) => header.add_less = v,
            HeaderField::FreightAmount(v) => header.freight_amount = v,
            HeaderField::GstType(v) => header.gst_type = v,
            HeaderField::CgstPercent(v) => header.cgst_percent = v,
            HeaderField::SgstPercent(v) => header.sgst_percent = v,
            HeaderField::IgstPercent(v) => header.igst_percent = v,
            HeaderField::OtherCharges(v) => header.other_charges = v,
        }
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// Header + line items + the totals derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    header: OrderHeader,
    items: Vec<LineItem>,
    totals: TotalsRecord,
}

impl OrderDraft {
    /// A new order: default header, no rows.
    pub fn new() -> Self {
        Self::from_parts(OrderHeader::default(), Vec::new())
    }

    /// Builds a draft from loaded parts, re-deriving every line amount.
    pub fn from_parts(header: OrderHeader, items: Vec<LineItem>) -> Self {
        let (items, totals) = recalculate(&items, &header.tax_params());
        OrderDraft {
            header,
            items,
            totals,
        }
    }

    /// Internal constructor for edits whose rows are already derived.
    fn aggregated(header: OrderHeader, items: Vec<LineItem>) -> Self {
        let totals = compute(&items, &header.tax_params());
        OrderDraft {
            header,
            items,
            totals,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn header(&self) -> &OrderHeader {
        &self.header
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn totals(&self) -> &TotalsRecord {
        &self.totals
    }

    // -------------------------------------------------------------------------
    // Row Edits
    // -------------------------------------------------------------------------

    /// Appends a fresh row.
    pub fn with_row_added(&self) -> Self {
        let mut items = self.items.clone();
        items.push(derive_line(&LineItem::new_row()));
        Self::aggregated(self.header.clone(), items)
    }

    /// Removes the row at `index`.
    pub fn with_row_removed(&self, index: usize) -> CoreResult<Self> {
        self.check_row(index)?;
        let mut items = self.items.clone();
        items.remove(index);
        Ok(Self::aggregated(self.header.clone(), items))
    }

    /// Sets one cell, re-derives that row, then re-aggregates.
    pub fn with_cell(&self, index: usize, field: LineField) -> CoreResult<Self> {
        self.check_row(index)?;
        let mut items = self.items.clone();
        let mut row = items[index].clone();
        field.apply(&mut row);
        items[index] = derive_line(&row);
        Ok(Self::aggregated(self.header.clone(), items))
    }

    /// Replaces every row (e.g. a paste from a spreadsheet).
    pub fn with_items_replaced(&self, items: Vec<LineItem>) -> Self {
        Self::from_parts(self.header.clone(), items)
    }

    // -------------------------------------------------------------------------
    // Header Edits
    // -------------------------------------------------------------------------

    /// Sets one header field and re-aggregates.
    pub fn with_header(&self, field: HeaderField) -> Self {
        let mut header = self.header.clone();
        field.apply(&mut header);
        Self::aggregated(header, self.items.clone())
    }

    /// Replaces the whole header and re-aggregates.
    pub fn with_header_replaced(&self, header: OrderHeader) -> Self {
        Self::aggregated(header, self.items.clone())
    }

    fn check_row(&self, index: usize) -> CoreResult<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(CoreError::RowOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

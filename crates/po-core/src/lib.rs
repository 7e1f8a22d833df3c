//! # po-core: Pure Business Logic for Purchase Order Desk
//!
//! This crate is the **heart** of Purchase Order Desk. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Purchase Order Desk Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front End (po CLI / UI)                      │   │
//! │  │    Header Form ──► Item Grid ──► Totals Panel ──► Print/Export  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ OrderDraft edits                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 ★ po-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  totals  │ │  draft   │ │ payload/document │  │   │
//! │  │   │ LineItem │ │ compute  │ │OrderDraft│ │  wire + print    │  │   │
//! │  │   │ Header   │ │ Totals   │ │  edits   │ │  + CSV export    │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        po-db (local drafts)  •  po-client (order backend)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`numeric`] - Lenient input coercion and rounding
//! - [`types`] - Domain types (LineItem, OrderHeader, TotalsRecord, etc.)
//! - [`totals`] - The totals engine (gross → discount → GST → net)
//! - [`draft`] - Immutable order draft with the two-phase edit pipeline
//! - [`validation`] - Form-layer checks run before a save
//! - [`payload`] - Shapes exchanged with the order backend
//! - [`document`] - Printable HTML and CSV export
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Lenient Numbers**: blank or malformed numeric input counts as zero
//! 4. **Round Last**: full `f64` precision until the totals record is built
//!
//! ## Example Usage
//!
//! ```rust
//! use po_core::draft::{HeaderField, LineField, OrderDraft};
//!
//! let draft = OrderDraft::new()
//!     .with_row_added()
//!     .with_cell(0, LineField::Quantity(2.0)).unwrap()
//!     .with_cell(0, LineField::parse("rate", "100").unwrap()).unwrap()
//!     .with_header(HeaderField::DiscountPercent(10.0));
//!
//! // 200 gross, 20 discount, 180 subtotal, 9% + 9% GST
//! assert_eq!(draft.totals().gross_amount, 200.0);
//! assert_eq!(draft.totals().net_amount, 212.4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod draft;
pub mod error;
pub mod numeric;
pub mod payload;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{HeaderField, LineField, OrderDraft};
pub use error::{CoreError, CoreResult, ValidationError};
pub use payload::{
    ConfirmResponse, DeleteResponse, FieldChange, GrnLine, GrnRecord, OrderHistory, OrderSummary,
    PurchaseOrderPayload, UpdateEntry,
};
pub use totals::compute;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Decimal places for every monetary figure in a [`TotalsRecord`].
pub const MONEY_DECIMALS: u32 = 2;

/// Decimal places for quantities (the grid and print show three).
pub const QTY_DECIMALS: u32 = 3;

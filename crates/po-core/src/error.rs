//! # Error Types
//!
//! Domain-specific error types for po-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  po-core errors (this file)                                            │
//! │  ├── CoreError        - Draft editing / rendering failures             │
//! │  └── ValidationError  - Form checks before a save                      │
//! │                                                                         │
//! │  po-db errors (separate crate)                                         │
//! │  └── DbError          - Local draft journal failures                   │
//! │                                                                         │
//! │  po-client errors (separate crate)                                     │
//! │  ├── StoreError       - Order backend request failures                 │
//! │  └── SessionError     - What the editor surfaces to the user           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Notification       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed numbers are deliberately NOT an error anywhere in this crate:
//! they are coerced to zero (see [`crate::numeric`]).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A row index does not exist in the line-item collection.
    ///
    /// ## When This Occurs
    /// - Deleting or editing a row after the grid shrank
    /// - A stale row index coming from the front end
    #[error("Row {index} out of range (order has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// A field name passed to a by-name setter is not known.
    #[error("Unknown {scope} field: {name}")]
    UnknownField { scope: &'static str, name: String },

    /// Attempt to set a derived value directly.
    ///
    /// ## When This Occurs
    /// - Setting a line item's `amount` (always `qty * rate`)
    #[error("{0} is derived and cannot be edited")]
    DerivedField(String),

    /// Export was requested before the order received a PO number.
    #[error("Order must be saved before it can be exported")]
    UnsavedOrder,

    /// A print or export document could not be produced.
    #[error("Render error: {0}")]
    Render(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<askama::Error> for CoreError {
    fn from(err: askama::Error) -> Self {
        CoreError::Render(err.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        CoreError::Render(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the form layer before a save; the totals engine never raises
/// these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The order has no line items.
    #[error("Order must contain at least one item")]
    EmptyOrder,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

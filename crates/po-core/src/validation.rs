//! # Validation Module
//!
//! Form-level checks run before an order is sent to the backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Totals engine                                                │
//! │  └── Never validates: malformed numbers are coerced to zero            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Save (Rust)                                                  │
//! │  ├── THIS MODULE: required fields, lengths, date format                │
//! │  └── Warnings for odd but legal input (negative qty/rate)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order backend                                                │
//! │  └── Schema validation (422), unknown PO on update (404)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use po_core::validation::{validate_po_no, validate_date};
//!
//! validate_po_no("PO/2024/001").unwrap();
//! validate_date("date", "2024-03-31").unwrap();
//! ```

use chrono::NaiveDate;

use crate::draft::OrderDraft;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum PO number length.
pub const MAX_PO_NO_LEN: usize = 30;

/// Maximum supplier name length.
pub const MAX_PARTY_NAME_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a PO number.
///
/// ## Rules
/// - Must not be empty
/// - At most 30 characters
/// - No whitespace or control characters (slashes and hyphens are fine)
///
/// ## Example
/// ```rust
/// use po_core::validation::validate_po_no;
///
/// assert!(validate_po_no("TEST/001").is_ok());
/// assert!(validate_po_no("").is_err());
/// assert!(validate_po_no("PO 1").is_err());
/// ```
pub fn validate_po_no(po_no: &str) -> ValidationResult<()> {
    let po_no = po_no.trim();

    if po_no.is_empty() {
        return Err(ValidationError::Required {
            field: "po_no".to_string(),
        });
    }

    if po_no.chars().count() > MAX_PO_NO_LEN {
        return Err(ValidationError::TooLong {
            field: "po_no".to_string(),
            max: MAX_PO_NO_LEN,
        });
    }

    if po_no
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ValidationError::InvalidFormat {
            field: "po_no".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates the supplier name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_party_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "party_name".to_string(),
        });
    }

    if name.chars().count() > MAX_PARTY_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "party_name".to_string(),
            max: MAX_PARTY_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a required `YYYY-MM-DD` date field.
pub fn validate_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

// =============================================================================
// Order Validators
// =============================================================================

/// Runs every save-time check and returns all violations.
///
/// An empty vector means the draft may be saved.
pub fn validate_for_save(draft: &OrderDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Err(e) = validate_po_no(&draft.header().po_no) {
        errors.push(e);
    }
    errors.extend(validate_order_body(draft));
    errors
}

/// Checks an edit of a stored order before it is sent as an update.
///
/// The update goes out under `original_po_no`, whatever the header's PO
/// field holds. That key is already stored, so only its presence is
/// checked; format and length rules apply to new numbers only.
pub fn validate_for_update(draft: &OrderDraft, original_po_no: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if original_po_no.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: "po_no".to_string(),
        });
    }
    errors.extend(validate_order_body(draft));
    errors
}

/// Everything but the PO number.
fn validate_order_body(draft: &OrderDraft) -> Vec<ValidationError> {
    let header = draft.header();
    let mut errors = Vec::new();

    if let Err(e) = validate_party_name(&header.party_name) {
        errors.push(e);
    }
    if let Err(e) = validate_date("date", &header.date) {
        errors.push(e);
    }
    // reference date is optional, but must parse when given
    if !header.ref_date.trim().is_empty() {
        if let Err(e) = validate_date("ref_date", &header.ref_date) {
            errors.push(e);
        }
    }
    if draft.items().is_empty() {
        errors.push(ValidationError::EmptyOrder);
    }

    errors
}

/// Non-blocking warnings for rows the engine accepts but a buyer rarely
/// means: negative quantity or rate.
pub fn quantity_warnings(draft: &OrderDraft) -> Vec<String> {
    draft
        .items()
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let row = i + 1;
            match (item.qty < 0.0, item.rate < 0.0) {
                (true, true) => Some(format!("Row {row}: negative quantity and rate")),
                (true, false) => Some(format!("Row {row}: negative quantity")),
                (false, true) => Some(format!("Row {row}: negative rate")),
                (false, false) => None,
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

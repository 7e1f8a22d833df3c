//! # Client Error Types
//!
//! Error types for backend calls, the editor session and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   StoreError    │  │  SessionError   │  │     ConfigError         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  ReadOnly       │  │  Invalid                │ │
//! │  │  Rejected       │  │  Confirmation-  │  │  InvalidUrl             │ │
//! │  │  Api            │  │    Required     │  │  LoadFailed             │ │
//! │  │  Unavailable    │  │  Invalid        │  │  SaveFailed             │ │
//! │  │  Decode         │  │  Store / Core / │  │                         │ │
//! │  │  InvalidUrl     │  │    Db           │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  StoreError ──► SessionError::Store ──► failure Notification           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use po_core::{CoreError, ValidationError};
use po_db::DbError;

/// Result type alias for order store calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for editor session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Store Errors
// =============================================================================

/// Failure of a call to the order backend.
///
/// No variant is retried; every failure is terminal for that attempt.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend answered 404 for this order.
    #[error("Order {po_no} not found")]
    NotFound { po_no: String },

    /// The backend refused the payload (422).
    #[error("Order rejected by backend: {0}")]
    Rejected(String),

    /// Any other non-2xx answer.
    #[error("Backend error {status}: {message}")]
    Api { status: u16, message: String },

    /// The backend could not be reached (connect, timeout, TLS).
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered 2xx with a body we could not read.
    #[error("Unreadable backend response: {0}")]
    Decode(String),

    /// The configured base URL cannot be joined with an endpoint.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    /// True when the backend was never reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Unavailable(err.to_string())
        }
    }
}

impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        StoreError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Session Errors
// =============================================================================

/// Failure of an editor session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An edit was attempted while viewing a saved order.
    #[error("Order {po_no} is read-only; begin editing first")]
    ReadOnly { po_no: String },

    /// A destructive operation was called without a confirmation.
    #[error("{0} requires confirmation")]
    ConfirmationRequired(&'static str),

    /// The draft failed pre-save validation.
    #[error("Order is not valid: {}", join_validation(.0))]
    Invalid(Vec<ValidationError>),

    /// Edit mode was requested with nothing to edit.
    #[error("No saved order is open")]
    NothingOpen,

    /// The backend call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A draft edit failed (bad row index, unknown field).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The local draft journal failed.
    #[error("Draft journal error: {0}")]
    Db(#[from] DbError),
}

fn join_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Config Errors
// =============================================================================

/// Failure to load, validate or save `po.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has an unusable value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The API base URL is malformed or not http(s).
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// The config file could not be written.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound {
            po_no: "PO/7".into(),
        };
        assert_eq!(err.to_string(), "Order PO/7 not found");

        let err = StoreError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Backend error 500: boom");
        assert!(!err.is_unavailable());
        assert!(StoreError::Unavailable("refused".into()).is_unavailable());
    }

    #[test]
    fn test_invalid_lists_every_problem() {
        let err = SessionError::Invalid(vec![
            ValidationError::Required {
                field: "po_no".into(),
            },
            ValidationError::EmptyOrder,
        ]);
        assert_eq!(
            err.to_string(),
            "Order is not valid: po_no is required; Order must contain at least one item"
        );
    }

    #[test]
    fn test_store_error_is_transparent_in_session() {
        let err: SessionError = StoreError::Rejected("bad date".into()).into();
        assert_eq!(err.to_string(), "Order rejected by backend: bad date");
    }

    #[test]
    fn test_url_error_maps_to_invalid_url() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        assert!(matches!(
            ConfigError::from(parse_err),
            ConfigError::InvalidUrl(_)
        ));
        assert!(matches!(StoreError::from(parse_err), StoreError::InvalidUrl(_)));
    }
}

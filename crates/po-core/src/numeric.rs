//! # Lenient Input Coercion
//!
//! Order data reaches us as loosely typed JSON: a grid cell may hold `""`,
//! `"12.5"`, `12.5` or `null`. Arithmetic must never fail on that input, so
//! every numeric field is coerced to a finite number when it is read.
//!
//! ## Coercion Table
//! ```text
//! ┌──────────────────────────┬──────────────┬──────────────┐
//! │ Input                    │ coerce_f64   │ coerce_i64   │
//! ├──────────────────────────┼──────────────┼──────────────┤
//! │ 12.5                     │ 12.5         │ 12           │
//! │ "12.5" / " 12.5 "        │ 12.5         │ 12           │
//! │ "" / "abc" / null        │ 0            │ 0            │
//! │ true / [] / {}           │ 0            │ 0            │
//! │ "NaN" / "inf"            │ 0            │ 0            │
//! └──────────────────────────┴──────────────┴──────────────┘
//! ```
//!
//! The serde adapters below are meant to be combined with a container or
//! field level `#[serde(default)]` so that absent fields also become zero.
//!
//! ```rust
//! use po_core::numeric::lenient_f64;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Cell {
//!     #[serde(default, deserialize_with = "lenient_f64")]
//!     qty: f64,
//! }
//!
//! let cell: Cell = serde_json::from_str(r#"{"qty": ""}"#).unwrap();
//! assert_eq!(cell.qty, 0.0);
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// =============================================================================
// Value Coercion
// =============================================================================

/// Coerces any JSON value to a finite `f64`.
pub fn coerce_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_f64(s),
        _ => 0.0,
    };
    finite_or_zero(parsed)
}

/// Coerces any JSON value to an `i64`, truncating fractions toward zero.
pub fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .unwrap_or_else(|| truncate(n.as_f64().unwrap_or(0.0))),
        Value::String(s) => parse_i64(s),
        _ => 0,
    }
}

/// Parses free text as a number; blank or malformed text is zero.
pub fn parse_f64(raw: &str) -> f64 {
    finite_or_zero(raw.trim().parse::<f64>().unwrap_or(0.0))
}

/// Parses free text as an integer, truncating any fraction.
pub fn parse_i64(raw: &str) -> i64 {
    truncate(parse_f64(raw))
}

/// Parses the usual spellings of a checked box.
pub fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

/// Replaces NaN and infinities with zero.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn truncate(value: f64) -> i64 {
    let value = finite_or_zero(value).trunc();
    // `as` saturates at the i64 bounds
    value as i64
}

/// Text fields tolerate `null` and bare numbers.
fn coerce_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Booleans tolerate the string forms a form field produces.
fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => parse_bool(s),
        _ => false,
    }
}

// =============================================================================
// Serde Adapters
// =============================================================================

/// `deserialize_with` adapter for lenient `f64` fields.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// `deserialize_with` adapter for lenient `i64` fields.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_i64(&value))
}

/// `deserialize_with` adapter for text fields that may arrive as `null`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_text(value))
}

/// `deserialize_with` adapter for lenient boolean flags.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_bool(&value))
}

/// `deserialize_with` adapter that maps `null` to `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds half away from zero to `places` decimals.
///
/// A few ULPs of nudge are applied before rounding so that values such as
/// `1.005`, stored as `1.00499999999999989...`, still round to `1.01`.
/// The result is never `-0.0`.
pub fn round_to(value: f64, places: u32) -> f64 {
    let value = finite_or_zero(value);
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    let nudge = scaled.abs().max(1.0) * f64::EPSILON * 8.0;
    let rounded = (scaled + nudge.copysign(scaled)).round() / factor;
    // -0.0 + 0.0 == +0.0
    rounded + 0.0
}

/// Rounds to two decimals (money).
pub fn round2(value: f64) -> f64 {
    round_to(value, crate::MONEY_DECIMALS)
}

// =============================================================================
// Unit Tests
// =============================================================================

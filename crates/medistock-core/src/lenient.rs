//! # Lenient Field Readers
//!
//! `deserialize_with` adapters for snapshot records. The inventory backend
//! is not strict about JSON types, so a count may arrive as `5`, `5.0` or
//! `"5"`, and a date slot may hold anything.
//!
//! ```text
//! ┌────────────────────────┬──────────────────────┬───────────────────────┐
//! │  Raw JSON value        │  integer fields      │  text / date fields   │
//! ├────────────────────────┼──────────────────────┼───────────────────────┤
//! │  5                     │  Some(5)             │  None                 │
//! │  10.0                  │  Some(10)            │  None                 │
//! │  10.5                  │  None                │  None                 │
//! │  " 7 "                 │  Some(7)             │  Some(" 7 ")          │
//! │  "abc"                 │  None                │  Some("abc")          │
//! │  null / true / [] / {} │  None                │  None                 │
//! └────────────────────────┴──────────────────────┴───────────────────────┘
//! ```
//!
//! Only `id` is strict: a record without a usable id cannot be shown or
//! edited, so it fails to deserialize.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a JSON value as an integer, if it is one in any accepted shape.
pub fn integer_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

/// Whole floats inside the i64 range.
fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Optional integer; unusable values become `None`.
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(integer_from_json))
}

/// Optional string; any non-string becomes `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Required record id in any accepted integer shape.
pub fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    integer_from_json(&raw).ok_or_else(|| D::Error::custom(format!("invalid id: {raw}")))
}

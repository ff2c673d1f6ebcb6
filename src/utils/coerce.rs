//! Lenient scalar coercion for loosely-typed JSON documents
//!
//! Slider documents are hand-edited and frequently carry numbers as
//! strings. These helpers turn a JSON value into a finite number or a
//! string, returning `None` when the value cannot stand in for one.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value to a finite `f64`
///
/// Numbers pass through, numeric strings are parsed (an empty string is 0),
/// booleans map to 1/0. Anything else, and any non-finite result, is `None`.
pub fn to_number(value: &Value) -> Option<f64> {
    let numeric = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => return None,
    };

    numeric.is_finite().then_some(numeric)
}

/// Coerce an optional JSON value to a number, falling back when absent or invalid
pub fn number_or(value: Option<&Value>, fallback: f64) -> f64 {
    value.and_then(to_number).unwrap_or(fallback)
}

/// Coerce a JSON scalar to a string; numbers are rendered, other kinds are `None`
pub fn to_string_lossy(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Serde adapter for optional string fields that tolerates numbers and junk
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_string_lossy))
}

//! Lenient field decoders
//!
//! The provider is inconsistent about scalar encoding: ids and codes usually
//! arrive as strings but occasionally as bare numbers, and counters arrive as
//! numbers or numeric strings depending on the endpoint.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes a string-or-number field into `Option<String>`
///
/// `null`, absent, and blank strings all decode to `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// Decodes a string-or-number field into a `String`, defaulting to empty
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// Decodes a number-or-numeric-string counter into `Option<u64>`
pub fn opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

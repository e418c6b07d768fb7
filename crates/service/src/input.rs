//! Lenient decoding for loosely typed request bodies.
//!
//! Clients may send any JSON type for a text field. Anything that is not a
//! string reads as absent, so the usual "required" or "keep existing" rules
//! apply instead of a decode failure.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode any JSON value, keeping it only when it is a string.
pub fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

//! Read-Side Value Coercion
//!
//! Stored values are textual. A read target that does not match the stored
//! representation is coerced through an ordered fallback chain; the first
//! decoder that succeeds wins, and total failure maps to a cache miss.

use serde::de::DeserializeOwned;
use serde_json::Value;

// == Decode Chain ==
/// Attempts to produce a `T` from the raw stored text.
///
/// 1. Parse the text as the JSON encoding of `T` (the write path always
///    stores JSON, so this is the common case).
/// 2. Re-wrap the raw text as a JSON string and parse again. This covers
///    plain-text values written by other clients being read into string-like
///    targets.
pub(crate) fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    if let Ok(value) = serde_json::from_str::<T>(raw) {
        return Some(value);
    }
    serde_json::from_value::<T>(Value::String(raw.to_string())).ok()
}

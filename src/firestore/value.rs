//! Firestore REST value mapping.
//!
//! Firestore's REST API wraps every field in a typed value object
//! (`{"stringValue": ...}`, `{"timestampValue": ...}`). These helpers build
//! and unwrap the representations this service actually uses.

use jiff::Timestamp;
use serde_json::{Map, Value, json};

/// Wraps a string as a Firestore `stringValue`.
pub fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

/// Wraps a timestamp as a Firestore `timestampValue` (RFC 3339).
pub fn timestamp_value(ts: Timestamp) -> Value {
    json!({ "timestampValue": ts.to_string() })
}

/// Extracts a `stringValue` field from a document's field map.
///
/// Returns `None` when the field is absent or holds a different value type.
pub fn get_string<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    fields.get(name)?.get("stringValue")?.as_str()
}

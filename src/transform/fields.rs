//! Ordered fallback-chain resolution over raw records.
//!
//! Upstream sources disagree on key names for the same concept, so every
//! normalized field is resolved by probing an explicit list of candidate
//! keys in order. These helpers are the single place that policy lives.

use serde_json::Value;

use crate::api::types::RawRecord;

/// First key bound to a non-null value.
pub fn first_value<'a>(record: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

/// First key whose value stringifies to non-empty text.
///
/// Empty and whitespace-only strings are skipped, so a blank upstream field
/// falls through to the next candidate.
pub fn first_text(record: &RawRecord, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| non_empty(record.get(*key)))
}

/// First non-null value coerced to an integer; `None` when the value is
/// present but not numeric.
pub fn first_int(record: &RawRecord, keys: &[&str]) -> Option<i64> {
    first_value(record, keys).and_then(coerce_int)
}

/// Scalar stringification with an empty-string default, tolerating numeric
/// and boolean values where text is expected.
pub fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn non_empty(value: Option<&Value>) -> Option<String> {
    let text = text_of(value);
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

pub(crate) fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

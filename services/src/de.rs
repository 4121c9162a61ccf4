//! Lenient coercions for loosely typed export fields
//!
//! Exports are produced by many tools over many years, so the same field can show up
//! as a plain string, a number, or an object wrapping the text. None of these helpers
//! fail; anything they can't make sense of comes back as `None`.

use serde_json::Value;

const TEXT_KEY: &str = "#text";


/// Text content of a field
///
/// - absent or `null` -> `None`
/// - string -> the string
/// - object -> its `#text` member, coerced the same way (absent or `null` -> `None`)
/// - any other value -> its textual representation; JSON text for numbers and
///   containers, `True` / `False` for booleans
pub fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::Object(obj) => match obj.get(TEXT_KEY)? {
            Value::Null => None,
            inner => Some(scalar_text(inner)),
        },
        other => Some(scalar_text(other)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_owned(),
        Value::Bool(false) => "False".to_owned(),
        other => other.to_string(),
    }
}

/// Unix timestamp in seconds from a number or a numeric string
///
/// Floats are truncated toward zero. Strings must hold an ASCII base-10 integer with an
/// optional sign, surrounding whitespace allowed; digit separators (`1_000`) and
/// non-ASCII digits are rejected. Booleans, `null` and containers are never timestamps.
pub fn timestamp_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| (i64::MIN as f64..i64::MAX as f64).contains(f))
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

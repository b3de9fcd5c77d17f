//! Per-field readers for stored records
//!
//! A record that parses as a JSON object is read field by field: a value of
//! the wrong shape falls back to that field's default instead of discarding
//! the whole record.

use serde_json::Value;

use crate::preferences::coerce_number;

/// JavaScript truthiness
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Boolean field; missing or `null` takes the default, anything else its truthiness
pub fn flag(value: Option<Value>, default: bool) -> bool {
    match value {
        None | Some(Value::Null) => default,
        Some(value) => truthy(&value),
    }
}

/// Integer field.
///
/// Fractions are truncated toward zero and numeric strings are coerced like
/// form input. Missing, `null`, empty, non-numeric and non-finite values take
/// the default. A stored zero is kept; the settings form treats it as unset.
pub fn number(value: Option<Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i,
            None => match n.as_f64() {
                Some(f) if f.is_finite() => f.trunc() as i64,
                _ => default,
            },
        },
        Some(Value::String(s)) => coerce_number(&s, default),
        _ => default,
    }
}

/// String field; non-strings take the default, an empty string is kept
pub fn text(value: Option<Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s,
        _ => default.to_string(),
    }
}

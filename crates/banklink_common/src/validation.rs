// --- File: crates/banklink_common/src/validation.rs ---
//! Request body validation rules shared by every API route.

use serde_json::{Map, Value};

/// Returns the subset of `keys` that are missing from `body`.
///
/// A key counts as missing when it is absent entirely or when its value is
/// "empty": `null`, `""`, `0` (any numeric zero) or `false`. Callers that
/// need to accept a legitimate zero or false must not route that field
/// through this check.
pub fn missing_keys<'k>(body: &Map<String, Value>, keys: &[&'k str]) -> Vec<&'k str> {
    keys.iter()
        .copied()
        .filter(|key| is_empty_value(body.get(*key)))
        .collect()
}

fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

/// Case-insensitive string equality.
///
/// Case differences are ignored; accent and other diacritic differences are
/// significant, so "MX" matches "mx" but never "MX2".
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

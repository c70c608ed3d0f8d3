//! Optional-path access into loosely shaped backend payloads.
//!
//! Backend summaries are untyped JSON whose fields may be missing, null, or
//! strings where numbers were expected. These helpers read a path and fall
//! back to a placeholder instead of failing.

use serde_json::Value;

use crate::format::format_number;

/// Walks object keys; any missing step yields `None`.
pub fn value_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |current, segment| current.get(*segment))
}

/// Numeric view of a field. Numeric strings are accepted.
pub fn number_at(root: &Value, path: &[&str]) -> Option<f64> {
    match value_at(root, path)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite())
}

/// Non-empty string field.
pub fn text_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    value_at(root, path)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Renders a field for display, substituting `placeholder` for anything
/// falsy: missing, null, zero, false, or an empty string.
pub fn display_at(root: &Value, path: &[&str], placeholder: &str) -> String {
    display_value(value_at(root, path), placeholder)
}

pub fn display_value(value: Option<&Value>, placeholder: &str) -> String {
    match value {
        Some(Value::Number(number)) => match number.as_f64() {
            Some(value) if value != 0.0 && value.is_finite() => format_number(value),
            _ => placeholder.to_string(),
        },
        Some(Value::String(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => placeholder.to_string(),
    }
}

/// `{key: count}` objects as ordered `(label, display)` pairs.
pub fn counts_at(root: &Value, path: &[&str]) -> Vec<(String, String)> {
    let Some(Value::Object(map)) = value_at(root, path) else {
        return Vec::new();
    };
    map.iter()
        .map(|(label, value)| (label.clone(), display_value(Some(value), "0")))
        .collect()
}

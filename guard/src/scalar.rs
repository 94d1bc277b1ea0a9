//! Generic scalar check, applied to every value regardless of its key

use serde_json::Value;

use crate::formats::FormatRules;

/// Strings must stay inside the general character set; numbers and every
/// other kind of value always pass.
pub fn is_general_format_valid(rules: &FormatRules, value: &Value) -> bool {
    match value {
        Value::String(s) => rules.is_general_match(s),
        Value::Number(_) => true,
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => true,
    }
}

/// Error text for a value rejected by [`is_general_format_valid`]
pub fn general_format_error(value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => s.as_str().to_owned(),
        other => other.to_string(),
    };
    format!("Invalid format for value '{}'", rendered)
}

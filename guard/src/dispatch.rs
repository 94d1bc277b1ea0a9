//! Field dispatcher
//!
//! Maps an object key to at most one [`FormatRule`]. The table is walked in
//! order and the first matching entry wins, so exact names are listed ahead
//! of the `id` substring fallback.

use serde_json::{Number, Value};

use crate::formats::{FormatRule, FormatRules};

/// How a registry entry matches an object key. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatcher {
    /// Key equals one of the listed names
    Exact(&'static [&'static str]),
    /// Key contains the fragment anywhere
    Contains(&'static str),
}

impl KeyMatcher {
    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyMatcher::Exact(names) => names.iter().any(|name| *name == key),
            KeyMatcher::Contains(fragment) => key.contains(*fragment),
        }
    }
}

/// Validator registry, in priority order
pub const FIELD_RULES: &[(KeyMatcher, FormatRule)] = &[
    (KeyMatcher::Exact(&["otp"]), FormatRule::Otp),
    (KeyMatcher::Exact(&["mobile", "contact", "phone"]), FormatRule::Mobile),
    (KeyMatcher::Exact(&["pan"]), FormatRule::Pan),
    (KeyMatcher::Exact(&["email"]), FormatRule::Email),
    (KeyMatcher::Contains("id"), FormatRule::Id),
];

/// Select the rule for a key, if any
pub fn rule_for_key(key: &str) -> Option<FormatRule> {
    FIELD_RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(key))
        .map(|(_, rule)| *rule)
}

/// Run the rule selected by `key` against `value`
pub fn dispatch(rules: &FormatRules, key: &str, value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if let Some(rule) = rule_for_key(key) {
        if let Err(message) = rules.check(rule, value) {
            errors.push(message);
        }
    }
    errors
}

/// Text form of a value as handed to the dispatcher.
///
/// Strings pass through unquoted and numbers use their decimal text, with
/// whole floats printed without a fraction (`123456.0` becomes `123456`).
/// Everything else uses its compact JSON text (`true`, `{"a":1}`).
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if is_whole_i64(f) => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

fn is_whole_i64(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

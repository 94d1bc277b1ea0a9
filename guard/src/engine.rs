//! Traversal engine
//!
//! Walks a decoded payload depth-first. For every object entry with a
//! non-null value the value is validated first and the key is dispatched
//! afterwards; array elements are validated but never dispatched, since they
//! have no key. Errors are collected for the whole tree.

use std::fmt;

use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

use crate::dispatch::{dispatch, stringify};
use crate::error::GuardError;
use crate::formats::FormatRules;
use crate::scalar::{general_format_error, is_general_format_valid};

static SHARED: OnceCell<PayloadValidator> = OnceCell::new();

/// One failed check.
///
/// `message` is the text reported to callers. `path` is a JSON pointer to the
/// offending value (`""` for the root) and is meant for server-side logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Validates JSON payloads against the field registry and the general
/// character check. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct PayloadValidator {
    rules: FormatRules,
}

impl PayloadValidator {
    pub fn new(rules: FormatRules) -> Self {
        Self { rules }
    }

    pub fn compile() -> Result<Self, GuardError> {
        Ok(Self::new(FormatRules::compile()?))
    }

    /// Process-wide validator, compiled on first call
    pub fn shared() -> Result<&'static PayloadValidator, GuardError> {
        SHARED.get_or_try_init(Self::compile)
    }

    pub fn rules(&self) -> &FormatRules {
        &self.rules
    }

    /// Error messages for every failed check, in traversal order.
    /// An empty vector means the payload is valid.
    pub fn validate(&self, value: &Value) -> Vec<String> {
        self.violations(value)
            .into_iter()
            .map(|violation| violation.message)
            .collect()
    }

    /// Same checks as [`validate`](Self::validate), keeping the location of
    /// each failure
    pub fn violations(&self, value: &Value) -> Vec<Violation> {
        let mut walker = Walker {
            rules: &self.rules,
            path: String::new(),
            found: Vec::new(),
        };
        walker.visit(value);
        if !walker.found.is_empty() {
            tracing::debug!(count = walker.found.len(), "payload failed validation");
        }
        walker.found
    }
}

struct Walker<'a> {
    rules: &'a FormatRules,
    path: String,
    found: Vec<Violation>,
}

impl Walker<'_> {
    fn visit(&mut self, value: &Value) {
        match value {
            Value::Object(map) => self.visit_object(map),
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let mark = self.push_segment(&index.to_string());
                    self.visit(item);
                    self.path.truncate(mark);
                }
            }
            scalar => {
                if !is_general_format_valid(self.rules, scalar) {
                    self.record(general_format_error(scalar));
                }
            }
        }
    }

    fn visit_object(&mut self, map: &Map<String, Value>) {
        for (key, value) in map {
            if value.is_null() {
                continue;
            }

            let mark = self.push_segment(key);
            self.visit(value);

            for message in dispatch(self.rules, key, &stringify(value)) {
                self.record(message);
            }
            self.path.truncate(mark);
        }
    }

    /// Append `/segment` to the current path, returning the length to restore
    fn push_segment(&mut self, segment: &str) -> usize {
        let mark = self.path.len();
        self.path.push('/');
        for c in segment.chars() {
            match c {
                '~' => self.path.push_str("~0"),
                '/' => self.path.push_str("~1"),
                other => self.path.push(other),
            }
        }
        mark
    }

    fn record(&mut self, message: String) {
        self.found.push(Violation {
            path: self.path.clone(),
            message,
        });
    }
}

//! Field-format validation for JSON request bodies.
//!
//! The crate walks a decoded [`serde_json::Value`] depth-first, runs a
//! generic allowed-character check on every scalar and, for object keys with
//! a recognised name, a named format rule on the (stringified) value. Errors
//! are accumulated across the whole tree instead of stopping at the first one.
//!
//! ```
//! use guard::PayloadValidator;
//! use serde_json::json;
//!
//! let validator = PayloadValidator::shared().unwrap();
//! let errors = validator.validate(&json!({"otp": "12345"}));
//! assert_eq!(errors, vec!["invalid OTP format".to_string()]);
//! ```

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod formats;
pub mod scalar;

pub use dispatch::{dispatch, rule_for_key, stringify, KeyMatcher, FIELD_RULES};
pub use engine::{PayloadValidator, Violation};
pub use error::GuardError;
pub use formats::{FormatRule, FormatRules};
pub use scalar::is_general_format_valid;

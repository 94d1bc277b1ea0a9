//! Format validators for named request fields
//!
//! Every pattern here is anchored to the whole value and compiled exactly once
//! by [`FormatRules::compile`]. Digit classes are spelled `[0-9]` because the
//! `regex` crate's `\d` also accepts non-ASCII digits.

use regex::Regex;

use crate::error::GuardError;

const OTP_PATTERN: &str = r"^[0-9]{6}$";
const MOBILE_PATTERN: &str = r"^[0-9]{10}$";
const PAN_PATTERN: &str = r"^[A-Z]{5}[0-9]{4}[A-Z]$";
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const ID_PATTERN: &str = r"^[A-Za-z=0-9]*$";

/// Allowed characters for any string value, whatever its key
const GENERAL_PATTERN: &str = r"^[ @/=a-zA-Z0-9.\-_]*$";

/// A named format rule selected by the field dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatRule {
    Otp,
    Mobile,
    Pan,
    Email,
    Id,
}

impl FormatRule {
    pub const ALL: [FormatRule; 5] = [
        FormatRule::Otp,
        FormatRule::Mobile,
        FormatRule::Pan,
        FormatRule::Email,
        FormatRule::Id,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormatRule::Otp => "otp",
            FormatRule::Mobile => "mobile",
            FormatRule::Pan => "pan",
            FormatRule::Email => "email",
            FormatRule::Id => "id",
        }
    }

    /// Error text reported when a value fails this rule
    pub fn message(self) -> &'static str {
        match self {
            FormatRule::Otp => "invalid OTP format",
            FormatRule::Mobile => "invalid mobile number format",
            FormatRule::Pan => "invalid PAN format",
            FormatRule::Email => "invalid email format",
            FormatRule::Id => "invalid ID format, should be alphanumeric",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            FormatRule::Otp => OTP_PATTERN,
            FormatRule::Mobile => MOBILE_PATTERN,
            FormatRule::Pan => PAN_PATTERN,
            FormatRule::Email => EMAIL_PATTERN,
            FormatRule::Id => ID_PATTERN,
        }
    }
}

/// Compiled matchers for every named rule plus the general character check
#[derive(Debug, Clone)]
pub struct FormatRules {
    otp: Regex,
    mobile: Regex,
    pan: Regex,
    email: Regex,
    id: Regex,
    general: Regex,
}

impl FormatRules {
    /// Compile all patterns. A failure here is a configuration error and
    /// should stop the process before it serves traffic.
    pub fn compile() -> Result<Self, GuardError> {
        Ok(Self {
            otp: compile_rule(FormatRule::Otp)?,
            mobile: compile_rule(FormatRule::Mobile)?,
            pan: compile_rule(FormatRule::Pan)?,
            email: compile_rule(FormatRule::Email)?,
            id: compile_rule(FormatRule::Id)?,
            general: compile_pattern("general", GENERAL_PATTERN)?,
        })
    }

    fn matcher(&self, rule: FormatRule) -> &Regex {
        match rule {
            FormatRule::Otp => &self.otp,
            FormatRule::Mobile => &self.mobile,
            FormatRule::Pan => &self.pan,
            FormatRule::Email => &self.email,
            FormatRule::Id => &self.id,
        }
    }

    /// Check a value against one named rule
    pub fn check(&self, rule: FormatRule, value: &str) -> Result<(), String> {
        if self.matcher(rule).is_match(value) {
            Ok(())
        } else {
            Err(rule.message().to_string())
        }
    }

    /// Exactly six ASCII digits
    pub fn validate_otp(&self, otp: &str) -> Result<(), String> {
        self.check(FormatRule::Otp, otp)
    }

    /// Exactly ten ASCII digits
    pub fn validate_mobile(&self, mobile: &str) -> Result<(), String> {
        self.check(FormatRule::Mobile, mobile)
    }

    /// Five uppercase letters, four digits, one uppercase letter
    pub fn validate_pan(&self, pan: &str) -> Result<(), String> {
        self.check(FormatRule::Pan, pan)
    }

    pub fn validate_email(&self, email: &str) -> Result<(), String> {
        self.check(FormatRule::Email, email)
    }

    /// ASCII letters, digits and `=`; empty is accepted
    pub fn validate_id(&self, value: &str) -> Result<(), String> {
        self.check(FormatRule::Id, value)
    }

    pub(crate) fn is_general_match(&self, value: &str) -> bool {
        self.general.is_match(value)
    }
}

fn compile_rule(rule: FormatRule) -> Result<Regex, GuardError> {
    compile_pattern(rule.name(), rule.pattern())
}

fn compile_pattern(rule: &'static str, pattern: &str) -> Result<Regex, GuardError> {
    Regex::new(pattern).map_err(|source| GuardError::InvalidPattern { rule, source })
}

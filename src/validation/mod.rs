//! Request schema validation.
//!
//! Request bodies deserialize into loose payload structs (every field optional),
//! then [`Validate`] turns them into the typed values the store accepts. A
//! payload either validates completely or yields a [`ValidationError`] listing
//! every offending field; handlers call the store only with validated values.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

pub const MIN_SKILL_LEVEL: i64 = 1;
pub const MAX_SKILL_LEVEL: i64 = 100;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const LEVEL_OUT_OF_RANGE: &str = "Level must be between 1 and 100";
pub const NOTHING_TO_UPDATE: &str = "No fields to update";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Outcome of validating one payload
pub type Validated<T> = Result<T, ValidationError>;

/// Typed conversion from a raw payload into a store-ready value
pub trait Validate {
    type Output;

    fn validate(self) -> Validated<Self::Output>;
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field_errors: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }
}

/// Collects per-field problems while a payload is checked.
///
/// The summary message follows a fixed precedence: missing fields first, then
/// the first rule-specific message recorded.
#[derive(Debug, Default)]
pub struct Checker {
    missing: Vec<&'static str>,
    rule_message: Option<&'static str>,
    field_errors: BTreeMap<String, String>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-blank string; the value comes back trimmed
    pub fn required(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        match non_blank(value) {
            Some(v) => Some(v.trim().to_string()),
            None => {
                self.missing.push(field);
                self.field_errors.insert(field.to_string(), "This field is required".to_string());
                None
            }
        }
    }

    /// Require a non-empty value kept byte-for-byte (passwords)
    pub fn required_verbatim(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        match value {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.missing.push(field);
                self.field_errors.insert(field.to_string(), "This field is required".to_string());
                None
            }
        }
    }

    /// Accept an absent field, but reject a present-and-blank one
    pub fn optional(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        match value {
            None => None,
            Some(v) if v.trim().is_empty() => {
                self.field_errors.insert(field.to_string(), "This field must not be empty".to_string());
                self.rule_message.get_or_insert(MISSING_FIELDS);
                None
            }
            Some(v) => Some(v.trim().to_string()),
        }
    }

    /// Require a level inside the skill range
    pub fn required_level(&mut self, field: &'static str, value: Option<i64>) -> Option<i32> {
        match value {
            None => {
                self.missing.push(field);
                self.field_errors.insert(field.to_string(), "This field is required".to_string());
                None
            }
            Some(level) => self.level(field, level),
        }
    }

    pub fn optional_level(&mut self, field: &'static str, value: Option<i64>) -> Option<i32> {
        value.and_then(|level| self.level(field, level))
    }

    fn level(&mut self, field: &'static str, level: i64) -> Option<i32> {
        if is_valid_level(level) {
            // Range check above guarantees the value fits
            Some(level as i32)
        } else {
            self.field_errors.insert(field.to_string(), LEVEL_OUT_OF_RANGE.to_string());
            self.rule_message.get_or_insert(LEVEL_OUT_OF_RANGE);
            None
        }
    }

    /// Require an email address matching the pattern exactly as sent.
    ///
    /// Unlike other text fields the value is not trimmed first, so surrounding
    /// whitespace makes the address invalid.
    pub fn required_email(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let email = non_blank(value);
        match &email {
            None => {
                self.missing.push(field);
                self.field_errors.insert(field.to_string(), "This field is required".to_string());
            }
            Some(email) if !is_valid_email(email) => {
                self.field_errors.insert(field.to_string(), INVALID_EMAIL.to_string());
                self.rule_message.get_or_insert(INVALID_EMAIL);
            }
            Some(_) => {}
        }
        email
    }

    /// Record a payload-level problem not tied to one field
    pub fn reject(&mut self, message: &'static str) {
        self.rule_message.get_or_insert(message);
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        let message = if !self.missing.is_empty() {
            MISSING_FIELDS
        } else if let Some(message) = self.rule_message {
            message
        } else {
            return Ok(());
        };

        Err(ValidationError {
            message: message.to_string(),
            field_errors: self.field_errors,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_level(level: i64) -> bool {
    (MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_matches_simple_addresses() {
        assert!(is_valid_email("bob@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(is_valid_email("x@y.z"));
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        for bad in [
            "not-an-email",
            "bob@example",
            "@example.com",
            "bob@.",
            "bob smith@example.com",
            "bob@exa mple.com",
            "bob@@example.com",
            "",
        ] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn level_bounds_are_inclusive() {
        assert!(!is_valid_level(0));
        assert!(is_valid_level(1));
        assert!(is_valid_level(100));
        assert!(!is_valid_level(101));
        assert!(!is_valid_level(-5));
        assert!(!is_valid_level(i64::MAX));
    }

    #[test]
    fn missing_fields_take_precedence_over_rule_errors() {
        let mut checker = Checker::new();
        checker.required("name", None);
        checker.required_level("level", Some(500));

        let err = checker.finish().unwrap_err();
        assert_eq!(err.message, MISSING_FIELDS);
        assert_eq!(err.field_errors["name"], "This field is required");
        assert_eq!(err.field_errors["level"], LEVEL_OUT_OF_RANGE);
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut checker = Checker::new();
        assert_eq!(checker.required("title", Some("   ".into())), None);
        assert_eq!(checker.finish().unwrap_err().message, MISSING_FIELDS);
    }

    #[test]
    fn out_of_range_level_alone_is_reported() {
        let mut checker = Checker::new();
        checker.required("name", Some("Rust".into()));
        checker.optional_level("level", Some(0));

        let err = checker.finish().unwrap_err();
        assert_eq!(err.message, LEVEL_OUT_OF_RANGE);
    }

    #[test]
    fn clean_payload_passes() {
        let mut checker = Checker::new();
        let email = checker.required_email("email", Some("bob@example.com".into()));
        assert_eq!(email.as_deref(), Some("bob@example.com"));
        assert!(checker.finish().is_ok());
    }

    #[test]
    fn email_is_checked_before_any_trimming() {
        for padded in [" bob@example.com", "bob@example.com ", "\tbob@example.com\n"] {
            let mut checker = Checker::new();
            checker.required_email("email", Some(padded.into()));
            let err = checker.finish().unwrap_err();
            assert_eq!(err.message, INVALID_EMAIL, "{padded:?}");
        }
    }

    #[test]
    fn blank_email_is_missing_not_malformed() {
        let mut checker = Checker::new();
        assert_eq!(checker.required_email("email", Some("   ".into())), None);
        assert_eq!(checker.finish().unwrap_err().message, MISSING_FIELDS);
    }
}

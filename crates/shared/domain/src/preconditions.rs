//! Validation primitives shared by every value object.
//!
//! All null and pattern checks in the domain go through these helpers so the
//! rules live in exactly one place.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{EMAIL_REGEX, PHONE_REGEX, PROCEDURE_NAME_REGEX};
use crate::error::{DomainError, DomainResult};

pub static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_REGEX).expect("phone regex should compile"));

pub static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_REGEX).expect("email regex should compile"));

pub static PROCEDURE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(PROCEDURE_NAME_REGEX).expect("procedure name regex should compile")
});

/// Unwrap a required value, failing with a validation error if it is absent.
pub fn require_non_null<T>(value: Option<T>, field: &str) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::validation(format!("{} is required", field)))
}

/// Require `pattern` to match the whole of `value`.
///
/// Anchors in the pattern are not relied upon: a match that leaves any prefix
/// or suffix of `value` uncovered is rejected.
pub fn require_matches(value: &str, pattern: &Regex, field: &str) -> DomainResult<()> {
    let full = pattern
        .find(value)
        .is_some_and(|m| m.start() == 0 && m.end() == value.len());

    require_true(full, format!("{} has an invalid format", field))
}

/// Fail with `message` unless `condition` holds.
pub fn require_true(condition: bool, message: impl Into<String>) -> DomainResult<()> {
    if condition {
        Ok(())
    } else {
        Err(DomainError::validation(message))
    }
}

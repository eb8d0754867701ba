//! Form field validation for the login and registration flows.
//!
//! Checks run in a fixed order: presence first, then format. The first
//! failure wins, so a blank email is always reported as
//! [`ValidationError::MissingField`] and never as a format problem.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// `local "@" domain "." tld`, each part non-empty, no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Return the field value if it is present and not blank.
///
/// Whitespace-only input counts as missing. The returned slice is the
/// original, untrimmed value.
pub fn require_field(value: Option<&str>) -> Result<&str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField),
    }
}

/// Check that `email` has the `local@domain.tld` shape.
pub fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat)
    }
}

/// Presence plus format check for an email field.
pub fn validate_email(value: Option<&str>) -> Result<&str, ValidationError> {
    let email = require_field(value)?;
    validate_email_format(email)?;
    Ok(email)
}

/// Substring of `email` preceding the first `@`.
///
/// Only meaningful for addresses that passed [`validate_email_format`];
/// returns the whole input when there is no `@`.
pub fn local_part(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

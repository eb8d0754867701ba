//! One-shot messages carried in the redirect query string.
//!
//! Page handlers never fail with an error status. Every outcome becomes a
//! `303 See Other` redirect whose `error` or `success` query parameter is
//! rendered by the target page.

use axum::response::Redirect;
use luxrent_core::error::{CoreError, ValidationError};
use serde::Deserialize;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const NAME_AND_EMAIL_REQUIRED: &str = "Name and email are required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const LOGIN_REQUIRED: &str = "Please log in to access the dashboard";
pub const ACCOUNT_CREATED: &str = "Account created successfully!";
pub const LOGGED_OUT: &str = "You have been logged out";
pub const TRY_AGAIN: &str = "Something went wrong, please try again";

/// Query parameters understood by every page.
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Redirect to `path` with `?error=<message>`.
pub fn redirect_error(path: &str, message: &str) -> Redirect {
    redirect_with(path, "error", message)
}

/// Redirect to `path` with `?success=<message>`.
pub fn redirect_success(path: &str, message: &str) -> Redirect {
    redirect_with(path, "success", message)
}

/// Human-readable message for a failed form submission.
///
/// `missing` is the form-specific wording for a blank field.
pub fn describe(err: &CoreError, missing: &'static str) -> &'static str {
    match err {
        CoreError::Validation(ValidationError::MissingField) => missing,
        CoreError::Validation(ValidationError::InvalidFormat) => INVALID_EMAIL,
        CoreError::Unauthenticated => LOGIN_REQUIRED,
        CoreError::Store(e) => {
            tracing::error!(error = %e, "Session store failure during form handling");
            TRY_AGAIN
        }
    }
}

fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    match serde_urlencoded::to_string([(key, message)]) {
        Ok(query) => Redirect::to(&format!("{path}?{query}")),
        Err(e) => {
            tracing::warn!(error = %e, "Could not encode flash message");
            Redirect::to(path)
        }
    }
}

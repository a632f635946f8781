//! Input validation utilities for account service
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

/// Minimum password length accepted at registration (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 6;

// Compiled once on first use
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// A value counts as present when it has at least one non-whitespace character
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// validator crate compatible "required" check
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if is_present(value) {
        Ok(())
    } else {
        Err(failure("required", "This field is required."))
    }
}

/// validator crate compatible password check: required, then minimum length
pub fn validate_password_field(password: &str) -> Result<(), ValidationError> {
    validate_required(password)?;
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(failure(
            "length",
            "Field must be at least 6 characters long.",
        ));
    }
    Ok(())
}

/// validator crate compatible email check: required, then shape
pub fn validate_email_field(email: &str) -> Result<(), ValidationError> {
    validate_required(email)?;
    if !validate_email(email) {
        return Err(failure("email", "Invalid email address."));
    }
    Ok(())
}

//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Request bodies use camelCase keys and reject
//! unknown fields.

pub mod appliance;
pub mod contact;
pub mod document;
pub mod health;
pub mod stats;
pub mod task;
pub mod user;

use validator::{ValidateEmail, ValidateUrl, ValidationError};

/// Rejects strings that are empty after trimming.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Checks an optional email, letting blank input through.
///
/// Blank values are stored as `NULL` by [`crate::utils::text::normalize_optional`].
pub fn optional_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email").with_message("Invalid email format".into()))
}

/// Checks an optional URL, letting blank input through.
pub fn optional_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_url() {
        return Ok(());
    }
    Err(ValidationError::new("url").with_message("Invalid URL format".into()))
}

/// Trims a required text field.
pub(crate) fn trimmed(value: String) -> String {
    value.trim().to_string()
}

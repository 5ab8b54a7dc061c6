//! Small helpers for cleaning user-supplied text.

/// Trims a value and turns blank strings into `None`.
///
/// Form clients send empty strings for untouched optional inputs; storing
/// them as `NULL` keeps "not provided" distinct from real values.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Returns the part of an email address before the `@`.
///
/// Falls back to the whole input when it contains no `@`.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Case-insensitive substring match used by the appliance search.
///
/// An empty (or whitespace-only) needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

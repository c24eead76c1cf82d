//! Input validation primitives.
//!
//! These replace verbose `ok_or_else` + `Error::validation_invalid_argument` chains.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None))
    } else {
        Ok(trimmed)
    }
}

/// Require both or neither of a pair of optional arguments.
///
/// Returns the pair when both are present, `None` when both are absent.
pub fn require_pair<'a>(
    first: Option<&'a str>,
    second: Option<&'a str>,
    first_field: &str,
    second_field: &str,
) -> Result<Option<(&'a str, &'a str)>> {
    match (first, second) {
        (Some(a), Some(b)) => Ok(Some((a, b))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(Error::validation_missing_argument(vec![
            second_field.to_string(),
        ])
        .with_hint(format!("--{} requires --{}", first_field, second_field))),
        (None, Some(_)) => Err(Error::validation_missing_argument(vec![
            first_field.to_string(),
        ])
        .with_hint(format!("--{} requires --{}", second_field, first_field))),
    }
}

/// Normalize a file extension: trim whitespace and a single leading dot.
pub fn normalize_extension(value: &str) -> Result<String> {
    let trimmed = require_non_empty(value, "extension", "Extension cannot be empty")?;
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if bare.is_empty() || bare.contains('/') || bare.contains('\\') {
        return Err(Error::validation_invalid_argument(
            "extension",
            format!("'{}' is not a valid file extension", value),
            None,
        ));
    }
    Ok(bare.to_string())
}

//! Field validators for input validation
//!
//! Small reusable checks shared by the header and body validators. Lengths
//! are counted in characters, not bytes.

use lazy_static::lazy_static;
use regex::Regex;
use shared::{size_message, MSG_HEADER_PATTERN, MSG_NOT_BLANK};

lazy_static! {
    /// Header values: ASCII letters and digits only (empty matches)
    static ref ALPHANUMERIC_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]*$").unwrap();
}

/// Validate that a value is present and not whitespace-only
pub fn validate_not_blank(value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(MSG_NOT_BLANK.to_string()),
    }
}

/// Validate string length within inclusive bounds
pub fn validate_size(value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(size_message(min, max));
    }
    Ok(())
}

/// Validate that a string only contains ASCII letters and digits
pub fn validate_alphanumeric(value: &str) -> Result<(), String> {
    if !ALPHANUMERIC_REGEX.is_match(value) {
        return Err(MSG_HEADER_PATTERN.to_string());
    }
    Ok(())
}

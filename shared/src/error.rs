use serde::{Deserialize, Serialize};
use std::fmt;

pub const MSG_NOT_BLANK: &str = "must not be blank";
pub const MSG_HEADER_SIZE: &str = "Size failure";
pub const MSG_HEADER_PATTERN: &str = "Regex validation failure";
pub const MSG_DUPLICATE: &str = "Duplicate Request";
pub const MSG_NOT_FOUND: &str = "Resource not found";
pub const MSG_INTERNAL: &str = "An unexpected error occurred";
pub const MSG_UNAVAILABLE: &str = "Store unavailable";

/// Symbolic error classes carried in `errorCode`
///
/// The string forms are stable keys for clients and for any message
/// localisation layer placed in front of this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    RequestError,
    HeaderError,
    HeaderSize,
    HeaderPattern,
    Duplicate,
    NotFound,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // "cosomoram" is the key existing clients already match on.
            ErrorCode::RequestError => "cosomoram.application.request_error",
            ErrorCode::HeaderError => "cosmoram.application.header_error",
            ErrorCode::HeaderSize => "cosmoram.application.header_size_error",
            ErrorCode::HeaderPattern => "cosmoram.application.header_regex_error",
            ErrorCode::Duplicate => "cosomoram.application.duplicate_request",
            ErrorCode::NotFound => "cosmoram.application.not_found",
            ErrorCode::Internal => "cosmoram.application.internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured failure reported to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field: String,
    pub error_code: String,
    pub error_message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error_code: code.as_str().to_string(),
            error_message: message.into(),
        }
    }

    pub fn not_blank(field: impl Into<String>) -> Self {
        Self::new(field, ErrorCode::RequestError, MSG_NOT_BLANK)
    }

    pub fn size(field: impl Into<String>, min: usize, max: usize) -> Self {
        Self::new(field, ErrorCode::RequestError, size_message(min, max))
    }

    pub fn missing_header(header: &str) -> Self {
        Self::new(header, ErrorCode::HeaderError, missing_header_message(header))
    }

    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::new(field, ErrorCode::Duplicate, MSG_DUPLICATE)
    }

    pub fn not_found() -> Self {
        Self::new("", ErrorCode::NotFound, MSG_NOT_FOUND)
    }
}

pub fn size_message(min: usize, max: usize) -> String {
    format!("size must be between {} and {}", min, max)
}

pub fn missing_header_message(header: &str) -> String {
    format!(
        "Required request header '{}' for method parameter type String is not present",
        header
    )
}

/// Uniform error envelope: `{"errors": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<ValidationError>,
}

impl ErrorResponse {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

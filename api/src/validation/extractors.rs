//! Custom Axum extractors for validated input
//!
//! `RequiredHeaders` pulls the three mandatory tracing headers out of the
//! request and rejects the request when any of them is absent. Value
//! constraints are checked later by the header validator.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use shared::{ErrorCode, ValidationError};
use std::str::FromStr;

use crate::error::ApiError;

pub const HEADER_USER_ID: &str = "user-id";
pub const HEADER_SESSION_ID: &str = "session-id";
pub const HEADER_CORRELATION_ID: &str = "correlation-id";

/// Headers in the order they are checked for presence
const REQUIRED_HEADERS: [&str; 3] = [HEADER_USER_ID, HEADER_SESSION_ID, HEADER_CORRELATION_ID];

/// How many missing headers to report in one rejection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingHeaderPolicy {
    /// Report only the first missing header
    #[default]
    First,
    /// Report every missing header
    All,
}

impl FromStr for MissingHeaderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(MissingHeaderPolicy::First),
            "all" => Ok(MissingHeaderPolicy::All),
            _ => Err(format!("Unknown missing header policy: {}", s)),
        }
    }
}

/// The mandatory request headers, all present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredHeaders {
    pub user_id: String,
    pub session_id: String,
    pub correlation_id: String,
}

impl RequiredHeaders {
    /// Read the required headers, reporting absent ones per `policy`.
    pub fn from_headers(
        headers: &HeaderMap,
        policy: MissingHeaderPolicy,
    ) -> Result<Self, Vec<ValidationError>> {
        // Non-ASCII bytes survive lossily so the charset check reports them.
        let read = |name: &str| {
            headers
                .get(name)
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        };

        match (
            read(HEADER_USER_ID),
            read(HEADER_SESSION_ID),
            read(HEADER_CORRELATION_ID),
        ) {
            (Some(user_id), Some(session_id), Some(correlation_id)) => Ok(Self {
                user_id,
                session_id,
                correlation_id,
            }),
            (user_id, session_id, correlation_id) => {
                let present = [user_id.is_some(), session_id.is_some(), correlation_id.is_some()];
                let mut missing: Vec<ValidationError> = REQUIRED_HEADERS
                    .iter()
                    .zip(present)
                    .filter(|(_, present)| !present)
                    .map(|(name, _)| ValidationError::missing_header(name))
                    .collect();
                if policy == MissingHeaderPolicy::First {
                    missing.truncate(1);
                }
                Err(missing)
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequiredHeaders
where
    S: Send + Sync,
    MissingHeaderPolicy: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let policy = MissingHeaderPolicy::from_ref(state);
        RequiredHeaders::from_headers(&parts.headers, policy).map_err(ApiError::missing_headers)
    }
}

/// Trait for request bodies that carry their own field rules
pub trait Validatable {
    /// Validate the data and return every field error, in field order
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

/// Builder for accumulating validation errors
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<ValidationError>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Add an error under `code` if the validator returns Err
    pub fn check<F>(&mut self, field: &str, code: ErrorCode, validator: F) -> &mut Self
    where
        F: FnOnce() -> Result<(), String>,
    {
        if let Err(message) = validator() {
            self.errors.push(ValidationError::new(field, code, message));
        }
        self
    }

    /// Add an error directly
    pub fn add_error(&mut self, error: ValidationError) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Finish building and return Result
    pub fn build(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

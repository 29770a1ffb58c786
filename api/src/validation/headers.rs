//! Header value validation
//!
//! Every required header gets both a length and a charset check, and every
//! header is checked even after an earlier one fails.

use shared::{ErrorCode, ValidationError, MSG_HEADER_SIZE};

use super::extractors::{RequiredHeaders, ValidationBuilder};
use super::validators::{validate_alphanumeric, validate_size};

/// Inclusive length bounds for one header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// Length bounds for the required headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRules {
    pub session_id: LengthBounds,
    pub user_id: LengthBounds,
    pub correlation_id: LengthBounds,
}

impl Default for HeaderRules {
    fn default() -> Self {
        Self {
            session_id: LengthBounds::new(3, 128),
            user_id: LengthBounds::new(3, 10),
            correlation_id: LengthBounds::new(3, 360),
        }
    }
}

impl HeaderRules {
    /// Validate the header values, collecting every violation.
    ///
    /// Errors are tagged with the logical header names `sessionId`,
    /// `userId` and `correlationId`, in that order.
    pub fn validate(&self, headers: &RequiredHeaders) -> Result<(), Vec<ValidationError>> {
        let mut builder = ValidationBuilder::new();

        check_header(&mut builder, "sessionId", &headers.session_id, self.session_id);
        check_header(&mut builder, "userId", &headers.user_id, self.user_id);
        check_header(
            &mut builder,
            "correlationId",
            &headers.correlation_id,
            self.correlation_id,
        );

        builder.build()
    }
}

fn check_header(builder: &mut ValidationBuilder, name: &str, value: &str, bounds: LengthBounds) {
    builder.check(name, ErrorCode::HeaderSize, || {
        validate_size(value, bounds.min, bounds.max).map_err(|_| MSG_HEADER_SIZE.to_string())
    });
    builder.check(name, ErrorCode::HeaderPattern, || validate_alphanumeric(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(session_id: &str, user_id: &str, correlation_id: &str) -> RequiredHeaders {
        RequiredHeaders {
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            correlation_id: correlation_id.to_string(),
        }
    }

    #[test]
    fn test_valid_headers_pass() {
        let rules = HeaderRules::default();
        assert!(rules
            .validate(&headers("DummySession", "DummyUser", "DummyCorrelation"))
            .is_ok());
    }

    #[test]
    fn test_user_id_too_long_is_size_failure() {
        let rules = HeaderRules::default();
        let errors = rules
            .validate(&headers("DummySession", "DummyUser12", "DummyCorrelation"))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "userId");
        assert_eq!(errors[0].error_code, ErrorCode::HeaderSize.as_str());
        assert_eq!(errors[0].error_message, "Size failure");
    }

    #[test]
    fn test_one_header_can_fail_both_checks() {
        let rules = HeaderRules::default();
        let errors = rules
            .validate(&headers("DummySession", "a-", "DummyCorrelation"))
            .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.field == "userId"));
        assert_eq!(errors[0].error_code, ErrorCode::HeaderSize.as_str());
        assert_eq!(errors[1].error_code, ErrorCode::HeaderPattern.as_str());
        assert_eq!(errors[1].error_message, "Regex validation failure");
    }

    #[test]
    fn test_empty_value_fails_size_only() {
        let rules = HeaderRules::default();
        let errors = rules
            .validate(&headers("", "DummyUser", "DummyCorrelation"))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "sessionId");
        assert_eq!(errors[0].error_code, ErrorCode::HeaderSize.as_str());
    }

    #[test]
    fn test_all_headers_checked_in_order() {
        let rules = HeaderRules::default();
        let errors = rules.validate(&headers("s!", "u!", "c!")).unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["sessionId", "sessionId", "userId", "userId", "correlationId", "correlationId"]
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let rules = HeaderRules::default();
        let session = "s".repeat(128);
        let correlation = "c".repeat(360);
        assert!(rules.validate(&headers(&session, "abc", &correlation)).is_ok());

        let session = "s".repeat(129);
        let errors = rules.validate(&headers(&session, "abc", "abc")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "sessionId");
    }

    #[test]
    fn test_validation_is_repeatable() {
        let rules = HeaderRules::default();
        let input = headers("a b", "x", "c-c");
        assert_eq!(rules.validate(&input), rules.validate(&input));
    }
}

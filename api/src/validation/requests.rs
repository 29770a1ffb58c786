//! Validation implementations for API request types

use shared::{
    ApplicationRequest, ErrorCode, ValidationError, CODE_LENGTH, DESC_MAX_LENGTH,
    DESC_MIN_LENGTH, NAME_MAX_LENGTH, NAME_MIN_LENGTH,
};

use super::extractors::{Validatable, ValidationBuilder};
use super::validators::{validate_not_blank, validate_size};

// ─────────────────────────────────────────────────────────────────────────────
// ApplicationRequest validation
// ─────────────────────────────────────────────────────────────────────────────

impl Validatable for ApplicationRequest {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut builder = ValidationBuilder::new();

        check_field(&mut builder, "code", self.code.as_deref(), CODE_LENGTH, CODE_LENGTH);
        check_field(
            &mut builder,
            "name",
            self.name.as_deref(),
            NAME_MIN_LENGTH,
            NAME_MAX_LENGTH,
        );
        check_field(
            &mut builder,
            "desc",
            self.desc.as_deref(),
            DESC_MIN_LENGTH,
            DESC_MAX_LENGTH,
        );

        builder.build()
    }
}

/// Blank wins over size: a blank field reports only the not-blank error.
fn check_field(
    builder: &mut ValidationBuilder,
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) {
    if let Err(message) = validate_not_blank(value) {
        builder.add_error(ValidationError::new(field, ErrorCode::RequestError, message));
        return;
    }
    let value = value.unwrap_or_default();
    builder.check(field, ErrorCode::RequestError, || validate_size(value, min, max));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ApplicationRequest {
        ApplicationRequest::new("200005405", "Credit Finance Edge", "AR for NCL")
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_missing_code_is_not_blank() {
        let req = ApplicationRequest {
            code: None,
            ..valid()
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors, vec![ValidationError::not_blank("code")]);
    }

    #[test]
    fn test_whitespace_name_reports_only_not_blank() {
        let req = ApplicationRequest {
            name: Some("   ".to_string()),
            ..valid()
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].error_message, "must not be blank");
    }

    #[test]
    fn test_code_length_must_be_exact() {
        for code in ["2000", "20002000000000000"] {
            let req = ApplicationRequest {
                code: Some(code.to_string()),
                ..valid()
            };
            let errors = req.validate().unwrap_err();
            assert_eq!(errors, vec![ValidationError::size("code", 9, 9)]);
        }
    }

    #[test]
    fn test_name_bounds() {
        let short = ApplicationRequest {
            name: Some("Cr".to_string()),
            ..valid()
        };
        assert_eq!(
            short.validate().unwrap_err()[0].error_message,
            "size must be between 3 and 50"
        );

        let long = ApplicationRequest {
            name: Some("1234567890123456789012345678901234567890123456789012".to_string()),
            ..valid()
        };
        assert_eq!(long.validate().unwrap_err(), vec![ValidationError::size("name", 3, 50)]);
    }

    #[test]
    fn test_desc_bounds() {
        let short = ApplicationRequest {
            desc: Some("AR".to_string()),
            ..valid()
        };
        assert_eq!(short.validate().unwrap_err(), vec![ValidationError::size("desc", 3, 250)]);

        let long = ApplicationRequest {
            desc: Some("1234567890".repeat(30)),
            ..valid()
        };
        assert_eq!(long.validate().unwrap_err(), vec![ValidationError::size("desc", 3, 250)]);
    }

    #[test]
    fn test_errors_follow_field_declaration_order() {
        let req = ApplicationRequest {
            code: Some("1".to_string()),
            name: None,
            desc: Some("x".to_string()),
        };
        let fields: Vec<String> = req.validate().unwrap_err().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["code", "name", "desc"]);
    }

    #[test]
    fn test_empty_body_reports_all_fields() {
        let errors = ApplicationRequest::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::not_blank("code"),
                ValidationError::not_blank("name"),
                ValidationError::not_blank("desc"),
            ]
        );
    }
}

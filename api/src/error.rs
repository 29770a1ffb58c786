use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ErrorCode, ErrorResponse, ValidationError, MSG_INTERNAL, MSG_UNAVAILABLE};

/// Which stage of request handling rejected the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingHeader,
    HeaderViolation,
    FieldViolation,
    Duplicate,
    NotFound,
    Internal,
    Unavailable,
}

impl ErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::MissingHeader
            | ErrorKind::HeaderViolation
            | ErrorKind::FieldViolation
            | ErrorKind::Duplicate => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Metric label for client-caused rejections
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::MissingHeader => "missing_header",
            ErrorKind::HeaderViolation => "header",
            ErrorKind::FieldViolation => "body",
            ErrorKind::Duplicate => "duplicate",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Internal => "internal",
            ErrorKind::Unavailable => "unavailable",
        }
    }
}

/// Every failure the API reports, rendered as `{"errors": [...]}`
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    errors: Vec<ValidationError>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, errors: Vec<ValidationError>) -> Self {
        Self { kind, errors }
    }

    pub fn missing_headers(errors: Vec<ValidationError>) -> Self {
        Self::new(ErrorKind::MissingHeader, errors)
    }

    pub fn header_violations(errors: Vec<ValidationError>) -> Self {
        Self::new(ErrorKind::HeaderViolation, errors)
    }

    pub fn field_violations(errors: Vec<ValidationError>) -> Self {
        Self::new(ErrorKind::FieldViolation, errors)
    }

    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self::field_violations(vec![ValidationError::new(
            "body",
            ErrorCode::RequestError,
            message,
        )])
    }

    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::new(ErrorKind::Duplicate, vec![ValidationError::duplicate(field)])
    }

    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound, vec![ValidationError::not_found()])
    }

    pub fn internal() -> Self {
        Self::new(
            ErrorKind::Internal,
            vec![ValidationError::new("", ErrorCode::Internal, MSG_INTERNAL)],
        )
    }

    pub fn unavailable() -> Self {
        Self::new(
            ErrorKind::Unavailable,
            vec![ValidationError::new("", ErrorCode::Internal, MSG_UNAVAILABLE)],
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.kind.status(), Json(ErrorResponse::new(self.errors))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

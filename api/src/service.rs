//! Application registration pipeline
//!
//! Order of checks: header presence, header values, body parse, body
//! fields, duplicate lookup, insert. The first failing stage ends the
//! request, and no stage after a failure touches the store.

use axum::extract::rejection::JsonRejection;
use shared::{Application, ApplicationRequest};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::store::{ApplicationStore, StoreError};
use crate::validation::{HeaderRules, RequiredHeaders, Validatable};

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn ApplicationStore>,
    header_rules: HeaderRules,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn ApplicationStore>, header_rules: HeaderRules) -> Self {
        Self {
            store,
            header_rules,
        }
    }

    pub fn store(&self) -> &Arc<dyn ApplicationStore> {
        &self.store
    }

    /// Validate and persist one application.
    ///
    /// Both inputs are raw extraction results so that failures are reported
    /// in pipeline order: a malformed body only surfaces once the headers
    /// have passed.
    pub async fn register(
        &self,
        headers: Result<RequiredHeaders, ApiError>,
        payload: Result<ApplicationRequest, JsonRejection>,
    ) -> ApiResult<Application> {
        let headers = headers.map_err(record_rejection)?;

        self.header_rules
            .validate(&headers)
            .map_err(ApiError::header_violations)
            .map_err(record_rejection)?;

        let request = payload
            .map_err(map_json_rejection)
            .map_err(record_rejection)?;

        request
            .validate()
            .map_err(ApiError::field_violations)
            .map_err(record_rejection)?;

        let Some(new_application) = request.into_new_application() else {
            error!("validated application request is missing a field");
            return Err(ApiError::internal());
        };

        match self.store.find_by_code(&new_application.code).await {
            Ok(Some(_)) => return Err(record_rejection(ApiError::duplicate("code"))),
            Ok(None) => {}
            Err(err) => return Err(store_failure("find application by code", err)),
        }

        let stored = self
            .store
            .insert(new_application)
            .await
            .map_err(|err| match err {
                // Lost a race with a concurrent insert of the same code.
                StoreError::Conflict { .. } => record_rejection(ApiError::duplicate("code")),
                other => store_failure("insert application", other),
            })?;

        metrics::APPLICATIONS_CREATED.inc();
        info!(
            id = ?stored.id,
            code = %stored.code,
            correlation_id = %headers.correlation_id,
            "application registered"
        );

        Ok(stored)
    }
}

fn map_json_rejection(err: JsonRejection) -> ApiError {
    let message = match err {
        JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {}", e.body_text()),
        JsonRejection::JsonSyntaxError(e) => format!("JSON syntax error: {}", e.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type must be application/json".to_string()
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Invalid JSON payload".to_string(),
    };
    ApiError::malformed_body(message)
}

fn record_rejection(err: ApiError) -> ApiError {
    let kind = err.kind();
    metrics::APPLICATION_REJECTIONS
        .with_label_values(&[kind.label()])
        .inc();

    warn!(
        kind = kind.label(),
        errors = err.errors().len(),
        "application registration rejected"
    );
    err
}

fn store_failure(operation: &str, err: StoreError) -> ApiError {
    error!(operation = operation, error = ?err, "store operation failed");
    ApiError::internal()
}

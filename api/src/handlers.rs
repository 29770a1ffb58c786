use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use shared::{Application, ApplicationRequest};
use tracing::{debug, warn};

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    state::AppState,
    validation::RequiredHeaders,
};

/// Liveness: 200 with an empty body
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// `GET /application/health`; every other version segment is unknown
///
/// Shares its path with `POST /application/:version`, so a POST to
/// `/application/health` still registers an application.
pub async fn application_health(
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    match version_segment(path)?.as_str() {
        "health" => Ok(health_check().await),
        _ => Err(ApiError::not_found()),
    }
}

/// Readiness: 200 when the store answers, 503 otherwise
pub async fn readiness_check(State(state): State<AppState>) -> ApiResult<StatusCode> {
    let uptime = state.started_at.elapsed().as_secs();

    match state.service.store().ping().await {
        Ok(()) => {
            debug!(uptime_secs = uptime, "readiness check passed");
            Ok(StatusCode::OK)
        }
        Err(err) => {
            warn!(uptime_secs = uptime, error = %err, "readiness check failed: store unreachable");
            Err(ApiError::unavailable())
        }
    }
}

/// Register a new application
///
/// Headers and body are taken as raw extraction results and handed to the
/// service, which reports failures in pipeline order.
pub async fn create_application(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: Result<RequiredHeaders, ApiError>,
    payload: Result<Json<ApplicationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Application>)> {
    let version = version_segment(path)?;
    debug!(version = %version, "create application request");

    let created = state
        .service
        .register(headers, payload.map(|Json(request)| request))
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let body = metrics::gather_metrics(&state.registry);
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found()
}

/// A version segment that does not decode to UTF-8 names no resource.
fn version_segment(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    path.map(|Path(version)| version).map_err(|rejection| {
        debug!(error = %rejection.body_text(), "undecodable version segment");
        ApiError::not_found()
    })
}

use axum::{routing::get, Router};

use crate::{handlers, state::AppState};

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(handlers::metrics_endpoint))
}

pub fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/application/:version",
            get(handlers::application_health).post(handlers::create_application),
        )
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/health/ready", get(handlers::readiness_check))
}

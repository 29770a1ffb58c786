pub mod config;
pub mod error;
pub mod handlers;
pub mod logging_middleware;
pub mod metrics;
pub mod observability;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod validation;

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full HTTP router over `state`
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::application_routes())
        .merge(routes::health_routes())
        .merge(routes::observability_routes())
        .fallback(handlers::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(logging_middleware::request_logger)),
        )
        .with_state(state)
}

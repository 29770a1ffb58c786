use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

use crate::metrics;

/// Label used for requests that matched no route
const UNMATCHED_PATH: &str = "unmatched";

/// Log every request and record its latency
///
/// Metrics are labelled with the route template, not the raw path, so
/// versions and unknown URLs do not create new series.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    tracing::info!("{method} {uri} {status} {}ms", elapsed.as_millis());
    metrics::observe_http(method.as_str(), &route, status, elapsed.as_secs_f64());

    response
}

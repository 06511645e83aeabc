//! Request logging.

use std::time::Instant;

use axum::http::HeaderValue;
use axum::{middleware::Next, response::Response};
use uuid::Uuid;

/// Log one line per request: request id, method, path, status, latency.
///
/// The generated request id is echoed back in the `x-request-id` response
/// header so callers can quote it when reporting a failure.
pub async fn request_log(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let request_id = Uuid::now_v7();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let started = Instant::now();
    let mut response = next.run(req).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert("x-request-id", value);
    }

    if status.is_server_error() {
        tracing::warn!(
            %request_id,
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms,
            "request failed"
        );
    } else {
        tracing::info!(
            %request_id,
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms,
            "request completed"
        );
    }

    response
}

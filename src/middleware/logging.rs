//! Request logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Header carrying the per-request correlation id
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Log method, path, status and latency of every request.
///
/// Reuses an incoming `x-request-id` or assigns one, and echoes it on the
/// response so judge errors can be matched to client reports.
pub async fn logging_middleware(mut request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        request.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    span.in_scope(|| {
        if status.is_server_error() {
            warn!(method = %method, path = %path, status = status.as_u16(), duration_ms = %duration_ms, "Request failed");
        } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
            warn!(method = %method, path = %path, status = status.as_u16(), duration_ms = %duration_ms, "Request rejected");
        } else {
            info!(method = %method, path = %path, status = status.as_u16(), duration_ms = %duration_ms, "Request completed");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }

    response
}

//! Request ID middleware for correlating logs with requests.
//!
//! Generates a UUID v4 for each incoming request and creates a tracing span
//! that wraps the request lifecycle. Probe traffic is frequent and usually
//! boring, so healthy responses complete at debug level while error
//! responses log at warn - an unhealthy period stands out in the logs
//! without the happy path drowning them.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Middleware that generates a request ID and creates a request span.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including other middleware and handlers.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        let span = tracing::Span::current();
        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        if status.is_success() {
            tracing::debug!("Request completed");
        } else {
            tracing::warn!(status = status.as_u16(), "Request completed unhealthy");
        }

        response
    }
    .instrument(span)
    .await
}

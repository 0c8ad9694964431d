//! HTTP route handlers.
//!
//! The service exposes a single health endpoint. It is mounted with `any` so
//! the handler owns method dispatch: a non-GET request must still produce a
//! well-formed report body with a `method` check, which axum's automatic 405
//! handling would not do.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;

use axum::{middleware, routing::any, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_HEALTH;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with the health route and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Health check - never cached, probes need a fresh sample every time
    let health_routes = Router::new()
        .route("/api/health", any(health::health))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(health_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

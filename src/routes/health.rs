//! Health check endpoint for container orchestration.
//!
//! Aggregates a fixed set of in-process checks (liveness, memory pressure,
//! required environment variables) into a single JSON report. Used by
//! Kubernetes, ECS, systemd, and load balancers to decide whether the
//! service should keep receiving traffic.
//!
//! The handler performs no retries and enforces no deadline of its own;
//! retry cadence and timeouts belong to the external prober.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::metrics::{MetricsError, ProcessMetrics};
use crate::report::{
    CheckStatus, HealthReport, CHECK_ENVIRONMENT, CHECK_MEMORY, CHECK_SERVER,
};
use crate::state::AppState;

/// Health check handler.
///
/// Accepts only GET; any other method short-circuits to a 405 report with a
/// single `method` check and an `Allow` header. Evaluation failures are
/// caught and collapsed into a minimal error report - this handler always
/// returns a well-formed body, never an error page.
pub async fn health(State(state): State<AppState>, method: Method) -> Response {
    let uptime = state.metrics.uptime_seconds();

    if method != Method::GET {
        let report = HealthReport::method_not_allowed(uptime);
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET")],
            Json(report),
        )
            .into_response();
    }

    let report = match evaluate_checks(&state) {
        Ok(checks) => HealthReport::new(checks, uptime),
        Err(e) => {
            tracing::error!(error = %e, "Health evaluation failed");
            HealthReport::evaluation_failed(uptime)
        }
    };

    (report.http_status(), Json(report)).into_response()
}

/// Run the fixed check set against current process state.
///
/// Each check is a single instantaneous sample; an `Err` here means the
/// metrics themselves could not be read, which the caller reports as the
/// `server` check failing.
fn evaluate_checks(
    state: &AppState,
) -> Result<BTreeMap<&'static str, CheckStatus>, MetricsError> {
    let mut checks = BTreeMap::new();
    checks.insert(CHECK_SERVER, CheckStatus::Ok);
    checks.insert(CHECK_MEMORY, CheckStatus::Ok);
    checks.insert(CHECK_ENVIRONMENT, CheckStatus::Ok);

    let sample = state.metrics.memory()?;
    let percent = sample.percent_used();
    if percent > state.config.health.memory_threshold_percent {
        tracing::warn!(
            percent = percent,
            threshold = state.config.health.memory_threshold_percent,
            "Memory pressure above threshold"
        );
        checks.insert(CHECK_MEMORY, CheckStatus::Error);
    }

    // First missing variable fails the check; no further names are scanned
    // and the report does not say which one was missing.
    for name in &state.config.health.required_env {
        let present = state
            .metrics
            .env_var(name)
            .map(|v| !v.is_empty())
            .unwrap_or(false);
        if !present {
            checks.insert(CHECK_ENVIRONMENT, CheckStatus::Error);
            break;
        }
    }

    Ok(checks)
}

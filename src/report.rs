//! Health report model.
//!
//! A `HealthReport` is built fresh for every request and has no identity
//! beyond the single request/response cycle. The overall status is always
//! derived from the individual checks, never set directly.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Check names are a fixed set; using statics keeps the map keys typo-proof.
pub const CHECK_SERVER: &str = "server";
pub const CHECK_MEMORY: &str = "memory";
pub const CHECK_ENVIRONMENT: &str = "environment";
pub const CHECK_METHOD: &str = "method";

/// Outcome of a single named check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

/// Aggregated health report returned by the endpoint.
///
/// `status` is "error" if and only if at least one check is "error"; the
/// constructor enforces this, so the invariant holds for every report the
/// handler can produce.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: CheckStatus,
    /// Evaluation time, RFC 3339 in UTC
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Process uptime in seconds at evaluation time
    pub uptime: u64,
    /// BTreeMap for stable key order in the serialized body
    pub checks: BTreeMap<&'static str, CheckStatus>,
}

impl HealthReport {
    /// Build a report from a set of checks, deriving the overall status.
    pub fn new(checks: BTreeMap<&'static str, CheckStatus>, uptime: u64) -> Self {
        let status = if checks.values().any(|c| *c == CheckStatus::Error) {
            CheckStatus::Error
        } else {
            CheckStatus::Ok
        };

        Self {
            status,
            timestamp: Utc::now(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            uptime,
            checks,
        }
    }

    /// Report for a request that failed shape validation (wrong method).
    pub fn method_not_allowed(uptime: u64) -> Self {
        let mut checks = BTreeMap::new();
        checks.insert(CHECK_METHOD, CheckStatus::Error);
        Self {
            version: None,
            ..Self::new(checks, uptime)
        }
    }

    /// Minimal report used when evaluation itself failed: partial results are
    /// discarded and only the `server` check is reported.
    pub fn evaluation_failed(uptime: u64) -> Self {
        let mut checks = BTreeMap::new();
        checks.insert(CHECK_SERVER, CheckStatus::Error);
        Self {
            version: None,
            ..Self::new(checks, uptime)
        }
    }

    /// HTTP status the report maps to: 200 when healthy, 503 otherwise.
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            CheckStatus::Ok => StatusCode::OK,
            CheckStatus::Error => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

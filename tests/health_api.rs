//! Integration tests for the health endpoint.
//!
//! These drive the real router in-process with a deterministic metrics
//! provider, so no test mutates real environment variables or depends on
//! the memory state of the test runner.
//!
//! Run with: cargo test --test health_api

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use tower::ServiceExt;

use vigil::config::{AppConfig, HealthConfig, HttpServerConfig, LoggingConfig};
use vigil::metrics::{MemorySample, MetricsError, ProcessMetrics};
use vigil::routes::create_router;
use vigil::state::AppState;

const REQUIRED: [&str; 4] = [
    "PUBLIC_API_URL",
    "PUBLIC_BASE_URL",
    "AUTH_CLIENT_ID",
    "AUTH_ISSUER_URL",
];

/// Deterministic stand-in for the real process metrics.
struct FakeMetrics {
    memory: Option<MemorySample>,
    env: HashMap<String, String>,
    uptime: u64,
}

impl FakeMetrics {
    /// Provider with healthy memory and all required variables set.
    fn healthy() -> Self {
        Self {
            memory: Some(MemorySample {
                used_bytes: 100,
                total_bytes: 1_000,
            }),
            env: REQUIRED
                .iter()
                .map(|name| (name.to_string(), format!("value-for-{name}")))
                .collect(),
            uptime: 123,
        }
    }
}

impl ProcessMetrics for FakeMetrics {
    fn memory(&self) -> Result<MemorySample, MetricsError> {
        self.memory.ok_or(MetricsError::ProcessNotFound)
    }

    fn uptime_seconds(&self) -> u64 {
        self.uptime
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }
}

fn app(metrics: FakeMetrics) -> Router {
    let config = AppConfig {
        http: HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        health: HealthConfig {
            memory_threshold_percent: 90.0,
            required_env: REQUIRED.iter().map(|s| s.to_string()).collect(),
        },
        logging: LoggingConfig::default(),
    };
    create_router(AppState::new(config, Arc::new(metrics)))
}

async fn get_health(app: Router) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn healthy_process_returns_200_with_all_checks_ok() {
    let (status, body) = get_health(app(FakeMetrics::healthy())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["checks"]["server"], "ok");
    assert_eq!(body["checks"]["memory"], "ok");
    assert_eq!(body["checks"]["environment"], "ok");
    assert_eq!(body["uptime"], 123);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn non_get_method_returns_405_with_allow_header() {
    for method in ["POST", "PUT", "DELETE", "PATCH"] {
        let response = app(FakeMetrics::healthy())
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["checks"]["method"], "error");
        assert_eq!(json["checks"].as_object().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn memory_at_95_percent_returns_503_with_memory_error() {
    let mut metrics = FakeMetrics::healthy();
    metrics.memory = Some(MemorySample {
        used_bytes: 950,
        total_bytes: 1_000,
    });

    let (status, body) = get_health(app(metrics)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");
    assert_eq!(body["checks"]["memory"], "error");
    assert_eq!(body["checks"]["server"], "ok");
    assert_eq!(body["checks"]["environment"], "ok");
}

#[tokio::test]
async fn any_single_missing_env_var_returns_503_with_environment_error() {
    for missing in REQUIRED {
        let mut metrics = FakeMetrics::healthy();
        metrics.env.remove(missing);

        let (status, body) = get_health(app(metrics)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "missing {missing}");
        assert_eq!(body["status"], "error");
        assert_eq!(body["checks"]["environment"], "error");
        assert_eq!(body["checks"]["memory"], "ok");
        assert_eq!(body["checks"]["server"], "ok");
        // First-failure semantics: the body never names the missing variable
        assert!(!body.to_string().contains(missing));
    }
}

#[tokio::test]
async fn empty_env_var_is_treated_as_missing() {
    let mut metrics = FakeMetrics::healthy();
    metrics
        .env
        .insert("AUTH_CLIENT_ID".to_string(), String::new());

    let (status, body) = get_health(app(metrics)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["checks"]["environment"], "error");
}

#[tokio::test]
async fn metrics_failure_collapses_to_minimal_server_error_report() {
    let mut metrics = FakeMetrics::healthy();
    metrics.memory = None;

    let (status, body) = get_health(app(metrics)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");
    assert_eq!(body["checks"]["server"], "error");
    // Partial results are discarded: only the server check remains
    assert_eq!(body["checks"].as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn timestamps_are_rfc3339_and_increase_across_calls() {
    let (_, first) = get_health(app(FakeMetrics::healthy())).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let (_, second) = get_health(app(FakeMetrics::healthy())).await;

    let t1 = DateTime::parse_from_rfc3339(first["timestamp"].as_str().unwrap())
        .expect("first timestamp is RFC 3339");
    let t2 = DateTime::parse_from_rfc3339(second["timestamp"].as_str().unwrap())
        .expect("second timestamp is RFC 3339");
    assert!(t2 > t1);
}

#[tokio::test]
async fn health_responses_are_never_cached() {
    let response = app(FakeMetrics::healthy())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
}

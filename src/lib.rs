//! Vigil - aggregated health-check endpoint service.
//!
//! Exposes `GET /api/health`, which evaluates a fixed set of in-process
//! checks (liveness, memory pressure, required environment variables) and
//! returns one combined JSON report. Modules are public so integration
//! tests can drive the router in-process with a fake metrics provider.

pub mod config;
pub mod http;
pub mod metrics;
pub mod middleware;
pub mod report;
pub mod routes;
pub mod state;

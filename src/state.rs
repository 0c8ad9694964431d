//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::ProcessMetrics;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration and the process metrics provider
/// the health checks sample from. Both are read-only after startup, so
/// handlers share them without any locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metrics: Arc<dyn ProcessMetrics>,
}

impl AppState {
    /// Creates a new application state from the given configuration and metrics provider.
    pub fn new(config: AppConfig, metrics: Arc<dyn ProcessMetrics>) -> Self {
        Self {
            config: Arc::new(config),
            metrics,
        }
    }
}

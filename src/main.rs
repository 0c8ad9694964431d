//! Vigil: an aggregated health-check endpoint service.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from a TOML file, creates the process metrics provider,
//! sets up the Axum router, and starts the HTTP server.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vigil::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use vigil::http::start_server;
use vigil::metrics::SystemMetrics;
use vigil::routes::create_router;
use vigil::state::AppState;

/// Vigil: aggregated health-check endpoint service
#[derive(Parser, Debug)]
#[command(name = "vigil", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "vigil=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration first so the logging format is known
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        memory_threshold = config.health.memory_threshold_percent,
        required_env = ?config.health.required_env,
        "Loaded configuration"
    );

    // Metrics provider anchors process uptime, so build it once at startup
    let metrics = Arc::new(SystemMetrics::new());

    // Create application state and router
    let state = AppState::new(config.clone(), metrics);
    let app = create_router(state);

    // Start server; blocks until shutdown
    start_server(app, &config).await?;

    Ok(())
}

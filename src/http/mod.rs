//! HTTP server startup and shutdown.
//!
//! Plain HTTP only: TLS termination is the deployment's responsibility
//! (ingress or reverse proxy), and the health endpoint carries nothing
//! sensitive.

mod shutdown;

use std::net::SocketAddr;

use axum::Router;

use crate::config::AppConfig;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid http.host or http.port: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the HTTP server and block until it shuts down.
///
/// SIGTERM and Ctrl+C trigger a graceful shutdown: the listener stops
/// accepting connections and in-flight requests are drained.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port).parse()?;

    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    Ok(())
}

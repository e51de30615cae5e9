//! HTTP server startup with lifecycle management.

mod error;
mod http_server;
mod shutdown;

use axum::Router;
pub use error::{Result, ServerError};
use http_server::serve_http;
use shutdown::shutdown_signal;

use crate::config::ServerConfig;

/// Tracing target for server startup events.
pub const TRACING_TARGET_STARTUP: &str = "counsel_cli::server::startup";

/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "counsel_cli::server::shutdown";

/// Starts the HTTP server with graceful shutdown.
///
/// # Errors
///
/// Returns an error if:
/// - Server configuration is invalid
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    serve_http(app, config).await
}

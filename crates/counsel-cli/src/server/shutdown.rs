//! Shutdown signal handling.

use std::time::Duration;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;

use super::TRACING_TARGET_SHUTDOWN;

/// Resolves once SIGINT (Ctrl+C) or SIGTERM arrives.
///
/// Handed to axum's graceful-shutdown hook: after the signal fires, the
/// listener stops accepting connections and in-flight SSE streams get up to
/// `drain_timeout` to finish.
pub async fn shutdown_signal(drain_timeout: Duration) {
    let interrupt = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %e,
                "Ctrl+C handler could not be installed"
            );
        } else {
            tracing::info!(
                target: TRACING_TARGET_SHUTDOWN,
                "Ctrl+C received, shutting down"
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!(
                    target: TRACING_TARGET_SHUTDOWN,
                    "SIGTERM received, shutting down"
                );
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_SHUTDOWN,
                    error = %e,
                    "SIGTERM handler could not be installed"
                );
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        drain_timeout_secs = drain_timeout.as_secs(),
        "Draining in-flight streams before exit"
    );
}

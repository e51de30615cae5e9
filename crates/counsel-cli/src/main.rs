#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use counsel_server::handler::routes;
use counsel_server::middleware::{CorsConfig, create_cors_layer, create_trace_layer};
use counsel_server::service::ServiceState;

use crate::config::Cli;
use crate::server::TRACING_TARGET_SHUTDOWN;

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate().context("invalid configuration")?;

    let state =
        ServiceState::from_config(&cli.service).context("failed to create service state")?;
    let router = create_router(state, &cli.cors);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// tracing wraps CORS, which wraps the request handlers.
fn create_router(state: ServiceState, cors: &CorsConfig) -> Router {
    routes(state)
        .layer(create_cors_layer(cors))
        .layer(create_trace_layer())
}

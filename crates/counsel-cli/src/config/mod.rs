//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── service: ServiceConfig  # Provider key, model, fetch timeout
//! ├── cors: CorsConfig        # Allowed origins, credentials
//! └── server: ServerConfig    # Host, port, shutdown
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use counsel_server::middleware::CorsConfig;
use counsel_server::service::ServiceConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Tracing target for configuration events.
pub const TRACING_TARGET_CONFIG: &str = "counsel_cli::config";

/// Tracing target for startup events.
pub const TRACING_TARGET_STARTUP: &str = "counsel_cli::server::startup";

/// Complete CLI configuration.
///
/// Combines all configuration groups for the counsel server:
/// - [`ServiceConfig`]: Upstream provider and extraction settings
/// - [`CorsConfig`]: Cross-origin request policy
/// - [`ServerConfig`]: Network binding and lifecycle
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "counsel")]
#[command(about = "Counsel chat orchestration server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// CORS middleware configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Upstream provider and extraction configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads environment variables from a `.env` file and parses CLI arguments.
    ///
    /// The `.env` file is loaded before clap parses arguments so its values
    /// are visible to clap's `env` fallbacks.
    pub fn init() -> Self {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }

        Self::parse()
    }

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs configuration at startup (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            chat_model = %self.service.chat_model,
            fetch_timeout_secs = self.service.fetch_timeout_seconds,
            max_tool_rounds = self.service.max_tool_rounds,
            base_url_override = self.service.openai_base_url.is_some(),
            cors_origins = ?self.cors.allowed_origins,
            cors_credentials = self.cors.allow_credentials,
            "Service configuration loaded"
        );
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            "Build information"
        );
    }
}

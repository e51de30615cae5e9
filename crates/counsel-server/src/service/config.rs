//! App state configuration.

use std::time::Duration;

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use serde::{Deserialize, Serialize};

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Upstream provider API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Upstream provider base URL override.
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,

    /// Model identifier all agents run on.
    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-4.1")]
    pub chat_model: String,

    /// Timeout for attachment downloads, in seconds.
    #[arg(long, env = "FETCH_TIMEOUT_SECONDS", default_value = "30")]
    pub fetch_timeout_seconds: u64,

    /// Maximum delegation rounds per chat request.
    #[arg(long, env = "MAX_TOOL_ROUNDS", default_value = "4")]
    pub max_tool_rounds: usize,
}

impl ServiceConfig {
    /// Validates all configuration values and returns errors for invalid settings.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid:
    /// - The provider API key must not be empty
    /// - The base URL must be http(s) if provided
    /// - The model identifier must not be empty
    /// - The fetch timeout must be non-zero
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.openai_api_key.is_empty() {
            return Err(anyhow!("Provider API key cannot be empty"));
        }

        if let Some(base_url) = &self.openai_base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(anyhow!(
                    "Provider base URL must start with 'http://' or 'https://'"
                ));
            }
        }

        if self.chat_model.is_empty() {
            return Err(anyhow!("Chat model identifier cannot be empty"));
        }

        if self.fetch_timeout_seconds == 0 {
            return Err(anyhow!("Fetch timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Returns the attachment download timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: None,
            chat_model: "gpt-4.1".to_owned(),
            fetch_timeout_seconds: 30,
            max_tool_rounds: 4,
        }
    }
}

//! Error types for counsel-agent.

use std::fmt;

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during agent operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Provider error (API call failed, rate limited, etc.)
    #[error("provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    /// Agent execution error.
    #[error("agent error: {0}")]
    Agent(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a provider error.
    pub fn provider(provider: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates an agent error.
    pub fn agent(message: impl fmt::Display) -> Self {
        Self::Agent(message.to_string())
    }

    /// Creates a configuration error.
    pub fn config(message: impl fmt::Display) -> Self {
        Self::Config(message.to_string())
    }
}

//! Application state and dependency injection.

use std::sync::Arc;

use anyhow::{Context, Result as AnyhowResult};
use counsel_agent::agent::AgentRegistry;
use counsel_agent::runtime::{AgentRuntime, OpenAiRuntime, RuntimeConfig};
use counsel_core::extract::{DocumentExtractor, HttpFetcher, TextExtractor};

use crate::service::ServiceConfig;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    runtime: Arc<dyn AgentRuntime>,
    registry: Arc<AgentRegistry>,
    extractor: Arc<dyn TextExtractor>,
}

impl ServiceState {
    /// Builds state from explicit parts.
    pub fn new(
        runtime: Arc<dyn AgentRuntime>,
        registry: Arc<AgentRegistry>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            runtime,
            registry,
            extractor,
        }
    }

    /// Initializes application state from configuration.
    pub fn from_config(config: &ServiceConfig) -> AnyhowResult<Self> {
        let registry = Arc::new(AgentRegistry::with_defaults(&config.chat_model));

        let mut runtime_config = RuntimeConfig::new(&config.openai_api_key)
            .with_max_tool_rounds(config.max_tool_rounds);
        if let Some(base_url) = &config.openai_base_url {
            runtime_config = runtime_config.with_api_base(base_url);
        }

        let runtime = OpenAiRuntime::new(runtime_config, Arc::clone(&registry))
            .context("Failed to create agent runtime")?;

        let fetcher = HttpFetcher::new(config.fetch_timeout())
            .context("Failed to create attachment fetcher")?;

        Ok(Self {
            runtime: Arc::new(runtime),
            registry,
            extractor: Arc::new(DocumentExtractor::new(fetcher)),
        })
    }

    /// Returns the agent runtime.
    pub fn runtime(&self) -> Arc<dyn AgentRuntime> {
        Arc::clone(&self.runtime)
    }

    /// Returns the agent registry.
    pub fn registry(&self) -> Arc<AgentRegistry> {
        Arc::clone(&self.registry)
    }

    /// Returns the attachment text extractor.
    pub fn extractor(&self) -> Arc<dyn TextExtractor> {
        Arc::clone(&self.extractor)
    }
}

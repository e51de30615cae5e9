//! The agent runtime contract.
//!
//! The underlying inference engine and its tooling are a black box behind
//! [`AgentRuntime`]: run an agent over an input history, get back an ordered
//! asynchronous event stream. Upstream event shapes are classified into the
//! closed [`RunEvent`] union at this boundary, so the stream adapter never
//! depends on provider-internal type representations.

mod openai;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use counsel_core::types::AgentMessage;
use futures::stream::BoxStream;

pub use openai::{OpenAiRuntime, RuntimeConfig};

use crate::Result;
use crate::agent::AgentDefinition;

/// Ordered stream of classified runtime events.
///
/// `Err` items represent faults thrown by the runtime itself, as opposed to
/// structured error events, which arrive as `Ok(RunEvent::Error)`.
pub type EventStream = BoxStream<'static, Result<RunEvent>>;

/// Closed classification of upstream runtime events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// An incremental fragment of generated text. May be empty; empty
    /// deltas are suppressed downstream, not here.
    TextDelta {
        /// The text fragment.
        delta: String,
    },

    /// A structured error event from the runtime.
    Error {
        /// Stringified error payload.
        message: String,
    },

    /// Any other upstream event kind. Ignored downstream so that unknown
    /// event shapes never abort a stream.
    Other,
}

impl RunEvent {
    /// Creates a text-delta event.
    pub fn delta(delta: impl Into<String>) -> Self {
        Self::TextDelta {
            delta: delta.into(),
        }
    }

    /// Creates an error event.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// A streaming agent runtime.
///
/// One call runs one agent over one input history and yields events strictly
/// in arrival order. Delegation to other agents happens inside the runtime;
/// its output surfaces back through the parent agent's stream.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Starts a streamed agent run.
    ///
    /// An `Err` return means the run could not be started at all; faults
    /// mid-run arrive as `Err` items on the stream.
    async fn run_streamed(
        &self,
        agent: Arc<AgentDefinition>,
        input: Vec<AgentMessage>,
    ) -> Result<EventStream>;
}

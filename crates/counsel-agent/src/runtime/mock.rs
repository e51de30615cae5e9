//! Scripted runtime for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use counsel_core::types::AgentMessage;
use futures::StreamExt;

use super::{AgentRuntime, EventStream, RunEvent};
use crate::agent::AgentDefinition;
use crate::{Error, Result};

/// One scripted stream item.
#[derive(Debug, Clone)]
pub enum ScriptItem {
    /// A well-formed runtime event.
    Event(RunEvent),

    /// A mid-stream fault, surfaced as an `Err` item.
    Fault(String),
}

/// [`AgentRuntime`] that replays a fixed script.
///
/// Records every run's agent name and input so tests can assert what the
/// caller handed to the runtime.
#[derive(Debug, Clone, Default)]
pub struct MockRuntime {
    script: Vec<ScriptItem>,
    fail_on_start: Option<String>,
    runs: Arc<Mutex<Vec<RecordedRun>>>,
}

/// A single recorded invocation.
#[derive(Debug, Clone)]
pub struct RecordedRun {
    pub agent: String,
    pub input: Vec<AgentMessage>,
}

impl MockRuntime {
    /// Runtime that streams the given events and then ends.
    pub fn with_events(events: Vec<RunEvent>) -> Self {
        Self::with_script(events.into_iter().map(ScriptItem::Event).collect())
    }

    /// Runtime that replays an arbitrary script of events and faults.
    pub fn with_script(script: Vec<ScriptItem>) -> Self {
        Self {
            script,
            fail_on_start: None,
            runs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Runtime whose `run_streamed` fails before producing a stream.
    pub fn failing_on_start(message: impl Into<String>) -> Self {
        Self {
            script: Vec::new(),
            fail_on_start: Some(message.into()),
            runs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all recorded invocations so far.
    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentRuntime for MockRuntime {
    async fn run_streamed(
        &self,
        agent: Arc<AgentDefinition>,
        input: Vec<AgentMessage>,
    ) -> Result<EventStream> {
        self.runs.lock().unwrap().push(RecordedRun {
            agent: agent.name().to_string(),
            input,
        });

        if let Some(message) = &self.fail_on_start {
            return Err(Error::agent(message.clone()));
        }

        let items: Vec<Result<RunEvent>> = self
            .script
            .iter()
            .cloned()
            .map(|item| match item {
                ScriptItem::Event(event) => Ok(event),
                ScriptItem::Fault(message) => Err(Error::agent(message)),
            })
            .collect();

        Ok(futures::stream::iter(items).boxed())
    }
}

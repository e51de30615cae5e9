//! OpenAI-backed agent runtime.
//!
//! Streams chat completions and executes delegation tools on the host side:
//! when the model calls a delegate tool, the target specialist is run
//! non-streamed and its answer is fed back into the parent conversation
//! before streaming resumes. Hosted capabilities the chat-completions wire
//! cannot express (web search, code execution) are skipped with a debug log;
//! they belong to the runtime, never to host control flow.

use std::collections::HashMap;
use std::sync::Arc;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolArgs, ChatCompletionToolType,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, FinishReason, FunctionCall,
    FunctionObjectArgs,
};
use async_trait::async_trait;
use counsel_core::types::{AgentMessage, AgentRole};
use futures::StreamExt;
use serde::Deserialize;

use super::{AgentRuntime, EventStream, RunEvent};
use crate::agent::{AgentDefinition, AgentRegistry, Capability};
use crate::{Error, Result};

/// Tracing target for runtime operations.
const TRACING_TARGET: &str = "counsel_agent::runtime";

/// Configuration for the OpenAI runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// API key for the upstream provider.
    pub api_key: String,

    /// Optional API base override (proxies, compatible providers).
    pub api_base: Option<String>,

    /// Maximum number of delegation rounds per run.
    pub max_tool_rounds: usize,
}

impl RuntimeConfig {
    /// Creates a new configuration with default limits.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: None,
            max_tool_rounds: 4,
        }
    }

    /// Overrides the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Overrides the delegation round limit.
    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }
}

/// OpenAI chat-completions implementation of [`AgentRuntime`].
#[derive(Clone)]
pub struct OpenAiRuntime {
    client: Client<OpenAIConfig>,
    registry: Arc<AgentRegistry>,
    max_tool_rounds: usize,
}

impl OpenAiRuntime {
    /// Creates a new runtime over the given registry.
    pub fn new(config: RuntimeConfig, registry: Arc<AgentRegistry>) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::config("upstream API key is not set"));
        }

        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);
        if let Some(api_base) = config.api_base {
            openai_config = openai_config.with_api_base(api_base);
        }

        Ok(Self {
            client: Client::with_config(openai_config),
            registry,
            max_tool_rounds: config.max_tool_rounds,
        })
    }
}

#[async_trait]
impl AgentRuntime for OpenAiRuntime {
    async fn run_streamed(
        &self,
        agent: Arc<AgentDefinition>,
        input: Vec<AgentMessage>,
    ) -> Result<EventStream> {
        let client = self.client.clone();
        let registry = Arc::clone(&self.registry);
        let max_rounds = self.max_tool_rounds;

        let mut messages = request_messages(&agent, &input)?;
        let tools = delegate_tools(&agent)?;
        let model = agent.model_id().to_string();
        let delegate_map: HashMap<String, String> = agent
            .delegates()
            .map(|(tool, target)| (tool.to_string(), target.to_string()))
            .collect();

        tracing::debug!(
            target: TRACING_TARGET,
            agent = %agent.name(),
            model = %model,
            messages = messages.len(),
            tools = tools.len(),
            "starting streamed run"
        );

        let stream = async_stream::stream! {
            for _round in 0..=max_rounds {
                let request = match build_request(&model, messages.clone(), &tools) {
                    Ok(request) => request,
                    Err(err) => {
                        yield Err(err);
                        return;
                    }
                };

                let mut upstream = match client.chat().create_stream(request).await {
                    Ok(upstream) => upstream,
                    Err(err) => {
                        yield Err(Error::provider("openai", err));
                        return;
                    }
                };

                let mut pending: Vec<PendingToolCall> = Vec::new();
                let mut finish: Option<FinishReason> = None;

                while let Some(chunk) = upstream.next().await {
                    let chunk = match chunk {
                        Ok(chunk) => chunk,
                        Err(err) => {
                            // Structured error event from the provider
                            // stream, as opposed to a fault starting it.
                            yield Ok(RunEvent::error(err.to_string()));
                            return;
                        }
                    };

                    let Some(choice) = chunk.choices.first() else {
                        yield Ok(RunEvent::Other);
                        continue;
                    };

                    if let Some(content) = &choice.delta.content {
                        yield Ok(RunEvent::delta(content.clone()));
                    }

                    for call in choice.delta.tool_calls.iter().flatten() {
                        let index = call.index as usize;
                        while pending.len() <= index {
                            pending.push(PendingToolCall::default());
                        }

                        let slot = &mut pending[index];
                        if let Some(id) = &call.id {
                            slot.id.push_str(id);
                        }
                        if let Some(function) = &call.function {
                            if let Some(name) = &function.name {
                                slot.name.push_str(name);
                            }
                            if let Some(arguments) = &function.arguments {
                                slot.arguments.push_str(arguments);
                            }
                        }
                    }

                    if choice.finish_reason.is_some() {
                        finish = choice.finish_reason.clone();
                    }
                }

                if finish != Some(FinishReason::ToolCalls) || pending.is_empty() {
                    return;
                }

                let calls: Vec<ChatCompletionMessageToolCall> = pending
                    .iter()
                    .map(|call| ChatCompletionMessageToolCall {
                        id: call.id.clone(),
                        r#type: ChatCompletionToolType::Function,
                        function: FunctionCall {
                            name: call.name.clone(),
                            arguments: call.arguments.clone(),
                        },
                    })
                    .collect();

                let assistant = match ChatCompletionRequestAssistantMessageArgs::default()
                    .tool_calls(calls)
                    .build()
                {
                    Ok(assistant) => assistant,
                    Err(err) => {
                        yield Err(Error::provider("openai", err));
                        return;
                    }
                };
                messages.push(assistant.into());

                for call in pending {
                    let output =
                        run_delegate(&client, &registry, &delegate_map, &call.name, &call.arguments)
                            .await;

                    let tool_message = match ChatCompletionRequestToolMessageArgs::default()
                        .tool_call_id(call.id.clone())
                        .content(output)
                        .build()
                    {
                        Ok(tool_message) => tool_message,
                        Err(err) => {
                            yield Err(Error::provider("openai", err));
                            return;
                        }
                    };
                    messages.push(tool_message.into());
                }
            }

            yield Err(Error::agent("delegation round limit exceeded"));
        };

        Ok(stream.boxed())
    }
}

/// Partially accumulated tool call from streamed chunks.
#[derive(Debug, Default)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Arguments schema for delegate tools.
#[derive(Debug, Deserialize)]
struct DelegateArgs {
    query: String,
}

/// Converts agent messages into the provider's request message shape.
///
/// The instruction prompt leads the conversation; `developer` envelopes map
/// to system messages on this wire.
fn request_messages(
    agent: &AgentDefinition,
    input: &[AgentMessage],
) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut messages = Vec::with_capacity(input.len() + 1);

    messages.push(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(agent.instructions())
            .build()
            .map_err(|err| Error::provider("openai", err))?
            .into(),
    );

    for message in input {
        let request_message: ChatCompletionRequestMessage = match message.role {
            AgentRole::Developer => ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content.clone())
                .build()
                .map_err(|err| Error::provider("openai", err))?
                .into(),
            AgentRole::User => ChatCompletionRequestUserMessageArgs::default()
                .content(message.content.clone())
                .build()
                .map_err(|err| Error::provider("openai", err))?
                .into(),
            AgentRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(message.content.clone())
                .build()
                .map_err(|err| Error::provider("openai", err))?
                .into(),
        };
        messages.push(request_message);
    }

    Ok(messages)
}

/// Builds the function-tool declarations for an agent's delegate
/// capabilities.
fn delegate_tools(agent: &AgentDefinition) -> Result<Vec<ChatCompletionTool>> {
    let mut tools = Vec::new();

    for capability in agent.capabilities() {
        match capability {
            Capability::Delegate { tool, agent: target } => {
                let function = FunctionObjectArgs::default()
                    .name(tool.clone())
                    .description(format!(
                        "Delegates the query to the {target} specialist and returns its answer."
                    ))
                    .parameters(serde_json::json!({
                        "type": "object",
                        "properties": {
                            "query": {
                                "type": "string",
                                "description": "The full question or fact pattern to hand off."
                            }
                        },
                        "required": ["query"]
                    }))
                    .build()
                    .map_err(|err| Error::provider("openai", err))?;

                tools.push(
                    ChatCompletionToolArgs::default()
                        .r#type(ChatCompletionToolType::Function)
                        .function(function)
                        .build()
                        .map_err(|err| Error::provider("openai", err))?,
                );
            }
            Capability::WebSearch | Capability::CodeExecution => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    agent = %agent.name(),
                    capability = ?capability,
                    "hosted capability not supported on this wire; skipping"
                );
            }
        }
    }

    Ok(tools)
}

fn build_request(
    model: &str,
    messages: Vec<ChatCompletionRequestMessage>,
    tools: &[ChatCompletionTool],
) -> Result<CreateChatCompletionRequest> {
    let mut builder = CreateChatCompletionRequestArgs::default();
    builder.model(model).messages(messages);

    if !tools.is_empty() {
        builder.tools(tools.to_vec());
    }

    builder.build().map_err(|err| Error::provider("openai", err))
}

/// Executes one delegate tool call and returns its output.
///
/// Delegation failures are absorbed into the tool output so the parent run
/// can keep going; the model decides what to make of them.
async fn run_delegate(
    client: &Client<OpenAIConfig>,
    registry: &AgentRegistry,
    delegate_map: &HashMap<String, String>,
    tool_name: &str,
    arguments: &str,
) -> String {
    let Some(agent_name) = delegate_map.get(tool_name) else {
        return format!("[Tool {tool_name} is not available]");
    };

    let Some(target) = registry.get(agent_name) else {
        return format!("[Agent {agent_name} is not registered]");
    };

    let query = match serde_json::from_str::<DelegateArgs>(arguments) {
        Ok(args) => args.query,
        Err(err) => return format!("[Invalid arguments for {tool_name}: {err}]"),
    };

    tracing::debug!(
        target: TRACING_TARGET,
        agent = %agent_name,
        "delegating query to specialist"
    );

    match prompt_agent(client, &target, &query).await {
        Ok(answer) => answer,
        Err(err) => {
            tracing::warn!(
                target: TRACING_TARGET,
                agent = %agent_name,
                error = %err,
                "delegate run failed"
            );
            format!("[{tool_name} failed: {err}]")
        }
    }
}

/// Runs an agent non-streamed over a single query.
async fn prompt_agent(
    client: &Client<OpenAIConfig>,
    agent: &AgentDefinition,
    query: &str,
) -> Result<String> {
    let messages: Vec<ChatCompletionRequestMessage> = vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(agent.instructions())
            .build()
            .map_err(|err| Error::provider("openai", err))?
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(query)
            .build()
            .map_err(|err| Error::provider("openai", err))?
            .into(),
    ];

    let request = CreateChatCompletionRequestArgs::default()
        .model(agent.model_id())
        .messages(messages)
        .build()
        .map_err(|err| Error::provider("openai", err))?;

    let response = client
        .chat()
        .create(request)
        .await
        .map_err(|err| Error::provider("openai", err))?;

    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::agent::AgentRegistry;

    #[test]
    fn empty_api_key_is_rejected() {
        let registry = Arc::new(AgentRegistry::with_defaults("gpt-4.1"));
        let result = OpenAiRuntime::new(RuntimeConfig::new(""), registry);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn orchestrator_exposes_two_delegate_tools() {
        let registry = AgentRegistry::with_defaults("gpt-4.1");
        let tools = delegate_tools(&registry.orchestrator()).unwrap();
        assert_eq!(tools.len(), 2);
    }

    #[test]
    fn specialist_exposes_no_tools() {
        let registry = AgentRegistry::with_defaults("gpt-4.1");
        let plaintiff = registry.get(crate::agent::PLAINTIFF_AGENT).unwrap();
        assert!(delegate_tools(&plaintiff).unwrap().is_empty());
    }

    #[test]
    fn request_messages_lead_with_instructions() {
        use counsel_core::types::{AgentMessage, AgentRole};

        let registry = AgentRegistry::with_defaults("gpt-4.1");
        let orchestrator = registry.orchestrator();

        let input = vec![
            AgentMessage::new(AgentRole::Developer, "context"),
            AgentMessage::new(AgentRole::User, "question"),
        ];

        let messages = request_messages(&orchestrator, &input).unwrap();
        assert_eq!(messages.len(), 3);
    }
}

//! Message types for the chat request lifecycle.
//!
//! Two message shapes exist: [`ChatMessage`] is what clients send (a plain
//! role/content pair), and [`AgentMessage`] is the envelope the agent runtime
//! expects. The normalization pass in [`crate::normalize`] converts one into
//! the other, expanding inline file references along the way.

use serde::{Deserialize, Serialize};

/// Role of a message participant in a client conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System message providing instructions or context.
    System,

    /// Message from a human user.
    User,

    /// Message from an AI assistant.
    Assistant,
}

/// A single message in a client chat history.
///
/// Content may embed zero or more inline file references following the
/// `[File: <name> (<mediaType>) - URL: <url>]` convention; these are expanded
/// during normalization, never here. Messages are immutable once received and
/// live only for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender.
    pub role: ChatRole,

    /// Text content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Creates a new chat message.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Role of a message in the agent runtime's envelope.
///
/// The runtime distinguishes `developer` instructions from `user` input;
/// client-side `system` messages map onto `developer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Instruction-level message (mapped from client `system`).
    Developer,

    /// Message from a human user.
    User,

    /// Message from an AI assistant.
    Assistant,
}

impl From<ChatRole> for AgentRole {
    fn from(role: ChatRole) -> Self {
        match role {
            ChatRole::System => Self::Developer,
            ChatRole::User => Self::User,
            ChatRole::Assistant => Self::Assistant,
        }
    }
}

/// Kind discriminator carried on every agent message envelope.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// A plain conversational message.
    #[default]
    Message,
}

/// A message in the shape the agent runtime consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    /// Text content with any file references already expanded.
    pub content: String,

    /// Runtime-facing role.
    pub role: AgentRole,

    /// Envelope kind discriminator.
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl AgentMessage {
    /// Creates a new agent message envelope.
    pub fn new(role: AgentRole, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role,
            kind: MessageKind::Message,
        }
    }
}

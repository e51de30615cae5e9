//! Common data types for the counsel gateway.
//!
//! This module provides the shared data structures for the chat request
//! lifecycle:
//!
//! - **Message types**: client-facing chat messages and the runtime-facing
//!   agent message envelope
//! - **Stream frames**: the tagged wire protocol emitted over SSE

mod frame;
mod message;

pub use frame::StreamFrame;
pub use message::{AgentMessage, AgentRole, ChatMessage, ChatRole, MessageKind};

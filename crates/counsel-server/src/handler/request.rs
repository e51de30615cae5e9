//! Request bodies for chat handlers.

use counsel_core::types::ChatMessage;
use serde::Deserialize;

/// Body of a `POST /api/chat` request.
///
/// Field names follow the client's camelCase wire convention.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Ordered conversation history, oldest first.
    pub messages: Vec<ChatMessage>,

    /// Model the client selected. Required, but the configured model stays
    /// authoritative for which model actually runs.
    #[serde(default)]
    pub selected_chat_model: Option<String>,

    /// Opaque client-side hints. Logged, never interpreted.
    #[serde(default)]
    pub request_hints: Option<serde_json::Value>,
}

impl ChatRequest {
    /// Returns the selected model if it is present and non-empty.
    pub fn selected_model(&self) -> Option<&str> {
        self.selected_chat_model
            .as_deref()
            .filter(|model| !model.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_body() {
        let body = serde_json::json!({
            "messages": [{"role": "user", "content": "hi"}],
            "selectedChatModel": "gpt-4.1",
            "requestHints": {"locale": "en"}
        });

        let request: ChatRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.selected_model(), Some("gpt-4.1"));
        assert!(request.request_hints.is_some());
    }

    #[test]
    fn missing_model_fields_default_to_none() {
        let body = serde_json::json!({"messages": []});
        let request: ChatRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.selected_model(), None);
        assert!(request.request_hints.is_none());
    }

    #[test]
    fn empty_model_counts_as_missing() {
        let body = serde_json::json!({"messages": [], "selectedChatModel": ""});
        let request: ChatRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.selected_model(), None);
    }
}

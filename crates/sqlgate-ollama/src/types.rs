// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama `/api/chat` request and response types.

use serde::{Deserialize, Serialize};

/// Non-streaming chat request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Always `false`: the expert answer is consumed as a whole.
    pub stream: bool,
}

/// One chat turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// "system", "user", or "assistant".
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response body of a non-streaming chat call.
///
/// Ollama returns timing and token counters as well; only the fields read
/// here are modeled, the rest are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub message: ChatMessage,
    #[serde(default)]
    pub done: bool,
}

/// Error body returned with non-2xx statuses, e.g. `{"error":"model not found"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_in_ollama_shape() {
        let request = ChatRequest {
            model: "qwen2.5-coder:7b".into(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "qwen2.5-coder:7b",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ],
                "stream": false
            })
        );
    }

    #[test]
    fn chat_response_ignores_extra_fields() {
        let body = r#"{
            "model": "qwen2.5-coder:7b",
            "created_at": "2026-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "CREATE INDEX ..."},
            "done": true,
            "total_duration": 12345,
            "eval_count": 42
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.message.content, "CREATE INDEX ...");
        assert_eq!(response.model.as_deref(), Some("qwen2.5-coder:7b"));
        assert!(response.done);
    }

    #[test]
    fn api_error_parses() {
        let err: ApiErrorResponse =
            serde_json::from_str(r#"{"error":"model 'x' not found"}"#).unwrap();
        assert_eq!(err.error, "model 'x' not found");
    }
}

//! Wire types for `POST /v1/messages`.
//!
//! Only the fields the planner sends or reads are modelled. Everything else
//! in the response is ignored so upstream additions never break parsing.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stepfree_core::generic::{GenericMessage, GenericRole};

#[derive(Debug, Serialize, Clone)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    /// All system messages, joined. The Messages API keeps them out of the
    /// `messages` list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<InputMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_config: Option<OutputConfig>,
}

impl MessagesRequest {
    /// Split generic messages into the top-level `system` text and the
    /// user/assistant turns.
    pub fn new(model: impl Into<String>, max_tokens: u32, messages: Vec<GenericMessage>) -> Self {
        let mut system = Vec::new();
        let mut turns = Vec::with_capacity(messages.len());

        for message in messages {
            match message.role {
                GenericRole::System => system.push(message.content),
                GenericRole::User => turns.push(InputMessage {
                    role: InputRole::User,
                    content: message.content,
                }),
                GenericRole::Assistant => turns.push(InputMessage {
                    role: InputRole::Assistant,
                    content: message.content,
                }),
            }
        }

        Self {
            model: model.into(),
            max_tokens,
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            messages: turns,
            output_config: None,
        }
    }

    pub fn with_json_schema(mut self, schema: Value) -> Self {
        self.output_config = Some(OutputConfig {
            format: OutputFormat::JsonSchema { schema },
        });
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct InputMessage {
    pub role: InputRole,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputRole {
    User,
    Assistant,
}

#[derive(Debug, Serialize, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Serialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputFormat {
    JsonSchema { schema: Value },
}

/// Non-streaming response body.
#[derive(Debug, Deserialize, Clone)]
pub struct MessagesResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Thinking {},
    RedactedThinking {},
    ToolUse {},
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::Thinking {} => "thinking",
            ContentBlock::RedactedThinking {} => "redacted_thinking",
            ContentBlock::ToolUse {} => "tool_use",
            ContentBlock::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_moves_system_out_of_turns() {
        let request = MessagesRequest::new(
            "claude-test",
            4000,
            vec![
                GenericMessage::system("rules"),
                GenericMessage::user("plan"),
                GenericMessage::assistant("{}"),
                GenericMessage::user("fix it"),
            ],
        )
        .with_json_schema(json!({"type": "object"}));

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "claude-test");
        assert_eq!(body["max_tokens"], 4000);
        assert_eq!(body["system"], "rules");
        assert_eq!(body["messages"].as_array().unwrap().len(), 3);
        assert_eq!(body["messages"][1]["role"], "assistant");
        assert_eq!(body["output_config"]["format"]["type"], "json_schema");
        assert_eq!(body["output_config"]["format"]["schema"]["type"], "object");
    }

    #[test]
    fn test_response_tolerates_unknown_blocks_and_fields() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "model": "claude-test",
            "content": [
                {"type": "thinking", "thinking": "...", "signature": "x"},
                {"type": "server_tool_use", "id": "t"},
                {"type": "tool_use", "id": "u", "name": "plan", "input": {}},
                {"type": "text", "text": "{}"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 20, "cache_read_input_tokens": 0}
        }))
        .unwrap();

        let kinds: Vec<&str> = response.content.iter().map(ContentBlock::kind).collect();
        assert_eq!(kinds, vec!["thinking", "unknown", "tool_use", "text"]);
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
    }
}

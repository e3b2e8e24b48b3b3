use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::ErrorPayload;

/// A tool call made by the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireToolCall", into = "WireToolCall")]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// JSON-encoded arguments, exactly as the model produced them
    pub arguments: String,
}

/// Result of a tool execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this is a response to
    pub tool_call_id: String,
    /// The result of the tool execution
    pub result: String,
}

impl ToolResult {
    pub fn is_error(&self) -> bool {
        ErrorPayload::detect(&self.result).is_some()
    }
}

// {"id": ..., "type": "function", "function": {"name": ..., "arguments": "..."}}
#[derive(Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    call_type: String,
    function: WireFunction,
}

#[derive(Serialize, Deserialize)]
struct WireFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

fn function_type() -> String {
    "function".to_string()
}

impl From<WireToolCall> for ToolCall {
    fn from(wire: WireToolCall) -> Self {
        Self {
            id: wire.id,
            name: wire.function.name,
            arguments: wire.function.arguments,
        }
    }
}

impl From<ToolCall> for WireToolCall {
    fn from(call: ToolCall) -> Self {
        Self {
            id: call.id,
            call_type: function_type(),
            function: WireFunction {
                name: call.name,
                arguments: call.arguments,
            },
        }
    }
}

/// Extract the tool calls from an assistant message.
///
/// A message without a `tool_calls` array (or with `null`) has none.
pub fn parse_tool_calls(message: &Value) -> Result<Vec<ToolCall>> {
    match message.get("tool_calls") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(calls) => {
            Vec::<ToolCall>::deserialize(calls).context("failed to parse tool calls")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_single_tool_call_from_message() {
        let message = json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_Q1DBTR3thWR0Iz7ZF193QF5u",
                "type": "function",
                "function": {
                    "name": "read_file",
                    "arguments": "{\"filename\":\"/tmp/LICENSE\"}"
                }
            }]
        });

        let calls = parse_tool_calls(&message).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_Q1DBTR3thWR0Iz7ZF193QF5u");
        assert_eq!(calls[0].name, "read_file");
        assert_eq!(calls[0].arguments, r#"{"filename":"/tmp/LICENSE"}"#);
    }

    #[test]
    fn parse_no_tool_calls() {
        let message = json!({"role": "assistant", "content": "Just text."});
        assert!(parse_tool_calls(&message).unwrap().is_empty());

        let message = json!({"role": "assistant", "tool_calls": null});
        assert!(parse_tool_calls(&message).unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_malformed_tool_calls() {
        let message = json!({"tool_calls": [{"id": "x"}]});
        assert!(parse_tool_calls(&message).is_err());
    }

    #[test]
    fn tool_call_serializes_to_wire_shape() {
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "read_file".to_string(),
            arguments: "{}".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({
                "id": "call_1",
                "type": "function",
                "function": {"name": "read_file", "arguments": "{}"}
            })
        );
    }
}

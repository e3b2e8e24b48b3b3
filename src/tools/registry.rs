use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use super::Tool;
use super::payload::format_error;
use super::schema::ToolSchema;
use crate::error::ToolError;
use crate::llm::{ToolCall, ToolResult};

/// Registry for tools, kept in registration order
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool { name });
        }
        debug!(tool = %name, "registered tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Get tool names
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn schemas(&self) -> Vec<&ToolSchema> {
        self.tools.values().map(Tool::schema).collect()
    }

    /// The `tools` array of a chat completion request
    pub fn to_request_tools(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self.schemas())
    }

    /// Safe-call the named tool. An unknown name yields an error payload.
    pub fn dispatch(&self, name: &str, json_args: &str) -> String {
        match self.get(name) {
            Some(tool) => tool.safe_call(json_args),
            None => {
                warn!(tool = %name, "unknown tool requested");
                format_error(format!("unknown tool '{}'", name))
            }
        }
    }

    /// Run a model-issued tool call and wrap its output as a result message
    pub fn execute(&self, call: &ToolCall) -> ToolResult {
        debug!(tool = %call.name, id = %call.id, "executing tool call");
        ToolResult {
            tool_call_id: call.id.clone(),
            result: self.dispatch(&call.name, &call.arguments),
        }
    }
}

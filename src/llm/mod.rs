mod tool_call;

pub use tool_call::{ToolCall, ToolResult, parse_tool_calls};

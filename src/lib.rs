//! Compile statically declared tools into LLM function-calling schemas and
//! invoke them with JSON arguments.
//!
//! ```
//! use llm_tools::{Param, Tool, TypeRef};
//!
//! let tool = Tool::builder("greet")
//!     .description("Greet someone by name.")
//!     .param(Param::new("name", TypeRef::String, "Who to greet"))
//!     .returns(TypeRef::String)
//!     .build(|args| Ok(format!("Hello, {}!", args.get::<String>("name")?)))
//!     .unwrap();
//!
//! assert_eq!(tool.safe_call(r#"{"name": "Ada"}"#), "Hello, Ada!");
//! assert!(tool.safe_call("{}").contains("\"is_error\":true"));
//! ```

pub mod config;
pub mod error;
pub mod llm;
pub mod tools;

pub use config::{Policy, ProjectConfig};
pub use error::ToolError;
pub use llm::{ToolCall, ToolResult, parse_tool_calls};
pub use tools::{
    Annotation, Arguments, BindError, BoundArgs, EnumDef, ErrorPayload, JsonType, Metadata, Param,
    StrEnum, Tool, ToolBuilder, ToolRegistry, ToolSchema, TypeRef, builtin_registry, format_error,
    format_exception, read_file_builder, read_file_tool,
};

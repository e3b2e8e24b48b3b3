mod args;
mod file;
mod payload;
mod registry;
mod schema;
mod tool;
mod types;

pub use args::{Arguments, BindError, BoundArgs};
pub use file::{READ_FILE, read_file_builder, read_file_tool};
pub use payload::{ErrorPayload, format_error, format_exception};
pub use registry::ToolRegistry;
pub use schema::{
    DeclaredParam, FunctionSchema, JsonType, ObjectKind, ParametersSchema, PropertySchema,
    ToolKind, ToolSchema, compile_param,
};
pub use tool::{Tool, ToolBuilder, ToolFn};
pub use types::{Annotation, EnumDef, Metadata, Param, StrEnum, TypeRef};

use crate::config::ProjectConfig;
use crate::error::ToolError;

/// Names of the tools this crate ships
pub const BUILTIN_TOOLS: &[&str] = &[READ_FILE];

/// Build a registry holding the built-in tools enabled by `config`
pub fn builtin_registry(config: &ProjectConfig) -> Result<ToolRegistry, ToolError> {
    if let Some(unknown) = config
        .tools
        .iter()
        .flatten()
        .find(|name| !BUILTIN_TOOLS.contains(&name.as_str()))
    {
        return Err(ToolError::Config(format!("unknown tool: {}", unknown)));
    }

    let mut registry = ToolRegistry::new();
    if config.enables(READ_FILE) {
        registry.register(read_file_tool(config.policy.clone())?)?;
    }
    Ok(registry)
}

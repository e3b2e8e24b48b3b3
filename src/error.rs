/// Errors raised while defining, registering or configuring tools.
///
/// These are programmer errors: they surface when a tool is declared, never
/// while it is being called.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("tool `{tool}`: tool functions must have a description")]
    MissingDescription { tool: String },

    #[error("tool `{tool}`: tool functions must return a string, found {found}")]
    InvalidReturnType { tool: String, found: String },

    #[error(
        "parameter `{param}`: parameters must be annotated with a type and a single description ({reason})"
    )]
    MalformedAnnotation { param: String, reason: String },

    #[error("parameter `{param}`: annotated parameter type {type_name} not supported")]
    UnsupportedParameterType { param: String, type_name: String },

    #[error("tool `{tool}`: parameter `{param}` is declared more than once")]
    DuplicateParameter { tool: String, param: String },

    #[error("tool `{name}` is already registered")]
    DuplicateTool { name: String },

    #[error("configuration error: {0}")]
    Config(String),
}

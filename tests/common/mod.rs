#![allow(dead_code)]

use serde_json::Value;

use llm_tools::{StrEnum, Tool, ToolBuilder, TypeRef};

/// A builder with a valid name, description and return type.
pub fn described(name: &str) -> ToolBuilder {
    Tool::builder(name)
        .description("tool description")
        .returns(TypeRef::String)
}

/// Parse tool output that is expected to be JSON.
pub fn parse(output: &str) -> Value {
    serde_json::from_str(output).expect("output should be JSON")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Fast,
    Careful,
    Off,
}

impl StrEnum for Mode {
    const NAME: &'static str = "Mode";
    const VARIANTS: &'static [Self] = &[Self::Fast, Self::Careful, Self::Off];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Careful => "careful",
            Self::Off => "off",
        }
    }
}

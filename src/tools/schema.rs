use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{Metadata, Param, TypeRef};
use crate::error::ToolError;

/// JSON type emitted for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Integer,
    Number,
    Boolean,
    String,
    Array,
    Null,
}

/// Schema fragment for a single parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: JsonType,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Function,
}

/// The `parameters` object of a function schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParametersSchema {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub properties: IndexMap<String, PropertySchema>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    /// Absent when the tool takes no arguments at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParametersSchema>,
}

/// Complete function-calling description of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub kind: ToolKind,
    pub function: FunctionSchema,
}

impl ToolSchema {
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// A parameter after compilation: its schema plus what the call path needs
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredParam {
    pub name: String,
    pub schema: PropertySchema,
    pub nullable: bool,
    pub default: Option<Value>,
}

impl DeclaredParam {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// The caller may pass null for it or leave it out
    pub fn is_optional(&self) -> bool {
        self.nullable || self.has_default()
    }
}

/// Compile one declared parameter into its schema fragment.
///
/// The annotation must carry exactly one non-empty text description. Nullable
/// types emit the same `type` as their plain form.
pub fn compile_param(param: &Param) -> Result<PropertySchema, ToolError> {
    let malformed = |reason: String| ToolError::MalformedAnnotation {
        param: param.name.clone(),
        reason,
    };

    let annotation = param
        .annotation
        .as_ref()
        .ok_or_else(|| malformed("missing annotation".to_string()))?;

    let description = match annotation.metadata() {
        [Metadata::Text(text)] if !text.trim().is_empty() => text.clone(),
        [Metadata::Text(_)] => return Err(malformed("description is empty".to_string())),
        [Metadata::Value(value)] => {
            return Err(malformed(format!("description must be a string, got {}", value)));
        }
        [] => return Err(malformed("no description given".to_string())),
        many => {
            return Err(malformed(format!(
                "expected one description, got {} metadata items",
                many.len()
            )));
        }
    };

    let (kind, values) = resolve(annotation.base()).ok_or_else(|| {
        ToolError::UnsupportedParameterType {
            param: param.name.clone(),
            type_name: annotation.base().to_string(),
        }
    })?;

    Ok(PropertySchema {
        description,
        kind,
        values,
    })
}

fn resolve(ty: &TypeRef) -> Option<(JsonType, Option<Vec<String>>)> {
    match ty {
        TypeRef::Enum(def) => Some((JsonType::String, Some(def.values.clone()))),
        TypeRef::Optional(inner) => scalar(inner).map(|kind| (kind, None)),
        other => scalar(other).map(|kind| (kind, None)),
    }
}

fn scalar(ty: &TypeRef) -> Option<JsonType> {
    match ty {
        TypeRef::Integer => Some(JsonType::Integer),
        TypeRef::Number => Some(JsonType::Number),
        TypeRef::Boolean => Some(JsonType::Boolean),
        TypeRef::String => Some(JsonType::String),
        TypeRef::Array => Some(JsonType::Array),
        TypeRef::None => Some(JsonType::Null),
        _ => None,
    }
}

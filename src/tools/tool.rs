use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use super::args::{Arguments, BindError, BoundArgs, bind};
use super::payload::{ErrorPayload, format_exception};
use super::schema::{
    DeclaredParam, FunctionSchema, ObjectKind, ParametersSchema, ToolKind, ToolSchema,
    compile_param,
};
use super::types::{Param, TypeRef};
use crate::error::ToolError;

/// Body of a tool: receives bound arguments, returns the tool's text output
pub type ToolFn = dyn Fn(&BoundArgs) -> Result<String> + Send + Sync;

/// A callable together with its compiled function-calling schema.
///
/// The schema is built once by [`ToolBuilder::build`] and never changes.
#[derive(Clone)]
pub struct Tool {
    schema: ToolSchema,
    params: Vec<DeclaredParam>,
    function: Arc<ToolFn>,
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl Tool {
    /// Start declaring a tool with the given identifier
    pub fn builder(name: impl Into<String>) -> ToolBuilder {
        ToolBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.schema.function.name
    }

    pub fn description(&self) -> &str {
        &self.schema.function.description
    }

    pub fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    pub fn params(&self) -> &[DeclaredParam] {
        &self.params
    }

    /// Call the tool directly.
    ///
    /// Binding errors and errors returned by the tool body are passed back
    /// unchanged.
    pub fn call(&self, args: Arguments) -> Result<String> {
        let bound = bind(self.name(), &self.params, args)?;
        debug!(tool = %self.name(), args = bound.len(), "calling tool");
        (self.function)(&bound)
    }

    /// Call the tool with a JSON object of keyword arguments.
    ///
    /// Never fails: decode errors, binding errors, errors from the body and
    /// panics are all returned as an `{"is_error": true, "exception": ...}`
    /// payload. On success the body's output is returned verbatim.
    ///
    /// A caught panic still runs the process panic hook, so the default hook
    /// prints its message to stderr. The hook is left alone because it is
    /// process-wide state owned by the embedding program.
    pub fn safe_call(&self, json_args: &str) -> String {
        match panic::catch_unwind(AssertUnwindSafe(|| self.call_json(json_args))) {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(tool = %self.name(), error = %format!("{:#}", e), "tool call failed");
                format_exception(&e)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(tool = %self.name(), panic = %message, "tool panicked");
                ErrorPayload::Exception(format!("tool panicked: {}", message)).to_json()
            }
        }
    }

    fn call_json(&self, json_args: &str) -> Result<String> {
        let value: Value =
            serde_json::from_str(json_args).context("failed to decode tool arguments")?;
        let Value::Object(map) = value else {
            return Err(BindError::NotAnObject {
                tool: self.name().to_string(),
                found: json_kind(&value).to_string(),
            }
            .into());
        };
        self.call(Arguments::from_map(map))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Declaration of a tool: identifier, documentation, parameters and return type
#[derive(Debug, Clone)]
pub struct ToolBuilder {
    name: String,
    description: Option<String>,
    params: Vec<Param>,
    returns: Option<TypeRef>,
}

impl ToolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: Vec::new(),
            returns: None,
        }
    }

    /// Documentation text shown to the model
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Append a parameter; declaration order is kept
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Declared return type. Tools must return [`TypeRef::String`].
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Validate the declaration and compile it into a [`Tool`].
    ///
    /// # Errors
    ///
    /// Fails with [`ToolError::MissingDescription`], then
    /// [`ToolError::InvalidReturnType`], then the first parameter error in
    /// declaration order.
    pub fn build<F>(self, function: F) -> Result<Tool, ToolError>
    where
        F: Fn(&BoundArgs) -> Result<String> + Send + Sync + 'static,
    {
        let description = match self.description {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(ToolError::MissingDescription { tool: self.name }),
        };

        match &self.returns {
            Some(TypeRef::String) => {}
            other => {
                return Err(ToolError::InvalidReturnType {
                    tool: self.name,
                    found: other
                        .as_ref()
                        .map_or_else(|| "no return type".to_string(), ToString::to_string),
                });
            }
        }

        let mut seen = HashSet::new();
        let mut params = Vec::with_capacity(self.params.len());
        for param in self.params {
            if !seen.insert(param.name.clone()) {
                return Err(ToolError::DuplicateParameter {
                    tool: self.name,
                    param: param.name,
                });
            }
            let schema = compile_param(&param)?;
            let nullable = matches!(
                param.annotation.as_ref().map(|a| a.base()),
                Some(TypeRef::Optional(_) | TypeRef::None)
            );
            params.push(DeclaredParam {
                name: param.name,
                schema,
                nullable,
                default: param.default,
            });
        }

        let parameters = if params.is_empty() {
            None
        } else {
            Some(ParametersSchema {
                kind: ObjectKind::Object,
                properties: params
                    .iter()
                    .map(|p| (p.name.clone(), p.schema.clone()))
                    .collect::<IndexMap<_, _>>(),
                required: params
                    .iter()
                    .filter(|p| !p.has_default())
                    .map(|p| p.name.clone())
                    .collect(),
            })
        };

        debug!(tool = %self.name, params = params.len(), "compiled tool schema");

        Ok(Tool {
            schema: ToolSchema {
                kind: ToolKind::Function,
                function: FunctionSchema {
                    name: self.name,
                    description,
                    parameters,
                },
            },
            params,
            function: Arc::new(function),
        })
    }
}

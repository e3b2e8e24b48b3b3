use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::schema::DeclaredParam;
use super::types::StrEnum;

/// Arguments for a direct call: positional values followed by keyword values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    keyword: IndexMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    /// Keyword-only arguments taken from a decoded JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            positional: Vec::new(),
            keyword: map.into_iter().collect(),
        }
    }
}

/// Why a set of arguments could not be matched to a tool's parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("{tool}: missing required argument `{name}`")]
    MissingArgument { tool: String, name: String },

    #[error("{tool}: unexpected argument `{name}`")]
    UnexpectedArgument { tool: String, name: String },

    #[error("{tool}: argument `{name}` given more than once")]
    DuplicateArgument { tool: String, name: String },

    #[error("{tool}: takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        tool: String,
        expected: usize,
        given: usize,
    },

    #[error("{tool}: arguments must be a JSON object, got {found}")]
    NotAnObject { tool: String, found: String },
}

/// Arguments matched to every declared parameter, in declaration order.
/// Parameters the caller left out hold their default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    values: IndexMap<String, Value>,
}

impl BoundArgs {
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Deserialize the named argument into `T`
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.require(name)?;
        T::deserialize(value).with_context(|| format!("invalid value for argument `{}`", name))
    }

    /// Like [`BoundArgs::get`], mapping JSON null to `None`
    pub fn get_opt<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.require(name)? {
            Value::Null => Ok(None),
            _ => self.get(name).map(Some),
        }
    }

    /// Read the named argument as a variant of a closed enumeration
    pub fn get_enum<E: StrEnum>(&self, name: &str) -> Result<E> {
        let text = self
            .require(name)?
            .as_str()
            .with_context(|| format!("argument `{}` must be a string", name))?;
        E::parse_value(text)
            .with_context(|| format!("`{}` is not a valid {} for argument `{}`", text, E::NAME, name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .with_context(|| format!("no argument named `{}`", name))
    }
}

/// Match `args` to `params` the way a function call binds its arguments.
pub(crate) fn bind(
    tool: &str,
    params: &[DeclaredParam],
    args: Arguments,
) -> Result<BoundArgs, BindError> {
    let Arguments {
        positional,
        mut keyword,
    } = args;

    if positional.len() > params.len() {
        return Err(BindError::TooManyPositional {
            tool: tool.to_string(),
            expected: params.len(),
            given: positional.len(),
        });
    }

    if let Some(name) = keyword
        .keys()
        .find(|name| !params.iter().any(|p| &p.name == *name))
    {
        return Err(BindError::UnexpectedArgument {
            tool: tool.to_string(),
            name: name.clone(),
        });
    }

    let mut values = IndexMap::with_capacity(params.len());
    let mut positional = positional.into_iter();
    for param in params {
        let value = match positional.next() {
            Some(value) => {
                if keyword.contains_key(&param.name) {
                    return Err(BindError::DuplicateArgument {
                        tool: tool.to_string(),
                        name: param.name.clone(),
                    });
                }
                value
            }
            None => match keyword.shift_remove(&param.name) {
                Some(value) => value,
                None => param
                    .default
                    .clone()
                    .ok_or_else(|| BindError::MissingArgument {
                        tool: tool.to_string(),
                        name: param.name.clone(),
                    })?,
            },
        };
        values.insert(param.name.clone(), value);
    }

    Ok(BoundArgs { values })
}

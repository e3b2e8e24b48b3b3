use std::fmt;

use serde_json::Value;

/// Declared type of a tool parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Integer,
    Number,
    Boolean,
    String,
    /// A sequence with unspecified element type
    Array,
    /// The absence-of-value marker
    None,
    /// Nullable / omittable form of the wrapped type
    Optional(Box<TypeRef>),
    /// A closed string-valued enumeration
    Enum(EnumDef),
    /// Any other named type
    Named(String),
}

impl TypeRef {
    /// Wrap a type as nullable
    pub fn optional(inner: TypeRef) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Reference a closed enumeration declared through [`StrEnum`]
    pub fn enumeration<E: StrEnum>() -> Self {
        Self::Enum(EnumDef::of::<E>())
    }

    /// Reference a type this crate has no mapping for
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::None => write!(f, "none"),
            Self::Optional(inner) => write!(f, "optional<{}>", inner),
            Self::Enum(def) => write!(f, "enum {}", def.name),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A closed set of string values, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumDef {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the definition from a Rust enum's variants
    pub fn of<E: StrEnum>() -> Self {
        Self::new(E::NAME, E::VARIANTS.iter().map(StrEnum::as_str))
    }
}

/// A Rust enum whose variants each carry a string value.
///
/// `VARIANTS` must list every variant in declaration order; that order is the
/// order of the emitted `enum` list.
///
/// ```
/// use llm_tools::StrEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Unit {
///     Celsius,
///     Fahrenheit,
/// }
///
/// impl StrEnum for Unit {
///     const NAME: &'static str = "Unit";
///     const VARIANTS: &'static [Self] = &[Self::Celsius, Self::Fahrenheit];
///
///     fn as_str(&self) -> &'static str {
///         match self {
///             Self::Celsius => "celsius",
///             Self::Fahrenheit => "fahrenheit",
///         }
///     }
/// }
///
/// assert_eq!(Unit::parse_value("fahrenheit"), Some(Unit::Fahrenheit));
/// ```
pub trait StrEnum: Sized + Copy + 'static {
    const NAME: &'static str;
    const VARIANTS: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Find the variant carrying `value`
    fn parse_value(value: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str() == value)
    }
}

/// One piece of metadata attached to a type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    Text(String),
    Value(Value),
}

impl From<&str> for Metadata {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Metadata {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Metadata {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// A base type plus its metadata. A well-formed parameter annotation carries
/// exactly one non-empty `Metadata::Text`, the parameter description.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    base: TypeRef,
    metadata: Vec<Metadata>,
}

impl Annotation {
    pub fn new(base: TypeRef, description: impl Into<String>) -> Self {
        Self {
            base,
            metadata: vec![Metadata::Text(description.into())],
        }
    }

    /// An annotation with no metadata at all
    pub fn bare(base: TypeRef) -> Self {
        Self {
            base,
            metadata: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: impl Into<Metadata>) -> Self {
        self.metadata.push(metadata.into());
        self
    }

    pub fn base(&self) -> &TypeRef {
        &self.base
    }

    pub fn metadata(&self) -> &[Metadata] {
        &self.metadata
    }
}

/// A parameter as declared by the tool author.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub annotation: Option<Annotation>,
    pub default: Option<Value>,
}

impl Param {
    /// A parameter annotated with its type and description
    pub fn new(name: impl Into<String>, base: TypeRef, description: impl Into<String>) -> Self {
        Self::annotated(name, Annotation::new(base, description))
    }

    pub fn annotated(name: impl Into<String>, annotation: Annotation) -> Self {
        Self {
            name: name.into(),
            annotation: Some(annotation),
            default: None,
        }
    }

    /// A parameter with no annotation
    pub fn unannotated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            default: None,
        }
    }

    /// Give the parameter a default value, which makes it non-required
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

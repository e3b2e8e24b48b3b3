use serde_json::{Value, json};

/// Error-shaped tool output. Both shapes carry `"is_error": true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPayload {
    /// An unexpected failure, rendered as text
    Exception(String),
    /// A known error reported without a failure value
    Error(String),
}

impl ErrorPayload {
    pub fn to_json(&self) -> String {
        match self {
            Self::Exception(text) => json!({"is_error": true, "exception": text}),
            Self::Error(message) => json!({"is_error": true, "error": message}),
        }
        .to_string()
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Exception(text) | Self::Error(text) => text,
        }
    }

    /// Recognise an error payload in tool output. Plain results yield `None`.
    pub fn detect(output: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(output).ok()?;
        let object = value.as_object()?;
        if object.get("is_error").and_then(Value::as_bool) != Some(true) {
            return None;
        }
        if let Some(text) = object.get("exception").and_then(Value::as_str) {
            return Some(Self::Exception(text.to_string()));
        }
        object
            .get("error")
            .and_then(Value::as_str)
            .map(|message| Self::Error(message.to_string()))
    }
}

/// Render a failure as `{"is_error": true, "exception": ...}`, including its
/// context chain.
pub fn format_exception(err: &anyhow::Error) -> String {
    ErrorPayload::Exception(format!("{:#}", err)).to_json()
}

/// Render a known error as `{"is_error": true, "error": ...}`
pub fn format_error(message: impl Into<String>) -> String {
    ErrorPayload::Error(message.into()).to_json()
}

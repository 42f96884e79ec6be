//! Backend error body
//!
//! The API reports failures as JSON with either a `detail` string or a
//! `detail` list of `{loc, msg}` field errors. Some endpoints use `message`
//! instead. [`ApiErrorBody::message`] flattens any of these into one line.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message used when the body carries nothing readable
pub const DEFAULT_ERROR_MESSAGE: &str = "API request failed";

/// A single field-level validation error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
}

impl FieldError {
    /// Last segment of `loc`, or `"field"` when absent
    pub fn field(&self) -> String {
        match self.loc.last() {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "field".to_string(),
        }
    }
}

/// `detail` is either a plain string or a list of field errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

/// Error body as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parse a raw response body; unparseable input yields an empty body
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// Human-readable message for display
    pub fn message(&self) -> String {
        match &self.detail {
            Some(ErrorDetail::Message(m)) if !m.is_empty() => return m.clone(),
            Some(ErrorDetail::Fields(fields)) if !fields.is_empty() => {
                return fields
                    .iter()
                    .map(|e| format!("{}: {}", e.field(), e.msg))
                    .collect::<Vec<_>>()
                    .join(", ");
            }
            _ => {}
        }
        match &self.message {
            Some(m) if !m.is_empty() => m.clone(),
            _ => DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

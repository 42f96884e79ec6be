//! Client error types

use thiserror::Error;

/// How an error reached the user
///
/// Every kind is displayed the same way; the distinction only matters for
/// logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, the request never produced a response
    Network,
    /// The backend answered with a non-2xx status or an unreadable body
    Response,
    /// A client-side check refused the action before any request was sent
    Precondition,
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is already flattened from the body
    #[error("{message}")]
    Api { status: u16, message: String },

    /// No session is stored
    #[error("Authentication required")]
    Unauthorized,

    /// Cached permissions lack the capability
    #[error("Access denied: missing permission {0}")]
    AccessDenied(String),

    /// A form or business rule refused the action
    #[error("{0}")]
    Precondition(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Http(e) if e.is_decode() => ErrorKind::Response,
            ClientError::Http(_) => ErrorKind::Network,
            ClientError::Api { .. }
            | ClientError::InvalidResponse(_)
            | ClientError::Serialization(_) => ErrorKind::Response,
            ClientError::Unauthorized
            | ClientError::AccessDenied(_)
            | ClientError::Precondition(_)
            | ClientError::Storage(_)
            | ClientError::Config(_) => ErrorKind::Precondition,
        }
    }

    /// HTTP status, for backend-reported errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text to show in an error dialog
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(e) if e.is_connect() || e.is_timeout() => {
                "Could not connect to server".to_string()
            }
            ClientError::Unauthorized => "Please login first.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("invalid {}", e.code))
                    })
                    .unwrap_or_else(|| "invalid".to_string());
                format!("{field}: {reason}")
            })
            .collect();
        fields.sort();
        ClientError::Precondition(fields.join(", "))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

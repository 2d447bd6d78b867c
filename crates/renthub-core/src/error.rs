// Error types for the auth client
//
// Three user-facing failure classes, mirroring how the user service reports
// them: rejected credentials (re-authenticate), malformed registration input
// (show field messages), and connectivity loss (retry guidance). Token parse
// failures get their own variant; callers treat them as an expired credential.

use thiserror::Error;

/// Result type alias for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// A single field-level validation message from the user service
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors surfaced by the auth gateway and session store
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Bad credentials, or a token the server no longer accepts
    #[error("{0}")]
    Authentication(String),

    /// Malformed registration or update input, with per-field messages
    #[error("validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    /// No response from the server
    #[error("network error: {0}")]
    Network(String),

    /// A bearer token that could not be parsed; treated as expired
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AuthError {
    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        AuthError::Authentication(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        AuthError::Network(msg.into())
    }

    /// Create an invalid-token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        AuthError::InvalidToken(msg.into())
    }

    /// Create a validation error from (field, message) pairs
    pub fn validation<I, F, M>(fields: I) -> Self
    where
        I: IntoIterator<Item = (F, M)>,
        F: Into<String>,
        M: Into<String>,
    {
        AuthError::Validation(
            fields
                .into_iter()
                .map(|(field, message)| FieldError {
                    field: field.into(),
                    message: message.into(),
                })
                .collect(),
        )
    }

    /// True when the server rejected the presented credential (401-class)
    pub fn is_authentication(&self) -> bool {
        matches!(self, AuthError::Authentication(_))
    }
}

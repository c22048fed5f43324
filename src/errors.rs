use serde::Serialize;

/// Errors raised by the collaborators around the catalog core.
///
/// The query engine and the access gate are total and never produce one of
/// these; they come from the mock services, the identity source and the
/// configuration boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Stable machine-readable code, used by the CLI's JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::ValidationError(_) => "validation_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::AuthError(_) => "authentication_failed",
            Self::Conflict(_) => "conflict",
            Self::InsufficientStock(_) => "insufficient_stock",
            Self::FetchError(_) => "fetch_failed",
            Self::InternalError(_) => "internal_error",
        }
    }

    /// Message suitable for showing to an operator.
    /// Internal errors are reported generically.
    pub fn response_message(&self) -> String {
        match self {
            Self::InternalError(_) => "Internal error".to_string(),
            _ => self.to_string(),
        }
    }
}

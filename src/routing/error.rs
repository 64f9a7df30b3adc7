//! Request-time dispatch failures.

use axum::http::StatusCode;
use thiserror::Error;

/// Every runtime failure the dispatcher can produce. Each maps to one status.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered route matches the method and path.
    #[error("no route matches {method} {path}")]
    NotFound { method: String, path: String },

    /// Malformed body or path parameter.
    #[error("{0}")]
    BadRequest(String),

    /// The handler's reply could not be serialized.
    #[error("failed to encode response body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

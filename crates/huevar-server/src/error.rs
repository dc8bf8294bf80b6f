//! Service errors and their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use huevar_io::IoError;
use huevar_ops::OpsError;
use serde::Serialize;
use thiserror::Error;

/// Error raised while serving a request.
#[derive(Debug, Error)]
pub enum ServerError {
    /// `uid`, `auto_id` or `target_path` absent or empty.
    #[error("missing required parameters")]
    MissingParameters,

    /// Identity check failed.
    #[error("access denied for user '{0}'")]
    AccessDenied(String),

    /// Signed URL is malformed, forged or expired.
    #[error("invalid or expired signature")]
    InvalidSignature,

    /// Object key is not a safe relative path.
    #[error("invalid object key '{0}'")]
    InvalidKey(String),

    /// No object stored under the key.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Source bytes could not be decoded.
    #[error("failed to decode source image: {0}")]
    Decode(#[source] IoError),

    /// Batch generation failed.
    #[error(transparent)]
    Generation(#[from] OpsError),

    /// Object or record storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Record (de)serialisation failed.
    #[error("record error: {0}")]
    Record(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// `{message, error}` body sent on failure.
#[derive(Debug, Serialize)]
struct ErrorPayload {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerError {
    /// Wraps any displayable error as [`ServerError::Internal`].
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        Self::Internal(err.to_string())
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameters | Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::AccessDenied(_) | Self::InvalidSignature => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Decode(_)
            | Self::Generation(_)
            | Self::Storage(_)
            | Self::Record(_)
            | Self::Config(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let payload = match &self {
            Self::MissingParameters => ErrorPayload {
                message: "Missing required parameters.",
                error: None,
            },
            Self::AccessDenied(_) => ErrorPayload {
                message: "Access Denied",
                error: None,
            },
            Self::InvalidSignature => ErrorPayload {
                message: "Access Denied",
                error: Some(self.to_string()),
            },
            Self::InvalidKey(_) => ErrorPayload {
                message: "Bad Request",
                error: Some(self.to_string()),
            },
            Self::NotFound(_) => ErrorPayload {
                message: "Not Found",
                error: Some(self.to_string()),
            },
            _ => ErrorPayload {
                message: "Internal Server Error",
                error: Some(self.to_string()),
            },
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }
        (status, Json(payload)).into_response()
    }
}

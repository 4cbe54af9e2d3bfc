//! Error types for the FAQ assistant

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source document missing or unreadable
    #[error("Cannot read source document '{}': {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Embedding service failure (network, auth, rate limit, bad payload)
    #[error("Embedding service error: {0}")]
    Embedding(String),

    /// Chat-completion service failure
    #[error("Generation service error: {0}")]
    Generation(String),

    /// Vector index error
    #[error("Vector index error: {0}")]
    VectorIndex(String),

    /// Malformed API request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Chat session not found
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a file access error
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create a vector index error
    pub fn vector_index(message: impl Into<String>) -> Self {
        Self::VectorIndex(message.into())
    }

    /// Short machine-readable kind, used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::FileAccess { .. } => "file_access_error",
            Error::Embedding(_) => "embedding_error",
            Error::Generation(_) => "generation_error",
            Error::VectorIndex(_) => "vector_index_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::SessionNotFound(_) => "not_found",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
            Error::Http(_) => "http_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Error::Config(_) | Error::InvalidRequest(_) | Error::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Error::Embedding(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::Generation(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::FileAccess { .. } | Error::VectorIndex(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

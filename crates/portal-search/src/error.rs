//! Error types for the expert pipeline

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Expert pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Expert not found in the registry or index
    #[error("Expert not found: {0}")]
    ExpertNotFound(String),

    /// Embedding capability failure
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Text-completion capability failure
    #[error("Completion failed: {0}")]
    Completion(String),

    /// Vector index error
    #[error("Vector index error: {0}")]
    Index(String),

    /// Query deadline expired before an operation completed
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),

    /// Every selected expert failed or was absent
    #[error("All {attempted} selected experts failed")]
    AllExpertsFailed { attempted: usize },

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
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an expert-not-found error
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::ExpertNotFound(url.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a completion error
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion(message.into())
    }

    /// Create a vector index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }

    /// True for failures that degrade a single expert in a fan-out
    /// rather than the whole query.
    pub fn is_per_expert(&self) -> bool {
        matches!(
            self,
            Self::ExpertNotFound(_)
                | Self::Embedding(_)
                | Self::Index(_)
                | Self::DeadlineExceeded(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::ExpertNotFound(url) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Expert not found: {}", url),
            ),
            Error::Embedding(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "embedding_error", msg.clone())
            }
            Error::Completion(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "completion_error", msg.clone())
            }
            Error::Index(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "index_error", msg.clone())
            }
            Error::DeadlineExceeded(msg) => {
                (StatusCode::GATEWAY_TIMEOUT, "deadline_exceeded", msg.clone())
            }
            Error::AllExpertsFailed { .. } => (
                StatusCode::BAD_GATEWAY,
                "all_experts_failed",
                self.to_string(),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_failures_degrade_a_single_expert() {
        assert!(Error::not_found("https://a.example").is_per_expert());
        assert!(Error::embedding("embedder down").is_per_expert());
        assert!(Error::index("chunk set missing").is_per_expert());
        assert!(Error::DeadlineExceeded("retrieval too slow".into()).is_per_expert());
    }

    #[test]
    fn non_retrieval_failures_are_not_per_expert() {
        assert!(!Error::completion("generation down").is_per_expert());
        assert!(!Error::config("overlap too large").is_per_expert());
        assert!(!Error::AllExpertsFailed { attempted: 2 }.is_per_expert());
    }
}

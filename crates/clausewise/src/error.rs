//! Error types for ClauseWise

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for ClauseWise operations
pub type Result<T> = std::result::Result<T, Error>;

/// ClauseWise errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File parsing error
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Unsupported file type
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Remote inference error
    #[error("Inference error: {0}")]
    Inference(String),

    /// Speech engine is not installed or cannot be started
    #[error("Speech engine unavailable: {0}")]
    SpeechUnavailable(String),

    /// Speech synthesis failed
    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an inference error
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }

    /// Create a speech synthesis error
    pub fn speech(message: impl Into<String>) -> Self {
        Self::Speech(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", msg.clone())
            }
            Error::FileParse { filename, message } => (
                StatusCode::BAD_REQUEST,
                "parse_error",
                format!("Error extracting text from '{}': {}", filename, message),
            ),
            Error::UnsupportedFileType(msg) => {
                (StatusCode::BAD_REQUEST, "unsupported_type", msg.clone())
            }
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Error::Inference(msg) => (StatusCode::BAD_GATEWAY, "inference_error", msg.clone()),
            Error::SpeechUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "speech_unavailable",
                msg.clone(),
            ),
            Error::Speech(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "speech_error", msg.clone())
            }
            Error::DocumentNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Document not found: {}", id),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
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

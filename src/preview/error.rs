//! Preview Server Error Types
//!
//! Errors from loading the fixture payload and running the server, with
//! conversion to JSON HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::charts::ChartError;

/// Preview server error types
#[derive(Error, Debug)]
pub enum PreviewError {
    /// Fixture file could not be read
    #[error("Failed to read fixture {path:?}: {error}")]
    Fixture { path: PathBuf, error: String },

    /// Fixture is not a valid aggregate payload
    #[error("Invalid fixture: {0}")]
    InvalidFixture(#[from] ChartError),

    /// Static asset directory is missing
    #[error("Static directory not found: {0:?}")]
    StaticDir(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for PreviewError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            PreviewError::Fixture { .. } => (StatusCode::SERVICE_UNAVAILABLE, "FIXTURE_UNAVAILABLE"),
            PreviewError::InvalidFixture(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_FIXTURE"),
            PreviewError::StaticDir(_) => (StatusCode::NOT_FOUND, "STATIC_DIR_MISSING"),
            PreviewError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            PreviewError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Preview error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for preview operations
pub type PreviewResult<T> = Result<T, PreviewError>;

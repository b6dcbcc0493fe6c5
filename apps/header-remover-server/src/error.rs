//! Error types for the HTTP layer

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::RedactError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Upload rejected before any processing
    #[error("{0}")]
    BadRequest(String),

    #[error("Yükleme okunamadı: {0}")]
    Multipart(#[from] MultipartError),

    /// Invalid input or processing failure from the redactor
    #[error(transparent)]
    Redaction(#[from] RedactError),

    /// Anything we did not anticipate
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Redaction(_) => StatusCode::BAD_REQUEST,
            // 413 when the body limit was hit, 400 for malformed forms
            AppError::Multipart(e) => e.status(),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                format!("Sunucu hatası: {}", msg)
            }
            AppError::Redaction(e) => {
                tracing::warn!("Redaction rejected: {}", e);
                self.to_string()
            }
            _ => {
                tracing::debug!("Bad request: {}", self);
                self.to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

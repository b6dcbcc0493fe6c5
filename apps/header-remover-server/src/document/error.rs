//! Redaction error types

use thiserror::Error;

/// Errors surfaced by the header redactor
#[derive(Debug, Error)]
pub enum RedactError {
    /// Caller supplied something unusable: a corrupt PDF, no header terms,
    /// or a negative band/margin.
    #[error("{0}")]
    InvalidInput(String),

    /// Anything that went wrong while walking pages, applying redactions or
    /// writing the output document
    #[error("PDF işleme hatası: {0}")]
    Processing(String),
}

impl RedactError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        RedactError::InvalidInput(msg.into())
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        RedactError::Processing(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RedactError::InvalidInput(_))
    }
}

/// Result type alias for redaction operations
pub type RedactResult<T> = std::result::Result<T, RedactError>;

impl From<mupdf::Error> for RedactError {
    fn from(err: mupdf::Error) -> Self {
        RedactError::Processing(err.to_string())
    }
}

/// A text search that could not be completed
///
/// Never fatal: the redactor treats the term as having no matches on that
/// page and moves on.
#[derive(Debug, Error)]
#[error("search failed: {0}")]
pub struct SearchError(String);

impl SearchError {
    pub fn new(msg: impl Into<String>) -> Self {
        SearchError(msg.into())
    }
}

impl From<mupdf::Error> for SearchError {
    fn from(err: mupdf::Error) -> Self {
        SearchError(err.to_string())
    }
}

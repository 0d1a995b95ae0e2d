// ABOUTME: Error types for the md-slides library
// ABOUTME: Separates fatal format errors from file-layer and output errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideError {
    #[error("Format error: {0}")]
    FormatError(String),

    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl SlideError {
    /// True for errors raised by malformed document content.
    pub fn is_format_error(&self) -> bool {
        matches!(self, SlideError::FormatError(_))
    }
}

// Implement conversion from anyhow::Error to our SlideError
impl From<anyhow::Error> for SlideError {
    fn from(err: anyhow::Error) -> Self {
        SlideError::UnknownError(err.to_string())
    }
}

impl From<serde_json::Error> for SlideError {
    fn from(err: serde_json::Error) -> Self {
        SlideError::SerializationError(format!("JSON encoding failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SlideError>;

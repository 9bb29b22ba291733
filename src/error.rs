//! Error types for the style library.

use crate::types::StyleId;
use thiserror::Error;

/// Main error type for style operations.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Style not found: {0}")]
    StyleNotFound(StyleId),

    #[error("Unknown block type: {0}")]
    UnknownBlock(String),

    #[error("Operation not permitted")]
    Forbidden,

    #[error("Invalid or missing anti-forgery token")]
    InvalidToken,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Store is locked by another process")]
    Locked,

    #[error("Store not initialized")]
    NotInitialized,

    #[error("Invalid store format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for StyleError {
    fn from(e: serde_json::Error) -> Self {
        StyleError::Serialization(e.to_string())
    }
}

/// Result type for style operations.
pub type Result<T> = std::result::Result<T, StyleError>;

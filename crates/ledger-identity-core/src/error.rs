//! Error types for Ledger Identity Core.

use thiserror::Error;

/// Errors raised while validating identifiers or encoding records.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("empty {0}")]
    EmptyField(&'static str),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

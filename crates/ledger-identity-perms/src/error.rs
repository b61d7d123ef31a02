//! Error types for signature verification.

use thiserror::Error;

/// Malformed verification input.
///
/// Every variant means the inputs could not even be interpreted. A signature
/// that parses but does not verify is not an error; verifiers return
/// `Ok(false)` for it.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid hex in {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    #[error("invalid base64 in {field}: {reason}")]
    InvalidBase64 { field: &'static str, reason: String },

    #[error("{field} must start with 0x")]
    MissingHexPrefix { field: &'static str },

    #[error("{field} has length {actual}, expected {expected}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("unparsable public key: {0}")]
    InvalidPublicKey(String),

    #[error("unparsable signature: {0}")]
    InvalidSignatureEncoding(String),

    #[error("unknown signature scheme: {0}")]
    UnknownScheme(String),

    #[error("unknown curve: {0}")]
    UnknownCurve(String),
}

/// Result type for verification.
pub type Result<T> = std::result::Result<T, VerifyError>;

//! Text decoders shared by the scheme verifiers.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Result, VerifyError};

/// Decode plain hex (no prefix).
pub fn decode_hex(field: &'static str, input: &str) -> Result<Vec<u8>> {
    hex::decode(input).map_err(|e| VerifyError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

/// Decode hex that must carry a `0x` (or `0X`) prefix.
pub fn decode_prefixed_hex(field: &'static str, input: &str) -> Result<Vec<u8>> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .ok_or(VerifyError::MissingHexPrefix { field })?;
    decode_hex(field, digits)
}

/// Decode standard, padded base64.
pub fn decode_base64(field: &'static str, input: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(input)
        .map_err(|e| VerifyError::InvalidBase64 {
            field,
            reason: e.to_string(),
        })
}

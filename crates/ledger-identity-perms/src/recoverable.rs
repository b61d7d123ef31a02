//! secp256k1 recoverable signatures over Keccak-256.
//!
//! The signer's public key is recovered from `(digest, signature)` and
//! compared with the claimed key. Keys are the 64-byte uncompressed point
//! without the leading `04` format byte; signatures are `0x`-prefixed hex of
//! `r ‖ s ‖ v`.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::encoding::{decode_hex, decode_prefixed_hex};
use crate::error::{Result, VerifyError};
use crate::scheme::SignatureScheme;
use crate::verifier::SignatureVerifier;

/// Length of a recoverable signature: 32-byte r, 32-byte s, 1-byte v.
pub const SIGNATURE_LEN: usize = 65;

/// Length of a public key: uncompressed point without its format byte.
pub const PUBLIC_KEY_LEN: usize = 64;

/// Verifier for [`SignatureScheme::EcdsaRecoverable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EcdsaRecoverable;

impl EcdsaRecoverable {
    /// Recover the signer's 64-byte public key.
    ///
    /// Returns `Ok(None)` if the signature is well formed but no key can be
    /// recovered from it.
    pub fn recover(message: &[u8], signature: &str) -> Result<Option<[u8; PUBLIC_KEY_LEN]>> {
        let raw = decode_prefixed_hex("signature", signature)?;
        if raw.len() != SIGNATURE_LEN {
            return Err(VerifyError::InvalidLength {
                field: "signature",
                expected: SIGNATURE_LEN,
                actual: raw.len(),
            });
        }

        let (sig, recid) = split_signature(&raw)?;
        let digest = Keccak256::digest(message);

        let key = match VerifyingKey::recover_from_prehash(&digest, &sig, recid) {
            Ok(key) => key,
            Err(_) => return Ok(None),
        };

        let point = key.to_encoded_point(false);
        let mut out = [0u8; PUBLIC_KEY_LEN];
        // Skip the 0x04 format byte.
        out.copy_from_slice(&point.as_bytes()[1..]);
        Ok(Some(out))
    }
}

/// Split `r ‖ s ‖ v` into a low-S signature and its recovery id.
fn split_signature(raw: &[u8]) -> Result<(Signature, RecoveryId)> {
    let v = raw[SIGNATURE_LEN - 1];
    // Accept both the raw parity and the 27/28 form wallets emit.
    let parity = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        other => return Err(VerifyError::InvalidRecoveryId(other)),
    };
    let mut recid = RecoveryId::from_byte(parity).ok_or(VerifyError::InvalidRecoveryId(v))?;

    let mut sig = Signature::from_slice(&raw[..SIGNATURE_LEN - 1])
        .map_err(|e| VerifyError::InvalidSignatureEncoding(e.to_string()))?;

    // Flipping s to the low half negates R's y-coordinate.
    if let Some(normalized) = sig.normalize_s() {
        sig = normalized;
        recid = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
    }

    Ok((sig, recid))
}

impl SignatureVerifier for EcdsaRecoverable {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::EcdsaRecoverable
    }

    fn verify(&self, message: &[u8], signature: &str, public_key: &str) -> Result<bool> {
        let claimed = decode_hex("public key", public_key)?;
        if claimed.len() != PUBLIC_KEY_LEN {
            return Err(VerifyError::InvalidLength {
                field: "public key",
                expected: PUBLIC_KEY_LEN,
                actual: claimed.len(),
            });
        }

        Ok(match Self::recover(message, signature)? {
            Some(recovered) => recovered[..] == claimed[..],
            None => false,
        })
    }
}

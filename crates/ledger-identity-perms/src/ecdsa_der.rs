//! ECDSA signatures in ASN.1 DER over SHA-256.
//!
//! Public keys are hex SEC1 points, compressed (33 bytes) or uncompressed
//! (65 bytes). The curve is fixed per deployment.

use k256::ecdsa::signature::Verifier as _;

use crate::encoding::decode_hex;
use crate::error::{Result, VerifyError};
use crate::scheme::{EcdsaCurve, SignatureScheme};
use crate::verifier::SignatureVerifier;

/// Verifier for [`SignatureScheme::EcdsaDer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EcdsaDer {
    curve: EcdsaCurve,
}

impl EcdsaDer {
    /// Create a verifier for the given curve.
    pub const fn new(curve: EcdsaCurve) -> Self {
        Self { curve }
    }

    /// The curve keys and signatures are interpreted on.
    pub const fn curve(&self) -> EcdsaCurve {
        self.curve
    }
}

fn invalid_key(e: impl std::fmt::Display) -> VerifyError {
    VerifyError::InvalidPublicKey(e.to_string())
}

fn invalid_signature(e: impl std::fmt::Display) -> VerifyError {
    VerifyError::InvalidSignatureEncoding(e.to_string())
}

impl SignatureVerifier for EcdsaDer {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::EcdsaDer
    }

    fn verify(&self, message: &[u8], signature: &str, public_key: &str) -> Result<bool> {
        let key_bytes = decode_hex("public key", public_key)?;
        let sig_bytes = decode_hex("signature", signature)?;

        match self.curve {
            EcdsaCurve::Secp256k1 => {
                let key =
                    k256::ecdsa::VerifyingKey::from_sec1_bytes(&key_bytes).map_err(invalid_key)?;
                let sig = k256::ecdsa::Signature::from_der(&sig_bytes).map_err(invalid_signature)?;
                // k256 only accepts low-S signatures; other signers may emit either.
                let sig = sig.normalize_s().unwrap_or(sig);
                Ok(key.verify(message, &sig).is_ok())
            }
            EcdsaCurve::P256 => {
                let key =
                    p256::ecdsa::VerifyingKey::from_sec1_bytes(&key_bytes).map_err(invalid_key)?;
                let sig = p256::ecdsa::Signature::from_der(&sig_bytes).map_err(invalid_signature)?;
                Ok(key.verify(message, &sig).is_ok())
            }
        }
    }
}

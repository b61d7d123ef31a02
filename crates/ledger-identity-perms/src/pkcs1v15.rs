//! RSA PKCS#1 v1.5 signatures over SHA-256.
//!
//! Public keys are base64 of either a PEM document or raw DER; both the
//! SubjectPublicKeyInfo and the bare PKCS#1 `RSAPublicKey` structures are
//! accepted. Signatures are base64 of the raw signature bytes.

use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use sha2::Sha256;

use crate::encoding::decode_base64;
use crate::error::{Result, VerifyError};
use crate::scheme::SignatureScheme;
use crate::verifier::SignatureVerifier;

const PEM_PREAMBLE: &[u8] = b"-----BEGIN";

/// Verifier for [`SignatureScheme::RsaPkcs1v15`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RsaPkcs1v15;

impl RsaPkcs1v15 {
    /// Parse a base64-wrapped PEM or DER public key.
    pub fn parse_public_key(encoded: &str) -> Result<RsaPublicKey> {
        let decoded = decode_base64("public key", encoded)?;

        let parsed = if decoded.starts_with(PEM_PREAMBLE) {
            let pem = std::str::from_utf8(&decoded)
                .map_err(|e| VerifyError::InvalidPublicKey(e.to_string()))?;
            RsaPublicKey::from_public_key_pem(pem)
                .ok()
                .or_else(|| RsaPublicKey::from_pkcs1_pem(pem).ok())
        } else {
            RsaPublicKey::from_public_key_der(&decoded)
                .ok()
                .or_else(|| RsaPublicKey::from_pkcs1_der(&decoded).ok())
        };

        parsed.ok_or_else(|| {
            VerifyError::InvalidPublicKey("not an SPKI or PKCS#1 RSA public key".to_string())
        })
    }
}

impl SignatureVerifier for RsaPkcs1v15 {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::RsaPkcs1v15
    }

    fn verify(&self, message: &[u8], signature: &str, public_key: &str) -> Result<bool> {
        let key = Self::parse_public_key(public_key)?;

        let raw = decode_base64("signature", signature)?;
        if raw.len() != key.size() {
            return Err(VerifyError::InvalidLength {
                field: "signature",
                expected: key.size(),
                actual: raw.len(),
            });
        }
        let sig = Signature::try_from(raw.as_slice())
            .map_err(|e| VerifyError::InvalidSignatureEncoding(e.to_string()))?;

        let verifying_key = VerifyingKey::<Sha256>::new(key);
        Ok(verifying_key.verify(message, &sig).is_ok())
    }
}

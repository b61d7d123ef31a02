//! The verifier seam between the grant coordinator and the schemes.

use crate::ecdsa_der::EcdsaDer;
use crate::error::Result;
use crate::pkcs1v15::RsaPkcs1v15;
use crate::recoverable::EcdsaRecoverable;
use crate::scheme::{EcdsaCurve, SignatureScheme};

/// Proves possession of the private key behind a claimed public key.
///
/// `signature` and `public_key` are in the scheme's text encoding; decoding
/// them is the verifier's job.
///
/// # Returns
/// - `Ok(true)` if the signature over `message` was made by `public_key`.
/// - `Ok(false)` if the inputs are well formed but the signature does not verify.
/// - `Err` if either input cannot be decoded.
pub trait SignatureVerifier: Send + Sync {
    /// The scheme this verifier implements.
    fn scheme(&self) -> SignatureScheme;

    /// Verify `signature` over `message` against `public_key`.
    fn verify(&self, message: &[u8], signature: &str, public_key: &str) -> Result<bool>;
}

/// A verifier for whichever scheme a deployment is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeVerifier {
    EcdsaRecoverable(EcdsaRecoverable),
    RsaPkcs1v15(RsaPkcs1v15),
    EcdsaDer(EcdsaDer),
}

impl SchemeVerifier {
    /// Build the verifier for a scheme, using the given curve for `ecdsa-der`.
    pub fn new(scheme: SignatureScheme, curve: EcdsaCurve) -> Self {
        match scheme {
            SignatureScheme::EcdsaRecoverable => SchemeVerifier::EcdsaRecoverable(EcdsaRecoverable),
            SignatureScheme::RsaPkcs1v15 => SchemeVerifier::RsaPkcs1v15(RsaPkcs1v15),
            SignatureScheme::EcdsaDer => SchemeVerifier::EcdsaDer(EcdsaDer::new(curve)),
        }
    }

    /// Build the verifier for a scheme with the default curve.
    pub fn for_scheme(scheme: SignatureScheme) -> Self {
        Self::new(scheme, EcdsaCurve::default())
    }
}

impl SignatureVerifier for SchemeVerifier {
    fn scheme(&self) -> SignatureScheme {
        match self {
            SchemeVerifier::EcdsaRecoverable(v) => v.scheme(),
            SchemeVerifier::RsaPkcs1v15(v) => v.scheme(),
            SchemeVerifier::EcdsaDer(v) => v.scheme(),
        }
    }

    fn verify(&self, message: &[u8], signature: &str, public_key: &str) -> Result<bool> {
        match self {
            SchemeVerifier::EcdsaRecoverable(v) => v.verify(message, signature, public_key),
            SchemeVerifier::RsaPkcs1v15(v) => v.verify(message, signature, public_key),
            SchemeVerifier::EcdsaDer(v) => v.verify(message, signature, public_key),
        }
    }
}

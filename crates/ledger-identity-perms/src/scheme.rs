//! Signature scheme selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VerifyError;

/// The signature scheme a deployment verifies access grants with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureScheme {
    /// secp256k1 recoverable signatures over a Keccak-256 digest.
    #[default]
    EcdsaRecoverable,
    /// RSA PKCS#1 v1.5 over a SHA-256 digest.
    RsaPkcs1v15,
    /// ECDSA with DER-encoded signatures over a SHA-256 digest.
    EcdsaDer,
}

impl SignatureScheme {
    /// All supported schemes.
    pub const ALL: [SignatureScheme; 3] = [
        SignatureScheme::EcdsaRecoverable,
        SignatureScheme::RsaPkcs1v15,
        SignatureScheme::EcdsaDer,
    ];

    /// The configuration name of this scheme.
    pub const fn name(&self) -> &'static str {
        match self {
            SignatureScheme::EcdsaRecoverable => "ecdsa-recoverable",
            SignatureScheme::RsaPkcs1v15 => "rsa-pkcs1v15",
            SignatureScheme::EcdsaDer => "ecdsa-der",
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureScheme {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignatureScheme::ALL
            .into_iter()
            .find(|scheme| scheme.name() == s)
            .ok_or_else(|| VerifyError::UnknownScheme(s.to_string()))
    }
}

/// Curve used by the [`SignatureScheme::EcdsaDer`] scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcdsaCurve {
    #[default]
    Secp256k1,
    P256,
}

impl fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcdsaCurve::Secp256k1 => f.write_str("secp256k1"),
            EcdsaCurve::P256 => f.write_str("p256"),
        }
    }
}

impl FromStr for EcdsaCurve {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "secp256k1" => Ok(EcdsaCurve::Secp256k1),
            "p256" => Ok(EcdsaCurve::P256),
            other => Err(VerifyError::UnknownCurve(other.to_string())),
        }
    }
}

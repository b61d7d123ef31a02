//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ledger_identity_perms::{EcdsaCurve, SchemeVerifier, SignatureScheme};

/// Invalid configuration document.
#[derive(Debug, Error)]
#[error("invalid engine configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

/// Configuration for the identity engine.
///
/// Exactly one signature scheme is active per deployment.
///
/// ```json
/// { "scheme": "ecdsa-der", "curve": "p256" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Scheme used to verify access-grant signatures.
    pub scheme: SignatureScheme,
    /// Curve for the `ecdsa-der` scheme. Ignored by the other schemes.
    pub curve: EcdsaCurve,
}

impl EngineConfig {
    /// Configuration for a given scheme with the default curve.
    pub fn with_scheme(scheme: SignatureScheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the verifier this configuration selects.
    pub fn verifier(&self) -> SchemeVerifier {
        SchemeVerifier::new(self.scheme, self.curve)
    }
}

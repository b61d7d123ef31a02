//! Deterministic signers for every supported signature scheme.
//!
//! Each signer produces public keys and signatures in exactly the text
//! encoding its scheme's verifier expects, so tests can issue an identity
//! with `public_key()` and request access with `sign_grant()`.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use k256::ecdsa::signature::Signer as _;
use ledger_identity_core::OrgId;
use ledger_identity_perms::{EcdsaCurve, GrantAccessMessage, SignatureScheme};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa::pkcs1v15::SigningKey as RsaSigningKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::signature::SignatureEncoding;
use rsa::RsaPrivateKey;
use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// RSA modulus size used by [`RsaSigner`].
pub const RSA_BITS: usize = 2048;

/// A key holder that can sign grant messages for one scheme.
pub trait TestSigner {
    /// The scheme this signer's output verifies under.
    fn scheme(&self) -> SignatureScheme;

    /// The public key, encoded as stored in a `User` record.
    fn public_key(&self) -> String;

    /// Sign arbitrary bytes.
    fn sign(&self, message: &[u8]) -> String;

    /// Sign the canonical grant message for `to`.
    fn sign_grant(&self, to: &OrgId) -> String {
        self.sign(&GrantAccessMessage::new(to).canonical_bytes())
    }
}

/// Build the signer for a scheme from a seed.
///
/// `ecdsa-der` signers use the default curve.
pub fn signer_for(scheme: SignatureScheme, seed: u64) -> Box<dyn TestSigner> {
    match scheme {
        SignatureScheme::EcdsaRecoverable => Box::new(RecoverableSigner::from_seed(seed)),
        SignatureScheme::RsaPkcs1v15 => Box::new(RsaSigner::from_seed(seed)),
        SignatureScheme::EcdsaDer => Box::new(DerSigner::from_seed(EcdsaCurve::default(), seed)),
    }
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ─────────────────────────────────────────────────────────────────────────────
// EcdsaRecoverable
// ─────────────────────────────────────────────────────────────────────────────

/// secp256k1 signer producing `0x`-prefixed `r||s||v` over Keccak-256.
pub struct RecoverableSigner {
    key: k256::ecdsa::SigningKey,
    v_offset: u8,
}

impl RecoverableSigner {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            key: k256::ecdsa::SigningKey::random(&mut rng(seed)),
            v_offset: 27,
        }
    }

    /// Emit `v` as the raw recovery id (0/1) instead of 27/28.
    pub fn with_raw_recovery_id(mut self) -> Self {
        self.v_offset = 0;
        self
    }
}

impl TestSigner for RecoverableSigner {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::EcdsaRecoverable
    }

    fn public_key(&self) -> String {
        let point = self.key.verifying_key().to_encoded_point(false);
        // Drop the 0x04 format byte.
        hex::encode(&point.as_bytes()[1..])
    }

    fn sign(&self, message: &[u8]) -> String {
        let digest = Keccak256::digest(message);
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(&digest)
            .expect("secp256k1 signing failed");
        let mut raw = sig.to_bytes().to_vec();
        raw.push(recid.to_byte() + self.v_offset);
        format!("0x{}", hex::encode(raw))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RsaPkcs1v15
// ─────────────────────────────────────────────────────────────────────────────

/// RSA signer producing base64 PKCS#1 v1.5 signatures over SHA-256.
pub struct RsaSigner {
    key: RsaPrivateKey,
}

impl RsaSigner {
    /// Keys are generated once per seed and cached for the process.
    pub fn from_seed(seed: u64) -> Self {
        static KEYS: OnceLock<Mutex<HashMap<u64, RsaPrivateKey>>> = OnceLock::new();

        let mut keys = KEYS
            .get_or_init(|| Mutex::new(HashMap::new()))
            .lock()
            .expect("rsa key cache poisoned");
        let key = keys
            .entry(seed)
            .or_insert_with(|| {
                RsaPrivateKey::new(&mut rng(seed), RSA_BITS).expect("rsa key generation failed")
            })
            .clone();
        Self { key }
    }

    /// The public key as base64 of a PEM `PUBLIC KEY` document.
    pub fn public_key_pem(&self) -> String {
        let pem = self
            .key
            .to_public_key()
            .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
            .expect("rsa pem encoding failed");
        STANDARD.encode(pem)
    }
}

impl TestSigner for RsaSigner {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::RsaPkcs1v15
    }

    /// Base64 of the DER SubjectPublicKeyInfo.
    fn public_key(&self) -> String {
        let der = self
            .key
            .to_public_key()
            .to_public_key_der()
            .expect("rsa der encoding failed");
        STANDARD.encode(der.as_bytes())
    }

    fn sign(&self, message: &[u8]) -> String {
        let signing_key = RsaSigningKey::<Sha256>::new(self.key.clone());
        STANDARD.encode(signing_key.sign(message).to_vec())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EcdsaDer
// ─────────────────────────────────────────────────────────────────────────────

enum DerKey {
    Secp256k1(k256::ecdsa::SigningKey),
    P256(p256::ecdsa::SigningKey),
}

/// ECDSA signer producing hex DER signatures over SHA-256.
pub struct DerSigner {
    key: DerKey,
    compressed: bool,
}

impl DerSigner {
    pub fn from_seed(curve: EcdsaCurve, seed: u64) -> Self {
        let key = match curve {
            EcdsaCurve::Secp256k1 => DerKey::Secp256k1(k256::ecdsa::SigningKey::random(&mut rng(seed))),
            EcdsaCurve::P256 => DerKey::P256(p256::ecdsa::SigningKey::random(&mut rng(seed))),
        };
        Self {
            key,
            compressed: false,
        }
    }

    /// Publish the key as a compressed SEC1 point.
    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }

    pub fn curve(&self) -> EcdsaCurve {
        match self.key {
            DerKey::Secp256k1(_) => EcdsaCurve::Secp256k1,
            DerKey::P256(_) => EcdsaCurve::P256,
        }
    }
}

impl TestSigner for DerSigner {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::EcdsaDer
    }

    fn public_key(&self) -> String {
        match &self.key {
            DerKey::Secp256k1(key) => {
                hex::encode(key.verifying_key().to_encoded_point(self.compressed).as_bytes())
            }
            DerKey::P256(key) => {
                hex::encode(key.verifying_key().to_encoded_point(self.compressed).as_bytes())
            }
        }
    }

    fn sign(&self, message: &[u8]) -> String {
        match &self.key {
            DerKey::Secp256k1(key) => {
                let sig: k256::ecdsa::Signature = key.sign(message);
                hex::encode(sig.to_der().as_bytes())
            }
            DerKey::P256(key) => {
                let sig: p256::ecdsa::Signature = key.sign(message);
                hex::encode(sig.to_der().as_bytes())
            }
        }
    }
}

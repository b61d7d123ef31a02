//! # Ledger Identity Permissions
//!
//! Proof-of-possession checks that gate access grants.
//!
//! ## Overview
//!
//! A service provider earns access to a user's identity record by presenting
//! a signature, made with the user's private key, over a canonical
//! authorization message naming the provider's organization. This crate
//! builds that message and verifies the signature against the public key
//! stored in the user's record.
//!
//! ## Signature Schemes
//!
//! Exactly one scheme is active per deployment:
//!
//! | Scheme | Public key | Signature | Hash |
//! |---|---|---|---|
//! | [`EcdsaRecoverable`] | hex, 64-byte secp256k1 point without `04` | `0x` hex, `r‖s‖v` | Keccak-256 |
//! | [`RsaPkcs1v15`] | base64 of PEM or DER | base64 | SHA-256 |
//! | [`EcdsaDer`] | hex SEC1 point, compressed or not | hex DER | SHA-256 |
//!
//! All three implement [`SignatureVerifier`]. Encoding problems are reported
//! as [`VerifyError`]; a well-formed signature that does not check out is
//! `Ok(false)`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledger_identity_core::OrgId;
//! use ledger_identity_perms::{GrantAccessMessage, SchemeVerifier, SignatureScheme, SignatureVerifier};
//!
//! fn check(public_key: &str, signature: &str) -> ledger_identity_perms::Result<bool> {
//!     let org = OrgId::new("Org2MSP").unwrap();
//!     let message = GrantAccessMessage::new(&org).canonical_bytes();
//!     let verifier = SchemeVerifier::for_scheme(SignatureScheme::EcdsaRecoverable);
//!     verifier.verify(&message, signature, public_key)
//! }
//! ```

pub mod ecdsa_der;
pub mod encoding;
pub mod error;
pub mod grant;
pub mod pkcs1v15;
pub mod recoverable;
pub mod scheme;
pub mod verifier;

pub use ecdsa_der::EcdsaDer;
pub use error::{Result, VerifyError};
pub use grant::{GrantAccessMessage, GRANT_ACCESS_ACTION};
pub use pkcs1v15::RsaPkcs1v15;
pub use recoverable::EcdsaRecoverable;
pub use scheme::{EcdsaCurve, SignatureScheme};
pub use verifier::{SchemeVerifier, SignatureVerifier};

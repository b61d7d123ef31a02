//! # Ledger Identity Testkit
//!
//! Testing utilities for Ledger Identity.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Signers**: Deterministic key holders for every signature scheme
//! - **Golden vectors**: Canonical grant messages that must never change
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Initialized deployments for integration tests
//!
//! ## Test Fixtures
//!
//! ```rust
//! use ledger_identity::SignatureScheme;
//! use ledger_identity_testkit::fixtures::{Deployment, PROVIDER_ORG};
//!
//! let deployment = Deployment::new(SignatureScheme::EcdsaDer);
//! let signer = deployment.signer(1);
//! deployment.issue("alice", signer.as_ref());
//! deployment.grant("alice", PROVIDER_ORG, signer.as_ref()).unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod signers;
pub mod vectors;

pub use fixtures::{caller, org, Deployment, AUTHORITY_ORG, OUTSIDER_ORG, PROVIDER_ORG};
pub use signers::{signer_for, DerSigner, RecoverableSigner, RsaSigner, TestSigner};
pub use vectors::{all_vectors, verify_all_vectors, GrantMessageVector};

/// Install a tracing subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

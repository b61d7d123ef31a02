//! Proptest generators for property-based testing.

use proptest::prelude::*;

use ledger_identity_core::OrgId;
use ledger_identity_perms::SignatureScheme;

/// Generate an MSP-style organization id.
pub fn msp_id() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,11}MSP"
}

/// Generate an arbitrary non-empty organization id, including quotes,
/// backslashes, control characters and non-ASCII text.
pub fn org_id() -> impl Strategy<Value = OrgId> {
    prop_oneof![msp_id(), "\\PC{1,24}", ".{1,8}"]
        .prop_map(|id| OrgId::new(id).expect("generated id is non-empty"))
}

/// Generate a user id.
pub fn user_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,23}"
}

/// Generate a hex metadata hash.
pub fn metadata_hash() -> impl Strategy<Value = String> {
    "[0-9a-f]{64}"
}

/// Generate a signature scheme.
pub fn scheme() -> impl Strategy<Value = SignatureScheme> {
    prop_oneof![
        Just(SignatureScheme::EcdsaRecoverable),
        Just(SignatureScheme::RsaPkcs1v15),
        Just(SignatureScheme::EcdsaDer),
    ]
}

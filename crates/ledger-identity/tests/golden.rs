//! Golden grant messages.
//!
//! Every deployment must sign and verify the exact same bytes, or
//! previously issued signatures stop verifying.

use ledger_identity::core::OrgId;
use ledger_identity::perms::{GrantAccessMessage, SchemeVerifier, SignatureVerifier};
use ledger_identity::SignatureScheme;
use ledger_identity_testkit::vectors::{all_vectors, message_for_vector, verify_all_vectors};
use ledger_identity_testkit::signer_for;

#[test]
fn test_golden_messages() {
    if let Err(failed) = verify_all_vectors() {
        panic!("grant message vectors changed: {:?}", failed);
    }
}

#[test]
fn test_signatures_over_golden_messages() {
    for scheme in SignatureScheme::ALL {
        let signer = signer_for(scheme, 1000);
        let verifier = SchemeVerifier::for_scheme(scheme);

        for vector in all_vectors() {
            let to = OrgId::new(vector.to).unwrap();
            let signature = signer.sign_grant(&to);

            // A grant signature verifies over the literal expected bytes
            assert!(
                verifier
                    .verify(vector.expected.as_bytes(), &signature, &signer.public_key())
                    .unwrap(),
                "{} / {}",
                scheme,
                vector.name
            );
            assert_eq!(
                GrantAccessMessage::new(&to).canonical_bytes(),
                message_for_vector(&vector)
            );
        }
    }
}

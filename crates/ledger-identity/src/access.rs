//! Signature-gated access grants.
//!
//! A service provider asks for access to a user's identity by presenting the
//! user's signature over the canonical grant message naming the provider's
//! own organization. No authority check applies: possession of the user's key
//! is the only gate. The provider's registry record is never consulted; the
//! organization id comes from the caller credential alone.

use ledger_identity_core::{CallerIdentity, GrantEvent, OrgId, UserId, GRANT_ACCESS_EVENT};
use ledger_identity_perms::{GrantAccessMessage, SignatureVerifier};
use ledger_identity_store::Transaction;
use tracing::{debug, info};

use crate::error::{IdentityError, Result};
use crate::identity::{require_present, IdentityRegistry};

/// A grant that has been recorded in a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub user_id: UserId,
    pub to: OrgId,
}

/// Runs the grant state machine against a configured verifier.
pub struct AccessGrantCoordinator<'v> {
    verifier: &'v dyn SignatureVerifier,
}

impl<'v> AccessGrantCoordinator<'v> {
    pub fn new(verifier: &'v dyn SignatureVerifier) -> Self {
        Self { verifier }
    }

    /// Grant the calling organization access to `user_id`.
    ///
    /// Steps, stopping at the first failure:
    /// 1. load the user
    /// 2. resolve the caller's organization
    /// 3. build the grant message for that organization
    /// 4. verify `signature` against the user's stored public key
    /// 5. reject an organization that already holds a grant
    /// 6. append the organization, store the user and emit `grantAccess`
    pub fn request_access(
        &self,
        tx: &mut Transaction<'_>,
        caller: &dyn CallerIdentity,
        user_id: &str,
        signature: &str,
    ) -> Result<AccessGrant> {
        let user_id = UserId::new(user_id)?;
        let mut user = IdentityRegistry::load(tx, &user_id)?;
        let org = caller.org_id()?;
        require_present("signature", signature)?;

        let message = GrantAccessMessage::new(&org).canonical_bytes();
        let valid = self
            .verifier
            .verify(&message, signature, &user.public_key)?;
        debug!(
            user = %user_id,
            org = %org,
            scheme = %self.verifier.scheme(),
            valid,
            "grant signature checked"
        );
        if !valid {
            return Err(IdentityError::InvalidSignature);
        }

        if !user.grant(org.clone()) {
            return Err(IdentityError::AlreadyGranted {
                user: user_id,
                org,
            });
        }
        IdentityRegistry::store(tx, &user_id, &user)?;

        let event = GrantEvent::new(user_id.clone(), org.clone());
        tx.set_event(GRANT_ACCESS_EVENT, event.to_bytes()?);

        info!(user = %user_id, org = %org, "access granted");
        Ok(AccessGrant { user_id, to: org })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_identity_core::{CallerError, StaticCaller, User};
    use ledger_identity_perms::{SchemeVerifier, SignatureScheme};
    use ledger_identity_store::{Ledger, MemoryLedger};
    use ledger_identity_testkit::signers::signer_for;

    struct Unresolvable;

    impl CallerIdentity for Unresolvable {
        fn org_id(&self) -> std::result::Result<OrgId, CallerError> {
            Err(CallerError::MissingOrganization)
        }
    }

    fn org(id: &str) -> OrgId {
        OrgId::new(id).unwrap()
    }

    fn ledger_with_user(public_key: &str) -> MemoryLedger {
        let ledger = MemoryLedger::new();
        let mut tx = Transaction::new(&ledger);
        let user = User::new(public_key, "h1");
        tx.put_state("user_alice", user.to_bytes().unwrap());
        tx.commit().unwrap();
        ledger
    }

    fn request(
        ledger: &MemoryLedger,
        verifier: &SchemeVerifier,
        caller: &dyn CallerIdentity,
        signature: &str,
    ) -> Result<AccessGrant> {
        let mut tx = Transaction::new(ledger);
        let grant =
            AccessGrantCoordinator::new(verifier).request_access(&mut tx, caller, "alice", signature)?;
        tx.commit()?;
        Ok(grant)
    }

    fn stored_user(ledger: &MemoryLedger) -> User {
        let value = ledger.read("user_alice").unwrap().unwrap();
        User::from_bytes(&value.value).unwrap()
    }

    #[test]
    fn test_grant_each_scheme() {
        for scheme in SignatureScheme::ALL {
            let signer = signer_for(scheme, 7);
            let verifier = SchemeVerifier::for_scheme(scheme);
            let ledger = ledger_with_user(&signer.public_key());

            let caller = StaticCaller::new(org("B"));
            let grant = request(&ledger, &verifier, &caller, &signer.sign_grant(&org("B")))
                .unwrap_or_else(|e| panic!("{} grant failed: {}", scheme, e));
            assert_eq!(grant.to, org("B"));
            assert!(stored_user(&ledger).has_permission(&org("B")));
        }
    }

    #[test]
    fn test_grant_emits_event() {
        let signer = signer_for(SignatureScheme::EcdsaRecoverable, 1);
        let verifier = SchemeVerifier::for_scheme(SignatureScheme::EcdsaRecoverable);
        let ledger = ledger_with_user(&signer.public_key());

        request(
            &ledger,
            &verifier,
            &StaticCaller::new(org("B")),
            &signer.sign_grant(&org("B")),
        )
        .unwrap();

        let events = ledger.events_since(0).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.name, "grantAccess");
        assert_eq!(
            events[0].event.payload.as_ref(),
            br#"{"userId":"alice","to":"B"}"#
        );
    }

    #[test]
    fn test_repeat_grant_rejected() {
        let signer = signer_for(SignatureScheme::EcdsaDer, 3);
        let verifier = SchemeVerifier::for_scheme(SignatureScheme::EcdsaDer);
        let ledger = ledger_with_user(&signer.public_key());
        let caller = StaticCaller::new(org("B"));
        let signature = signer.sign_grant(&org("B"));

        request(&ledger, &verifier, &caller, &signature).unwrap();
        let height = ledger.height().unwrap();

        let err = request(&ledger, &verifier, &caller, &signature).unwrap_err();
        assert!(matches!(err, IdentityError::AlreadyGranted { .. }));
        assert_eq!(stored_user(&ledger).permissions.len(), 1);
        assert_eq!(ledger.height().unwrap(), height);
    }

    #[test]
    fn test_signature_for_other_org_rejected() {
        let signer = signer_for(SignatureScheme::EcdsaRecoverable, 4);
        let verifier = SchemeVerifier::for_scheme(SignatureScheme::EcdsaRecoverable);
        let ledger = ledger_with_user(&signer.public_key());

        // Signed for B, presented by C
        let err = request(
            &ledger,
            &verifier,
            &StaticCaller::new(org("C")),
            &signer.sign_grant(&org("B")),
        )
        .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidSignature));
        assert!(stored_user(&ledger).permissions.is_empty());
    }

    #[test]
    fn test_signature_from_other_key_rejected() {
        let owner = signer_for(SignatureScheme::RsaPkcs1v15, 5);
        let other = signer_for(SignatureScheme::RsaPkcs1v15, 6);
        let verifier = SchemeVerifier::for_scheme(SignatureScheme::RsaPkcs1v15);
        let ledger = ledger_with_user(&owner.public_key());

        let err = request(
            &ledger,
            &verifier,
            &StaticCaller::new(org("B")),
            &other.sign_grant(&org("B")),
        )
        .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidSignature));
    }

    #[test]
    fn test_malformed_signature() {
        let signer = signer_for(SignatureScheme::EcdsaRecoverable, 8);
        let verifier = SchemeVerifier::for_scheme(SignatureScheme::EcdsaRecoverable);
        let ledger = ledger_with_user(&signer.public_key());

        let err = request(&ledger, &verifier, &StaticCaller::new(org("B")), "0xzz").unwrap_err();
        assert!(matches!(err, IdentityError::MalformedSignature(_)));
    }

    #[test]
    fn test_missing_user_checked_before_caller() {
        let ledger = MemoryLedger::new();
        let verifier = SchemeVerifier::for_scheme(SignatureScheme::EcdsaRecoverable);

        let err = request(&ledger, &verifier, &Unresolvable, "0x00").unwrap_err();
        assert!(matches!(err, IdentityError::UserNotFound(_)));
    }

    #[test]
    fn test_unresolvable_caller() {
        let signer = signer_for(SignatureScheme::EcdsaRecoverable, 9);
        let verifier = SchemeVerifier::for_scheme(SignatureScheme::EcdsaRecoverable);
        let ledger = ledger_with_user(&signer.public_key());

        let err = request(&ledger, &verifier, &Unresolvable, "0x00").unwrap_err();
        assert!(matches!(err, IdentityError::UpstreamIdentity(_)));
    }

    #[test]
    fn test_empty_signature_checked_after_user_lookup() {
        let verifier = SchemeVerifier::for_scheme(SignatureScheme::EcdsaRecoverable);
        let caller = StaticCaller::new(org("B"));

        let err = request(&MemoryLedger::new(), &verifier, &caller, "").unwrap_err();
        assert!(matches!(err, IdentityError::UserNotFound(_)));

        let signer = signer_for(SignatureScheme::EcdsaRecoverable, 10);
        let ledger = ledger_with_user(&signer.public_key());
        let err = request(&ledger, &verifier, &caller, "").unwrap_err();
        assert!(matches!(err, IdentityError::MalformedInput(_)));
    }
}

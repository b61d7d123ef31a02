//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use ledger_identity::{
    AccessGrant, EngineConfig, IdentityEngine, Result, SignatureScheme,
};
use ledger_identity_core::{OrgId, StaticCaller, User};
use ledger_identity_store::{Ledger, MemoryLedger};

use crate::signers::{signer_for, TestSigner};

/// Organization that initializes every fixture deployment.
pub const AUTHORITY_ORG: &str = "AuthorityMSP";

/// A service provider organization.
pub const PROVIDER_ORG: &str = "ProviderMSP";

/// An organization with no special standing.
pub const OUTSIDER_ORG: &str = "OutsiderMSP";

/// Parse an organization id, panicking on the empty string.
pub fn org(id: &str) -> OrgId {
    OrgId::new(id).expect("organization id must not be empty")
}

/// A caller already resolved to `id`.
pub fn caller(id: &str) -> StaticCaller {
    StaticCaller::new(org(id))
}

/// An initialized engine plus its authority caller.
pub struct Deployment<L: Ledger = MemoryLedger> {
    pub engine: IdentityEngine<L>,
    pub authority: StaticCaller,
}

impl Deployment<MemoryLedger> {
    /// An in-memory deployment using `scheme`.
    pub fn new(scheme: SignatureScheme) -> Self {
        Self::on_ledger(MemoryLedger::new(), EngineConfig::with_scheme(scheme))
    }
}

impl<L: Ledger> Deployment<L> {
    /// Initialize an engine over `ledger` with [`AUTHORITY_ORG`].
    pub fn on_ledger(ledger: L, config: EngineConfig) -> Self {
        let engine = IdentityEngine::new(ledger, config);
        let authority = caller(AUTHORITY_ORG);
        engine
            .initialize(&authority)
            .expect("fixture initialization failed");
        Self { engine, authority }
    }

    /// A signer matching the engine's configured scheme.
    pub fn signer(&self, seed: u64) -> Box<dyn TestSigner> {
        signer_for(self.engine.scheme(), seed)
    }

    /// Issue `user_id` bound to `signer`'s public key.
    pub fn issue(&self, user_id: &str, signer: &dyn TestSigner) -> User {
        self.engine
            .issue_identity(&self.authority, user_id, &signer.public_key(), "h1")
            .expect("fixture issuance failed")
    }

    /// Register `sp_id` as a service provider.
    pub fn register_provider(&self, sp_id: &str) {
        self.engine
            .add_service_provider(&self.authority, sp_id, sp_id, "provider-key")
            .expect("fixture registration failed");
    }

    /// Have `provider` request access to `user_id` with `signer`'s grant
    /// signature for that provider.
    pub fn grant(
        &self,
        user_id: &str,
        provider: &str,
        signer: &dyn TestSigner,
    ) -> Result<AccessGrant> {
        let signature = signer.sign_grant(&org(provider));
        self.engine
            .request_access(&caller(provider), user_id, &signature)
    }
}

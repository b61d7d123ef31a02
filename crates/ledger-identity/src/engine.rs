//! The identity engine: one entry point per operation.
//!
//! Every operation runs in its own ledger transaction. Reads and writes go
//! through that transaction only, and the engine holds no state between
//! calls besides the ledger handle and the configured verifier.

use std::sync::Arc;

use ledger_identity_core::{CallerIdentity, OrgId, ServiceProvider, User};
use ledger_identity_perms::{SignatureScheme, SignatureVerifier};
use ledger_identity_store::{Ledger, Transaction};

use crate::access::{AccessGrant, AccessGrantCoordinator};
use crate::authority::AuthorityStore;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::identity::IdentityRegistry;
use crate::provider::ServiceProviderRegistry;

/// Authority-gated identity issuance and signature-gated access grants over
/// a ledger.
pub struct IdentityEngine<L: Ledger> {
    /// The ledger backend.
    ledger: Arc<L>,
    /// Verifier for access-grant signatures.
    verifier: Box<dyn SignatureVerifier>,
    /// Configuration.
    config: EngineConfig,
}

impl<L: Ledger> IdentityEngine<L> {
    /// Create an engine using the verifier selected by `config`.
    pub fn new(ledger: L, config: EngineConfig) -> Self {
        Self::from_shared(Arc::new(ledger), config)
    }

    /// Create an engine over a ledger that is shared with other handles.
    pub fn from_shared(ledger: Arc<L>, config: EngineConfig) -> Self {
        let verifier = Box::new(config.verifier());
        Self {
            ledger,
            verifier,
            config,
        }
    }

    /// Create an engine with a custom verifier.
    pub fn with_verifier(ledger: L, verifier: impl SignatureVerifier + 'static) -> Self {
        let config = EngineConfig::with_scheme(verifier.scheme());
        Self {
            ledger: Arc::new(ledger),
            verifier: Box::new(verifier),
            config,
        }
    }

    /// Get the ledger reference.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Get a shared handle to the ledger.
    pub fn shared_ledger(&self) -> Arc<L> {
        Arc::clone(&self.ledger)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The active signature scheme.
    pub fn scheme(&self) -> SignatureScheme {
        self.verifier.scheme()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authority
    // ─────────────────────────────────────────────────────────────────────────

    /// Record the calling organization as the identity authority.
    pub fn initialize(&self, caller: &dyn CallerIdentity) -> Result<OrgId> {
        let org = caller.org_id()?;
        self.transact(|tx| AuthorityStore::initialize(tx, &org))?;
        Ok(org)
    }

    /// The organization id recorded by `initialize`.
    pub fn creator_identity(&self) -> Result<OrgId> {
        self.transact(AuthorityStore::get)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identities
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a new identity. Authority-only.
    pub fn issue_identity(
        &self,
        caller: &dyn CallerIdentity,
        user_id: &str,
        public_key: &str,
        metadata_hash: &str,
    ) -> Result<User> {
        let org = caller.org_id()?;
        self.transact(|tx| IdentityRegistry::issue(tx, &org, user_id, public_key, metadata_hash))
    }

    /// Read an identity.
    pub fn identity(&self, user_id: &str) -> Result<User> {
        self.transact(|tx| IdentityRegistry::get(tx, user_id))
    }

    /// Replace an identity's metadata hash. Authority-only.
    pub fn update_user_metadata_hash(
        &self,
        caller: &dyn CallerIdentity,
        user_id: &str,
        new_hash: &str,
    ) -> Result<User> {
        let org = caller.org_id()?;
        self.transact(|tx| IdentityRegistry::update_metadata_hash(tx, &org, user_id, new_hash))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Service Providers
    // ─────────────────────────────────────────────────────────────────────────

    /// Register or replace a service provider. Authority-only.
    pub fn add_service_provider(
        &self,
        caller: &dyn CallerIdentity,
        sp_id: &str,
        name: &str,
        public_key: &str,
    ) -> Result<ServiceProvider> {
        let org = caller.org_id()?;
        self.transact(|tx| ServiceProviderRegistry::register(tx, &org, sp_id, name, public_key))
    }

    /// Read a service provider.
    pub fn service_provider(&self, sp_id: &str) -> Result<ServiceProvider> {
        self.transact(|tx| ServiceProviderRegistry::get(tx, sp_id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access Grants
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant the calling organization access to an identity, gated on the
    /// user's signature over the grant message.
    pub fn request_access(
        &self,
        caller: &dyn CallerIdentity,
        user_id: &str,
        signature: &str,
    ) -> Result<AccessGrant> {
        let coordinator = AccessGrantCoordinator::new(self.verifier.as_ref());
        self.transact(|tx| coordinator.request_access(tx, caller, user_id, signature))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────────

    /// Run `op` in a fresh transaction and commit it if it succeeds.
    ///
    /// A failed operation's buffered writes are dropped without reaching
    /// the ledger.
    fn transact<T>(&self, op: impl FnOnce(&mut Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut tx = Transaction::new(self.ledger.as_ref());
        let value = op(&mut tx)?;
        tx.commit()?;
        Ok(value)
    }
}

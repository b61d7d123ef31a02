//! The service provider registry: `ServiceProvider` records under `sp_<spId>`.
//!
//! Registration is a blind overwrite. Providers are kept for discovery;
//! access grants never read them.

use ledger_identity_core::{LedgerKey, OrgId, ProviderId, ServiceProvider};
use ledger_identity_store::Transaction;
use tracing::{debug, info};

use crate::authority::AuthorityStore;
use crate::error::{IdentityError, Result};
use crate::identity::require_present;

pub struct ServiceProviderRegistry;

impl ServiceProviderRegistry {
    /// Register or replace a service provider. Authority-only.
    pub fn register(
        tx: &mut Transaction<'_>,
        caller: &OrgId,
        sp_id: &str,
        name: &str,
        public_key: &str,
    ) -> Result<ServiceProvider> {
        AuthorityStore::require(tx, caller)?;

        let sp_id = ProviderId::new(sp_id)?;
        require_present("public key", public_key)?;

        let provider = ServiceProvider::new(name, public_key);
        let key = LedgerKey::Provider(sp_id.clone()).to_key_string();
        tx.put_state(&key, provider.to_bytes()?);

        info!(provider = %sp_id, "service provider registered");
        Ok(provider)
    }

    /// Read a service provider. Public.
    pub fn get(tx: &mut Transaction<'_>, sp_id: &str) -> Result<ServiceProvider> {
        let sp_id = ProviderId::new(sp_id)?;
        debug!(provider = %sp_id, "service provider lookup");

        let key = LedgerKey::Provider(sp_id.clone()).to_key_string();
        let bytes = tx
            .get_state(&key)?
            .ok_or(IdentityError::ProviderNotFound(sp_id))?;
        ServiceProvider::from_bytes(&bytes).map_err(|e| IdentityError::corrupt(key, e))
    }
}

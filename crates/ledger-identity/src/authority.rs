//! The singleton bootstrapping authority.
//!
//! The authority id is written once, by `init`, from the initializer's
//! resolved organization. Every authority-gated operation re-reads it inside
//! its own transaction; nothing about the authority is cached between calls.

use ledger_identity_core::{OrgId, AUTHORITY_KEY};
use ledger_identity_store::Transaction;
use tracing::{info, warn};

use crate::error::{IdentityError, Result};

/// Reads, writes and checks the authority record.
pub struct AuthorityStore;

impl AuthorityStore {
    /// Record `caller` as the identity authority.
    ///
    /// Re-initializing overwrites the previous authority. The surrounding
    /// platform is expected to run initialization once per deployment.
    pub fn initialize(tx: &mut Transaction<'_>, caller: &OrgId) -> Result<()> {
        if let Some(previous) = tx.get_state(AUTHORITY_KEY)? {
            if previous.as_ref() != caller.as_bytes() {
                warn!(
                    previous = %String::from_utf8_lossy(&previous),
                    authority = %caller,
                    "replacing existing identity authority"
                );
            }
        }

        tx.put_state(AUTHORITY_KEY, caller.as_bytes().to_vec());
        info!(authority = %caller, "identity authority initialized");
        Ok(())
    }

    /// Load the authority id.
    pub fn get(tx: &mut Transaction<'_>) -> Result<OrgId> {
        Self::load(tx)?.ok_or(IdentityError::NotInitialized)
    }

    /// Fail with `Unauthorized` unless `caller` is the authority.
    ///
    /// Before initialization no caller is the authority.
    pub fn require(tx: &mut Transaction<'_>, caller: &OrgId) -> Result<()> {
        match Self::load(tx)? {
            Some(authority) if &authority == caller => Ok(()),
            Some(_) => {
                warn!(caller = %caller, "rejected call from non-authority organization");
                Err(IdentityError::Unauthorized {
                    caller: caller.clone(),
                })
            }
            None => {
                warn!(caller = %caller, "rejected authority-gated call before initialization");
                Err(IdentityError::Unauthorized {
                    caller: caller.clone(),
                })
            }
        }
    }

    fn load(tx: &mut Transaction<'_>) -> Result<Option<OrgId>> {
        match tx.get_state(AUTHORITY_KEY)? {
            Some(bytes) => OrgId::from_bytes(&bytes)
                .map(Some)
                .map_err(|e| IdentityError::corrupt(AUTHORITY_KEY, e)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_identity_store::MemoryLedger;

    fn org(id: &str) -> OrgId {
        OrgId::new(id).unwrap()
    }

    fn initialize(ledger: &MemoryLedger, authority: &str) {
        let mut tx = Transaction::new(ledger);
        AuthorityStore::initialize(&mut tx, &org(authority)).unwrap();
        tx.commit().unwrap();
    }

    #[test]
    fn test_get_before_init() {
        let ledger = MemoryLedger::new();
        let mut tx = Transaction::new(&ledger);
        assert!(matches!(
            AuthorityStore::get(&mut tx),
            Err(IdentityError::NotInitialized)
        ));
        assert!(matches!(
            AuthorityStore::require(&mut tx, &org("A")),
            Err(IdentityError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_require_matches_authority_only() {
        let ledger = MemoryLedger::new();
        initialize(&ledger, "A");

        let mut tx = Transaction::new(&ledger);
        assert_eq!(AuthorityStore::get(&mut tx).unwrap(), org("A"));
        assert!(AuthorityStore::require(&mut tx, &org("A")).is_ok());
        assert!(AuthorityStore::require(&mut tx, &org("a")).is_err());
        assert!(AuthorityStore::require(&mut tx, &org("AB")).is_err());
    }

    #[test]
    fn test_reinitialize_overwrites() {
        let ledger = MemoryLedger::new();
        initialize(&ledger, "A");
        initialize(&ledger, "B");

        let mut tx = Transaction::new(&ledger);
        assert_eq!(AuthorityStore::get(&mut tx).unwrap(), org("B"));
    }

    #[test]
    fn test_corrupt_authority_is_storage_error() {
        let ledger = MemoryLedger::new();
        let mut tx = Transaction::new(&ledger);
        tx.put_state(AUTHORITY_KEY, vec![0xff, 0xfe]);
        tx.commit().unwrap();

        let mut tx = Transaction::new(&ledger);
        assert!(matches!(
            AuthorityStore::require(&mut tx, &org("A")),
            Err(IdentityError::CorruptRecord { .. })
        ));
    }
}

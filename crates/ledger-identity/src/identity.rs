//! The identity registry: `User` records under `user_<userId>`.

use ledger_identity_core::{LedgerKey, OrgId, User, UserId};
use ledger_identity_store::Transaction;
use tracing::{debug, info};

use crate::authority::AuthorityStore;
use crate::error::{IdentityError, Result};

/// Issues, reads and updates identities.
pub struct IdentityRegistry;

impl IdentityRegistry {
    /// Issue a new identity with an empty permission set.
    ///
    /// Authority-only. Never overwrites: an existing record at the same
    /// user id fails with `AlreadyExists` and is left untouched.
    pub fn issue(
        tx: &mut Transaction<'_>,
        caller: &OrgId,
        user_id: &str,
        public_key: &str,
        metadata_hash: &str,
    ) -> Result<User> {
        AuthorityStore::require(tx, caller)?;

        let user_id = UserId::new(user_id)?;
        require_present("public key", public_key)?;
        require_present("metadata hash", metadata_hash)?;

        let key = LedgerKey::User(user_id.clone()).to_key_string();
        if tx.get_state(&key)?.is_some() {
            return Err(IdentityError::AlreadyExists(user_id));
        }

        let user = User::new(public_key, metadata_hash);
        tx.put_state(&key, user.to_bytes()?);

        info!(user = %user_id, "identity issued");
        Ok(user)
    }

    /// Read an identity. Public.
    pub fn get(tx: &mut Transaction<'_>, user_id: &str) -> Result<User> {
        let user_id = UserId::new(user_id)?;
        debug!(user = %user_id, "identity lookup");
        Self::load(tx, &user_id)
    }

    /// Replace an identity's metadata hash, leaving key and permissions alone.
    ///
    /// Authority-only.
    pub fn update_metadata_hash(
        tx: &mut Transaction<'_>,
        caller: &OrgId,
        user_id: &str,
        new_hash: &str,
    ) -> Result<User> {
        AuthorityStore::require(tx, caller)?;

        let user_id = UserId::new(user_id)?;
        require_present("metadata hash", new_hash)?;

        let mut user = Self::load(tx, &user_id)?;
        user.metadata_hash = new_hash.to_string();
        Self::store(tx, &user_id, &user)?;

        info!(user = %user_id, "identity metadata hash updated");
        Ok(user)
    }

    /// Load a user record, distinguishing absence from corruption.
    pub(crate) fn load(tx: &mut Transaction<'_>, user_id: &UserId) -> Result<User> {
        let key = LedgerKey::User(user_id.clone()).to_key_string();
        let bytes = tx
            .get_state(&key)?
            .ok_or_else(|| IdentityError::UserNotFound(user_id.clone()))?;
        User::from_bytes(&bytes).map_err(|e| IdentityError::corrupt(key, e))
    }

    /// Write back a full user record.
    pub(crate) fn store(tx: &mut Transaction<'_>, user_id: &UserId, user: &User) -> Result<()> {
        let key = LedgerKey::User(user_id.clone()).to_key_string();
        tx.put_state(&key, user.to_bytes()?);
        Ok(())
    }
}

/// Reject empty string arguments.
pub(crate) fn require_present(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(IdentityError::MalformedInput(format!("empty {}", field)));
    }
    Ok(())
}

//! Identifiers and the ledger key namespace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Ledger key holding the bootstrapping authority's organization id.
pub const AUTHORITY_KEY: &str = "identityAuthority";

const USER_PREFIX: &str = "user_";
const PROVIDER_PREFIX: &str = "sp_";

/// An organization identifier, as resolved from a caller's credential.
///
/// Organization ids are compared byte-for-byte; no case folding or
/// normalization is applied.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    /// Create an organization id, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::EmptyField("organization id"));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the id as raw bytes, the form the authority record is stored in.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Decode an organization id from raw ledger bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let id = std::str::from_utf8(bytes)
            .map_err(|e| CoreError::DecodingError(format!("organization id: {}", e)))?;
        Self::new(id)
    }
}

impl fmt::Debug for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrgId({})", self.0)
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OrgId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Service providers are keyed by the organization id they act as.
pub type ProviderId = OrgId;

/// An externally supplied user identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user id, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::EmptyField("user id"));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A namespaced ledger key.
///
/// Every record the engine touches lives under exactly one of these keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LedgerKey {
    /// The singleton authority record.
    Authority,
    /// A `User` record: `user_<userId>`.
    User(UserId),
    /// A `ServiceProvider` record: `sp_<orgId>`.
    Provider(ProviderId),
}

impl LedgerKey {
    /// Render the key as stored in the ledger.
    pub fn to_key_string(&self) -> String {
        match self {
            LedgerKey::Authority => AUTHORITY_KEY.to_string(),
            LedgerKey::User(id) => format!("{}{}", USER_PREFIX, id.as_str()),
            LedgerKey::Provider(id) => format!("{}{}", PROVIDER_PREFIX, id.as_str()),
        }
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_namespace() {
        let user = UserId::new("alice").unwrap();
        let org = OrgId::new("Org1MSP").unwrap();

        assert_eq!(LedgerKey::Authority.to_key_string(), "identityAuthority");
        assert_eq!(LedgerKey::User(user).to_key_string(), "user_alice");
        assert_eq!(LedgerKey::Provider(org).to_key_string(), "sp_Org1MSP");
    }

    #[test]
    fn test_empty_ids_rejected() {
        assert!(matches!(UserId::new(""), Err(CoreError::EmptyField(_))));
        assert!(matches!(OrgId::new(""), Err(CoreError::EmptyField(_))));
    }

    #[test]
    fn test_org_id_bytes() {
        let org = OrgId::from_bytes(b"AuthorityMSP").unwrap();
        assert_eq!(org.as_bytes(), b"AuthorityMSP");

        assert!(OrgId::from_bytes(&[0xff, 0xfe]).is_err());
        assert!(OrgId::from_bytes(b"").is_err());
    }

    proptest! {
        #[test]
        fn user_and_provider_keys_never_collide(a in ".{1,16}", b in ".{1,16}") {
            let user = LedgerKey::User(UserId::new(a).unwrap()).to_key_string();
            let provider = LedgerKey::Provider(OrgId::new(b).unwrap()).to_key_string();
            prop_assert_ne!(&user, &provider);
            prop_assert_ne!(user.as_str(), AUTHORITY_KEY);
        }
    }
}

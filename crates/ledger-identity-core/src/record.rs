//! Ledger records: issued identities and registered service providers.
//!
//! Records are owned by the ledger. The engine loads, modifies and stores
//! them within a single invocation and never keeps copies across calls.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::OrgId;

/// An issued identity.
///
/// Binds a user id (the ledger key, not stored in the record) to the user's
/// public key, an opaque metadata hash, and the set of organizations that
/// have been granted access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Scheme-dependent encoding of the user's public key.
    pub public_key: String,

    /// Opaque content hash supplied by the authority.
    #[serde(alias = "metaDataHash")]
    pub metadata_hash: String,

    /// Organizations granted access. Unique by construction.
    #[serde(default)]
    pub permissions: BTreeSet<OrgId>,
}

impl User {
    /// Create a freshly issued user with an empty permission set.
    pub fn new(public_key: impl Into<String>, metadata_hash: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            metadata_hash: metadata_hash.into(),
            permissions: BTreeSet::new(),
        }
    }

    /// Check whether an organization already holds a grant.
    pub fn has_permission(&self, org: &OrgId) -> bool {
        self.permissions.contains(org)
    }

    /// Add an organization to the permission set.
    ///
    /// Returns `false` if the organization was already present.
    pub fn grant(&mut self, org: OrgId) -> bool {
        self.permissions.insert(org)
    }

    /// Serialize to the stored JSON form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CoreError::EncodingError(e.to_string()))
    }

    /// Deserialize from the stored JSON form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}

/// A registered service provider.
///
/// Kept for discovery only: access grants never consult this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
    /// Human-readable provider name.
    pub name: String,

    /// The provider's public key, in whatever encoding it registered with.
    pub public_key: String,
}

impl ServiceProvider {
    /// Create a provider record.
    pub fn new(name: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public_key: public_key.into(),
        }
    }

    /// Serialize to the stored JSON form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CoreError::EncodingError(e.to_string()))
    }

    /// Deserialize from the stored JSON form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(id: &str) -> OrgId {
        OrgId::new(id).unwrap()
    }

    #[test]
    fn test_user_encoding_is_stable() {
        let mut user = User::new("04ab", "h1");
        user.grant(org("Org2MSP"));
        user.grant(org("Org1MSP"));

        let json = String::from_utf8(user.to_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"publicKey":"04ab","metadataHash":"h1","permissions":["Org1MSP","Org2MSP"]}"#
        );
    }

    #[test]
    fn test_grant_is_unique() {
        let mut user = User::new("pk", "h1");
        assert!(user.grant(org("B")));
        assert!(!user.grant(org("B")));
        assert_eq!(user.permissions.len(), 1);
        assert!(user.has_permission(&org("B")));
        assert!(!user.has_permission(&org("C")));
    }

    #[test]
    fn test_user_without_permissions_field() {
        // Records written before grants were persisted carry no permission list.
        let user = User::from_bytes(br#"{"publicKey":"pk","metadataHash":"h1"}"#).unwrap();
        assert!(user.permissions.is_empty());

        let legacy = User::from_bytes(br#"{"publicKey":"pk","metaDataHash":"h2"}"#).unwrap();
        assert_eq!(legacy.metadata_hash, "h2");
    }

    #[test]
    fn test_corrupt_record_rejected() {
        assert!(matches!(
            User::from_bytes(b"not json"),
            Err(CoreError::DecodingError(_))
        ));
        assert!(matches!(
            ServiceProvider::from_bytes(br#"{"name":1}"#),
            Err(CoreError::DecodingError(_))
        ));
    }

    #[test]
    fn test_provider_encoding() {
        let sp = ServiceProvider::new("Acme Health", "02ff");
        let json = String::from_utf8(sp.to_bytes().unwrap()).unwrap();
        assert_eq!(json, r#"{"name":"Acme Health","publicKey":"02ff"}"#);
        assert_eq!(ServiceProvider::from_bytes(json.as_bytes()).unwrap(), sp);
    }
}

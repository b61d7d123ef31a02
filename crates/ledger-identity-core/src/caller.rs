//! Caller identity resolution.
//!
//! Every invocation carries a credential from which the platform's
//! membership service derives an unforgeable organization id. Verifying the
//! credential is the platform's job; this module only defines the seam the
//! engine asks for the result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::OrgId;

/// Failure to resolve the invoking organization.
#[derive(Debug, Error)]
pub enum CallerError {
    /// The credential envelope could not be decoded.
    #[error("malformed creator envelope: {0}")]
    Malformed(String),

    /// The envelope decoded but names no organization.
    #[error("creator envelope carries no organization id")]
    MissingOrganization,

    /// The membership service refused to resolve the caller.
    #[error("caller identity unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the organization id of the party invoking an operation.
pub trait CallerIdentity {
    /// Resolve the invoking organization id.
    fn org_id(&self) -> Result<OrgId, CallerError>;
}

impl<T: CallerIdentity + ?Sized> CallerIdentity for &T {
    fn org_id(&self) -> Result<OrgId, CallerError> {
        (**self).org_id()
    }
}

/// A caller whose organization has already been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCaller(pub OrgId);

impl StaticCaller {
    /// Wrap an already resolved organization id.
    pub fn new(org: OrgId) -> Self {
        Self(org)
    }
}

impl CallerIdentity for StaticCaller {
    fn org_id(&self) -> Result<OrgId, CallerError> {
        Ok(self.0.clone())
    }
}

/// The creator envelope attached to an invocation.
///
/// `mspid` names the caller's organization; `id_bytes` carries the
/// certificate the membership service already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedIdentity {
    #[serde(default)]
    pub mspid: String,

    #[serde(default)]
    pub id_bytes: String,
}

impl SerializedIdentity {
    /// Decode an envelope from its JSON wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CallerError> {
        serde_json::from_slice(bytes).map_err(|e| CallerError::Malformed(e.to_string()))
    }
}

impl CallerIdentity for SerializedIdentity {
    fn org_id(&self) -> Result<OrgId, CallerError> {
        OrgId::new(self.mspid.clone()).map_err(|_| CallerError::MissingOrganization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_caller() {
        let org = OrgId::new("Org1MSP").unwrap();
        assert_eq!(StaticCaller::new(org.clone()).org_id().unwrap(), org);
    }

    #[test]
    fn test_serialized_identity() {
        let envelope =
            SerializedIdentity::from_bytes(br#"{"mspid":"Org2MSP","idBytes":"-----BEGIN"}"#)
                .unwrap();
        assert_eq!(envelope.org_id().unwrap().as_str(), "Org2MSP");
    }

    #[test]
    fn test_serialized_identity_without_org() {
        let envelope = SerializedIdentity::from_bytes(br#"{"idBytes":"cert"}"#).unwrap();
        assert!(matches!(
            envelope.org_id(),
            Err(CallerError::MissingOrganization)
        ));

        assert!(matches!(
            SerializedIdentity::from_bytes(b"\x0a\x07Org1MSP"),
            Err(CallerError::Malformed(_))
        ));
    }
}

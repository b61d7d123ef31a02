//! Events emitted alongside committed state changes.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::{OrgId, UserId};

/// Name of the event emitted when an access grant commits.
pub const GRANT_ACCESS_EVENT: &str = "grantAccess";

/// Payload of a `grantAccess` event: who granted access to whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantEvent {
    pub user_id: UserId,
    pub to: OrgId,
}

impl GrantEvent {
    pub fn new(user_id: UserId, to: OrgId) -> Self {
        Self { user_id, to }
    }

    /// Serialize to the event payload bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CoreError::EncodingError(e.to_string()))
    }

    /// Deserialize from event payload bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let event = GrantEvent::new(UserId::new("alice").unwrap(), OrgId::new("B").unwrap());
        let bytes = event.to_bytes().unwrap();
        assert_eq!(bytes, br#"{"userId":"alice","to":"B"}"#.to_vec());
        assert_eq!(GrantEvent::from_bytes(&bytes).unwrap(), event);
    }
}

//! The canonical access-grant message.
//!
//! A user authorizes a service provider by signing
//! `{"action":"grantAccess","to":"<orgId>"}`: compact JSON, `action` first,
//! no whitespace. Previously issued signatures depend on this exact byte
//! sequence, so the message is assembled by hand rather than through a
//! serializer whose key order or spacing could drift.

use ledger_identity_core::OrgId;

/// The `action` value of a grant message.
pub const GRANT_ACCESS_ACTION: &str = "grantAccess";

/// The message a user signs to grant an organization access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantAccessMessage<'a> {
    to: &'a OrgId,
}

impl<'a> GrantAccessMessage<'a> {
    /// Build the grant message for an organization.
    pub fn new(to: &'a OrgId) -> Self {
        Self { to }
    }

    /// The organization being granted access.
    pub fn to(&self) -> &OrgId {
        self.to
    }

    /// The exact bytes that are signed.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        // A JSON string literal: quoted, with `"`, `\` and control characters escaped.
        let to = serde_json::Value::from(self.to.as_str()).to_string();
        format!(r#"{{"action":"{}","to":{}}}"#, GRANT_ACCESS_ACTION, to).into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_canonical_message() {
        let org = OrgId::new("B").unwrap();
        let bytes = GrantAccessMessage::new(&org).canonical_bytes();
        assert_eq!(bytes, br#"{"action":"grantAccess","to":"B"}"#.to_vec());
    }

    #[test]
    fn test_canonical_message_is_valid_json() {
        let org = OrgId::new(r#"Org"1\MSP"#).unwrap();
        let bytes = GrantAccessMessage::new(&org).canonical_bytes();

        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed["action"], GRANT_ACCESS_ACTION);
        assert_eq!(parsed["to"], org.as_str());
    }

    const MESSAGE_PREFIX: &[u8] = br#"{"action":"grantAccess","to":""#;

    proptest! {
        #[test]
        fn canonical_message_parses_back(id in "\\PC{1,32}") {
            let org = OrgId::new(id).unwrap();
            let bytes = GrantAccessMessage::new(&org).canonical_bytes();

            let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            prop_assert_eq!(parsed["to"].as_str(), Some(org.as_str()));
            prop_assert!(bytes.starts_with(MESSAGE_PREFIX), "unexpected prefix for {:?}", org);
            prop_assert!(!bytes.contains(&b' ') || org.as_str().contains(' '));
        }
    }
}

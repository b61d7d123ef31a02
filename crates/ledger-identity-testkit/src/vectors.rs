//! Golden vectors for the canonical grant message.
//!
//! Signatures issued by earlier deployments cover these exact bytes. Any
//! change in key order, spacing or escaping breaks them.

use ledger_identity_core::OrgId;
use ledger_identity_perms::GrantAccessMessage;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GrantMessageVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Organization being granted access.
    pub to: &'static str,
    /// Expected message bytes.
    pub expected: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GrantMessageVector> {
    vec![
        GrantMessageVector {
            name: "single letter org",
            to: "B",
            expected: r#"{"action":"grantAccess","to":"B"}"#,
        },
        GrantMessageVector {
            name: "msp style org",
            to: "Org1MSP",
            expected: r#"{"action":"grantAccess","to":"Org1MSP"}"#,
        },
        GrantMessageVector {
            name: "org with spaces and punctuation",
            to: "Acme Corp. (EU)",
            expected: r#"{"action":"grantAccess","to":"Acme Corp. (EU)"}"#,
        },
        GrantMessageVector {
            name: "non-ascii org is not escaped",
            to: "Zürich Bank",
            expected: r#"{"action":"grantAccess","to":"Zürich Bank"}"#,
        },
        GrantMessageVector {
            name: "quote and backslash are escaped",
            to: r#"a"b\c"#,
            expected: r#"{"action":"grantAccess","to":"a\"b\\c"}"#,
        },
        GrantMessageVector {
            name: "control characters are escaped",
            to: "line\nbreak",
            expected: r#"{"action":"grantAccess","to":"line\nbreak"}"#,
        },
    ]
}

/// Build the message bytes for a vector.
pub fn message_for_vector(vector: &GrantMessageVector) -> Vec<u8> {
    let to = OrgId::new(vector.to).expect("vector org must not be empty");
    GrantAccessMessage::new(&to).canonical_bytes()
}

/// Check every vector, returning the names of those that do not match.
pub fn verify_all_vectors() -> Result<(), Vec<&'static str>> {
    let failed: Vec<_> = all_vectors()
        .into_iter()
        .filter(|v| message_for_vector(v) != v.expected.as_bytes())
        .map(|v| v.name)
        .collect();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(failed)
    }
}

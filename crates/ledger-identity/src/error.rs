//! Error types for the identity engine.

use std::fmt;

use ledger_identity_core::{CallerError, CoreError, OrgId, ProviderId, UserId};
use ledger_identity_perms::VerifyError;
use ledger_identity_store::StoreError;
use thiserror::Error;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Caller is not the identity authority.
    #[error("not authorized: {caller} is not the identity authority")]
    Unauthorized { caller: OrgId },

    /// The authority record has not been written yet.
    #[error("identity authority not yet stored")]
    NotInitialized,

    /// No identity is stored under this user id.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// No service provider is stored under this id.
    #[error("service provider not found: {0}")]
    ProviderNotFound(ProviderId),

    /// An identity is already stored under this user id.
    #[error("identity already exists: {0}")]
    AlreadyExists(UserId),

    /// The organization already holds a grant on this identity.
    #[error("{org} already has access to {user}")]
    AlreadyGranted { user: UserId, org: OrgId },

    /// Bad argument count or an unusable argument.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Signature or public key could not be decoded.
    #[error("malformed input: {0}")]
    MalformedSignature(#[from] VerifyError),

    /// Signature decoded but does not prove possession of the user's key.
    #[error("signature invalid")]
    InvalidSignature,

    /// Ledger I/O failure or commit conflict.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A stored record could not be decoded.
    #[error("corrupt record at {key}: {reason}")]
    CorruptRecord { key: String, reason: String },

    /// A record or event could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The invoking organization could not be resolved.
    #[error("upstream identity error: {0}")]
    UpstreamIdentity(#[from] CallerError),
}

impl From<CoreError> for IdentityError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::EmptyField(_) => IdentityError::MalformedInput(e.to_string()),
            CoreError::EncodingError(msg) | CoreError::DecodingError(msg) => {
                IdentityError::Encoding(msg)
            }
        }
    }
}

/// The failure categories callers can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    AlreadyExists,
    AlreadyGranted,
    MalformedInput,
    InvalidSignature,
    StorageError,
    UpstreamIdentityError,
}

impl ErrorKind {
    /// Stable name of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::AlreadyGranted => "AlreadyGranted",
            ErrorKind::MalformedInput => "MalformedInput",
            ErrorKind::InvalidSignature => "InvalidSignature",
            ErrorKind::StorageError => "StorageError",
            ErrorKind::UpstreamIdentityError => "UpstreamIdentityError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IdentityError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Unauthorized { .. } => ErrorKind::Unauthorized,
            IdentityError::NotInitialized
            | IdentityError::UserNotFound(_)
            | IdentityError::ProviderNotFound(_) => ErrorKind::NotFound,
            IdentityError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            IdentityError::AlreadyGranted { .. } => ErrorKind::AlreadyGranted,
            IdentityError::MalformedInput(_) | IdentityError::MalformedSignature(_) => {
                ErrorKind::MalformedInput
            }
            IdentityError::InvalidSignature => ErrorKind::InvalidSignature,
            IdentityError::Store(_)
            | IdentityError::CorruptRecord { .. }
            | IdentityError::Encoding(_) => ErrorKind::StorageError,
            IdentityError::UpstreamIdentity(_) => ErrorKind::UpstreamIdentityError,
        }
    }

    pub(crate) fn corrupt(key: impl Into<String>, reason: impl fmt::Display) -> Self {
        IdentityError::CorruptRecord {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let org = OrgId::new("C").unwrap();
        assert_eq!(
            IdentityError::Unauthorized { caller: org }.kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(IdentityError::NotInitialized.kind(), ErrorKind::NotFound);
        assert_eq!(
            IdentityError::from(StoreError::Conflict { key: "k".into() }).kind(),
            ErrorKind::StorageError
        );
        assert_eq!(
            IdentityError::corrupt("user_alice", "bad json").kind(),
            ErrorKind::StorageError
        );
        assert_eq!(
            IdentityError::from(VerifyError::InvalidRecoveryId(9)).kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(
            IdentityError::from(CallerError::MissingOrganization).kind(),
            ErrorKind::UpstreamIdentityError
        );
    }

    #[test]
    fn test_empty_field_is_malformed() {
        let err = IdentityError::from(CoreError::EmptyField("user id"));
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(err.to_string(), "malformed input: empty user id");
    }
}

//! String-level operation dispatch.
//!
//! The ledger platform invokes the engine with a function name and a list of
//! string arguments and expects a status-coded response back. Every failure
//! becomes an error response; nothing is swallowed.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use ledger_identity_core::CallerIdentity;
use ledger_identity_store::Ledger;
use tracing::debug;

use crate::engine::IdentityEngine;
use crate::error::{ErrorKind, IdentityError, Result};

/// Status of a successful response.
pub const STATUS_OK: u16 = 200;

/// Status of a failed response.
pub const STATUS_ERROR: u16 = 500;

/// The outcome of a dispatched call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    /// Human-readable failure message. Empty on success.
    pub message: String,
    /// Success payload. Empty for writes and on failure.
    pub payload: Bytes,
    /// Failure category. `None` on success.
    pub kind: Option<ErrorKind>,
}

impl Response {
    pub fn success(payload: impl Into<Bytes>) -> Self {
        Self {
            status: STATUS_OK,
            message: String::new(),
            payload: payload.into(),
            kind: None,
        }
    }

    pub fn error(err: &IdentityError) -> Self {
        Self {
            status: STATUS_ERROR,
            message: err.to_string(),
            payload: Bytes::new(),
            kind: Some(err.kind()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl From<Result<Vec<u8>>> for Response {
    fn from(result: Result<Vec<u8>>) -> Self {
        match result {
            Ok(payload) => Response::success(payload),
            Err(e) => Response::error(&e),
        }
    }
}

/// The invocable operations, excluding `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetCreatorIdentity,
    IssueIdentity,
    GetIdentity,
    UpdateUserMetadataHash,
    AddServiceProvider,
    GetServiceProvider,
    RequestAccess,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::GetCreatorIdentity,
        Operation::IssueIdentity,
        Operation::GetIdentity,
        Operation::UpdateUserMetadataHash,
        Operation::AddServiceProvider,
        Operation::GetServiceProvider,
        Operation::RequestAccess,
    ];

    /// The function name callers invoke the operation by.
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::GetCreatorIdentity => "getCreatorIdentity",
            Operation::IssueIdentity => "issueIdentity",
            Operation::GetIdentity => "getIdentity",
            Operation::UpdateUserMetadataHash => "updateUserMetadataHash",
            Operation::AddServiceProvider => "addServiceProvider",
            Operation::GetServiceProvider => "getServiceProvider",
            Operation::RequestAccess => "requestAccess",
        }
    }

    /// Exact number of arguments the operation takes.
    pub const fn arity(&self) -> usize {
        match self {
            Operation::GetCreatorIdentity => 0,
            Operation::GetIdentity | Operation::GetServiceProvider => 1,
            Operation::UpdateUserMetadataHash | Operation::RequestAccess => 2,
            Operation::IssueIdentity | Operation::AddServiceProvider => 3,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| IdentityError::MalformedInput(format!("invalid function name: {}", s)))
    }
}

impl<L: Ledger> IdentityEngine<L> {
    /// Handle the platform's initialization call.
    pub fn init(&self, caller: &dyn CallerIdentity) -> Response {
        self.initialize(caller).map(|_| Vec::<u8>::new()).into()
    }

    /// Dispatch a named operation with string arguments.
    pub fn invoke<S: AsRef<str>>(
        &self,
        caller: &dyn CallerIdentity,
        function: &str,
        args: &[S],
    ) -> Response {
        debug!(function, args = args.len(), "invoke");
        self.dispatch(caller, function, args).into()
    }

    fn dispatch<S: AsRef<str>>(
        &self,
        caller: &dyn CallerIdentity,
        function: &str,
        args: &[S],
    ) -> Result<Vec<u8>> {
        let op: Operation = function.parse()?;
        if args.len() != op.arity() {
            return Err(IdentityError::MalformedInput(format!(
                "incorrect number of arguments for {}: expected {}, got {}",
                op,
                op.arity(),
                args.len()
            )));
        }
        let arg = |i: usize| args[i].as_ref();

        match op {
            Operation::GetCreatorIdentity => {
                Ok(self.creator_identity()?.as_bytes().to_vec())
            }
            Operation::IssueIdentity => {
                self.issue_identity(caller, arg(0), arg(1), arg(2))?;
                Ok(Vec::new())
            }
            Operation::GetIdentity => Ok(self.identity(arg(0))?.to_bytes()?),
            Operation::UpdateUserMetadataHash => {
                self.update_user_metadata_hash(caller, arg(0), arg(1))?;
                Ok(Vec::new())
            }
            Operation::AddServiceProvider => {
                self.add_service_provider(caller, arg(0), arg(1), arg(2))?;
                Ok(Vec::new())
            }
            Operation::GetServiceProvider => Ok(self.service_provider(arg(0))?.to_bytes()?),
            Operation::RequestAccess => {
                self.request_access(caller, arg(0), arg(1))?;
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use ledger_identity_core::{OrgId, StaticCaller, User};
    use ledger_identity_store::MemoryLedger;

    fn caller(id: &str) -> StaticCaller {
        StaticCaller::new(OrgId::new(id).unwrap())
    }

    fn engine() -> IdentityEngine<MemoryLedger> {
        let engine = IdentityEngine::new(MemoryLedger::new(), EngineConfig::default());
        assert!(engine.init(&caller("A")).is_ok());
        engine
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_function() {
        let response = engine().invoke(&caller("A"), "deleteIdentity", &["alice"]);
        assert_eq!(response.status, STATUS_ERROR);
        assert_eq!(response.kind, Some(ErrorKind::MalformedInput));
        assert!(response.message.contains("invalid function name: deleteIdentity"));

        // `init` is only reachable through its own entry point
        let response = engine().invoke::<&str>(&caller("A"), "init", &[]);
        assert_eq!(response.kind, Some(ErrorKind::MalformedInput));
    }

    #[test]
    fn test_arity_checked_before_authorization() {
        let engine = engine();
        let response = engine.invoke(&caller("C"), "issueIdentity", &["alice", "pk"]);
        assert_eq!(response.kind, Some(ErrorKind::MalformedInput));
        assert!(response.message.contains("incorrect number of arguments"));

        let response = engine.invoke(&caller("A"), "getIdentity", &["alice", "extra"]);
        assert_eq!(response.kind, Some(ErrorKind::MalformedInput));
    }

    #[test]
    fn test_payloads() {
        let engine = engine();
        let a = caller("A");

        let response = engine.invoke::<&str>(&a, "getCreatorIdentity", &[]);
        assert!(response.is_ok());
        assert_eq!(response.payload.as_ref(), b"A");

        let response = engine.invoke(&a, "issueIdentity", &["alice", "pk", "h1"]);
        assert!(response.is_ok());
        assert!(response.payload.is_empty());

        let response = engine.invoke(&a, "getIdentity", &["alice"]);
        assert!(response.is_ok());
        assert_eq!(
            User::from_bytes(&response.payload).unwrap(),
            User::new("pk", "h1")
        );

        let args = vec!["B".to_string(), "Bank".to_string(), "pkB".to_string()];
        assert!(engine.invoke(&a, "addServiceProvider", &args[..]).is_ok());
        let response = engine.invoke(&a, "getServiceProvider", &["B"]);
        assert_eq!(
            response.payload.as_ref(),
            br#"{"name":"Bank","publicKey":"pkB"}"#
        );
    }

    #[test]
    fn test_error_response_shape() {
        let response = engine().invoke(&caller("C"), "issueIdentity", &["alice", "pk", "h1"]);
        assert_eq!(response.status, STATUS_ERROR);
        assert_eq!(response.kind, Some(ErrorKind::Unauthorized));
        assert!(response.payload.is_empty());
        assert!(!response.message.is_empty());
    }

    #[test]
    fn test_every_operation_rejects_extra_argument() {
        let engine = engine();
        for op in Operation::ALL {
            let args = vec!["x"; op.arity() + 1];
            let response = engine.invoke(&caller("A"), op.name(), &args[..]);
            assert_eq!(response.kind, Some(ErrorKind::MalformedInput), "{}", op);
        }
    }
}

//! # Ledger Identity
//!
//! Authority-gated identity issuance and signature-gated access grants over
//! a replicated key-value ledger.
//!
//! ## Overview
//!
//! - **Authority**: one organization, recorded at `init`, may issue
//!   identities, update their metadata and register service providers
//! - **Identities**: a user id bound to a public key, a metadata hash and the
//!   set of organizations granted access
//! - **Access grants**: any organization may add itself to a user's
//!   permission set by presenting the user's signature over
//!   `{"action":"grantAccess","to":"<orgId>"}`
//!
//! Each call runs as one ledger transaction. Concurrent writers to the same
//! key are detected at commit and rejected; the engine never retries.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledger_identity::{EngineConfig, IdentityEngine};
//! use ledger_identity::core::{OrgId, StaticCaller};
//! use ledger_identity::store::SqliteLedger;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = SqliteLedger::open("identity.db")?;
//!     let engine = IdentityEngine::new(ledger, EngineConfig::default());
//!
//!     let authority = StaticCaller::new(OrgId::new("AuthorityMSP")?);
//!     engine.initialize(&authority)?;
//!     engine.issue_identity(&authority, "alice", "04ab...", "h1")?;
//!
//!     // Or through string dispatch, as the ledger platform calls it
//!     let response = engine.invoke(&authority, "getIdentity", &["alice"]);
//!     assert!(response.is_ok());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `ledger_identity::core` - Identifiers, records and the caller seam
//! - `ledger_identity::store` - Ledger backends and transactions
//! - `ledger_identity::perms` - Signature schemes and the grant message

pub mod access;
pub mod authority;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod identity;
pub mod provider;

// Re-export component crates
pub use ledger_identity_core as core;
pub use ledger_identity_perms as perms;
pub use ledger_identity_store as store;

// Re-export main types for convenience
pub use access::{AccessGrant, AccessGrantCoordinator};
pub use authority::AuthorityStore;
pub use config::{ConfigError, EngineConfig};
pub use dispatch::{Operation, Response, STATUS_ERROR, STATUS_OK};
pub use engine::IdentityEngine;
pub use error::{ErrorKind, IdentityError, Result};
pub use identity::IdentityRegistry;
pub use provider::ServiceProviderRegistry;

// Re-export commonly used types
pub use ledger_identity_core::{
    CallerIdentity, GrantEvent, OrgId, ServiceProvider, StaticCaller, User, UserId,
};
pub use ledger_identity_perms::{EcdsaCurve, SchemeVerifier, SignatureScheme, SignatureVerifier};
pub use ledger_identity_store::{Ledger, MemoryLedger, SqliteLedger};

//! # Ledger Identity Core
//!
//! Pure data for the Ledger Identity engine: identifiers, the ledger key
//! namespace, and the `User` / `ServiceProvider` records.
//!
//! This crate contains no I/O and no cryptography. It only defines what is
//! stored and how it is encoded.
//!
//! ## Key Types
//!
//! - [`OrgId`] - An organization identifier resolved from a caller credential
//! - [`UserId`] / [`ProviderId`] - Externally supplied record identifiers
//! - [`LedgerKey`] - The namespaced key a record lives under
//! - [`User`] - An issued identity with its permission set
//! - [`ServiceProvider`] - A registered provider, kept for discovery
//! - [`CallerIdentity`] - The seam that yields the invoking organization
//! - [`GrantEvent`] - The payload emitted when an access grant commits
//!
//! ## Encoding
//!
//! Records are stored as compact JSON with the field names `publicKey`,
//! `metadataHash`, `permissions` and `name`. The encoding is stable: the
//! permission set is serialized in sorted order.

pub mod caller;
pub mod error;
pub mod event;
pub mod record;
pub mod types;

pub use caller::{CallerError, CallerIdentity, SerializedIdentity, StaticCaller};
pub use error::{CoreError, Result};
pub use event::{GrantEvent, GRANT_ACCESS_EVENT};
pub use record::{ServiceProvider, User};
pub use types::{LedgerKey, OrgId, ProviderId, UserId, AUTHORITY_KEY};

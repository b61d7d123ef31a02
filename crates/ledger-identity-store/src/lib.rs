//! # Ledger Identity Store
//!
//! The ledger accessor for Ledger Identity. Provides a trait-based,
//! versioned key-value interface with SQLite and in-memory backends.
//!
//! ## Overview
//!
//! The engine never talks to a backend directly. Each invocation opens a
//! [`Transaction`], which reads committed state, buffers writes, and submits
//! them as a single [`ChangeSet`]. The backend validates the read set before
//! applying anything, so two invocations racing on the same key cannot both
//! commit: the later one fails with [`StoreError::Conflict`] and the caller
//! decides whether to resubmit.
//!
//! ## Key Types
//!
//! - [`Ledger`] - The trait every backend implements
//! - [`Transaction`] - A per-invocation read set, write set and event
//! - [`MemoryLedger`] - In-memory backend for tests
//! - [`SqliteLedger`] - SQLite-based persistent backend
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledger_identity_store::{Ledger, SqliteLedger, Transaction};
//!
//! fn example() -> ledger_identity_store::Result<()> {
//!     let ledger = SqliteLedger::open("ledger.db")?;
//!
//!     let mut tx = Transaction::new(&ledger);
//!     if tx.get_state("user_alice")?.is_none() {
//!         tx.put_state("user_alice", b"{}".to_vec());
//!     }
//!     tx.commit()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Explicit absence**: `Ok(None)` is the only not-found signal; read
//!   failures are always errors
//! - **Read-set validation**: a commit fails if any key it read has moved
//! - **No retries**: conflicts are reported, never retried, at this layer

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;
pub mod transaction;

pub use error::{Result, StoreError};
pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;
pub use traits::{ChangeSet, CommittedEvent, Ledger, LedgerEvent, VersionedValue};
pub use transaction::Transaction;

//! Ledger trait: the abstract interface for versioned key-value state.
//!
//! This trait allows the engine to be storage-agnostic. Implementations
//! include SQLite (persistent) and in-memory (for tests).

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::Result;

/// A committed value together with the commit height that wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    /// The raw stored bytes.
    pub value: Bytes,
    /// Height of the commit that last wrote this key.
    pub version: u64,
}

/// A named event emitted alongside a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEvent {
    /// Event name, e.g. `grantAccess`.
    pub name: String,
    /// Opaque event payload.
    pub payload: Bytes,
}

/// An event as recorded by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedEvent {
    /// Height of the commit that emitted the event.
    pub height: u64,
    /// The event itself.
    pub event: LedgerEvent,
}

/// Everything one invocation wants to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Keys read, with the version observed (`None` = observed absent).
    pub reads: BTreeMap<String, Option<u64>>,
    /// Buffered writes, keyed by ledger key.
    pub writes: BTreeMap<String, Bytes>,
    /// At most one event per invocation.
    pub event: Option<LedgerEvent>,
}

impl ChangeSet {
    /// True if applying this change set would not alter the ledger.
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty() && self.event.is_none()
    }
}

/// The Ledger trait: interface for versioned key-value persistence.
///
/// # Design Notes
///
/// - **Explicit absence**: `read` returns `Ok(None)` only when the key has
///   never been written. I/O failures are `Err`.
/// - **Atomic commit**: `commit` validates every entry of the read set against
///   current versions and then applies all writes and the event together, or
///   nothing at all.
pub trait Ledger: Send + Sync {
    /// Read the committed value of a key.
    fn read(&self, key: &str) -> Result<Option<VersionedValue>>;

    /// Validate and apply a change set.
    ///
    /// Returns the new commit height. Fails with `Conflict` if any key in
    /// the read set has been written since it was observed.
    fn commit(&self, changes: &ChangeSet) -> Result<u64>;

    /// Current commit height (0 for an empty ledger).
    fn height(&self) -> Result<u64>;

    /// Events committed at a height strictly greater than `after`.
    fn events_since(&self, after: u64) -> Result<Vec<CommittedEvent>>;
}

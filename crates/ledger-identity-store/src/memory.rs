//! In-memory implementation of the Ledger trait.
//!
//! This is primarily for testing. It has the same commit semantics as
//! SQLite but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, StoreError};
use crate::traits::{ChangeSet, CommittedEvent, Ledger, VersionedValue};

/// In-memory ledger implementation.
///
/// All data is lost when the ledger is dropped. Thread-safe via RwLock.
pub struct MemoryLedger {
    inner: RwLock<MemoryLedgerInner>,
}

#[derive(Default)]
struct MemoryLedgerInner {
    /// Committed state by key.
    state: HashMap<String, VersionedValue>,

    /// Emitted events, in commit order.
    events: Vec<CommittedEvent>,

    /// Height of the last commit.
    height: u64,
}

impl MemoryLedger {
    /// Create a new empty in-memory ledger.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryLedgerInner::default()),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read_inner()?.state.len())
    }

    /// True if nothing has been committed.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_inner()?.state.is_empty())
    }

    fn read_inner(&self) -> Result<RwLockReadGuard<'_, MemoryLedgerInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write_inner(&self) -> Result<RwLockWriteGuard<'_, MemoryLedgerInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for MemoryLedger {
    fn read(&self, key: &str) -> Result<Option<VersionedValue>> {
        Ok(self.read_inner()?.state.get(key).cloned())
    }

    fn commit(&self, changes: &ChangeSet) -> Result<u64> {
        let mut inner = self.write_inner()?;

        // Validate the read set before touching anything
        for (key, observed) in &changes.reads {
            let current = inner.state.get(key).map(|v| v.version);
            if current != *observed {
                return Err(StoreError::Conflict { key: key.clone() });
            }
        }

        let height = inner.height + 1;
        for (key, value) in &changes.writes {
            inner.state.insert(
                key.clone(),
                VersionedValue {
                    value: value.clone(),
                    version: height,
                },
            );
        }
        if let Some(event) = &changes.event {
            inner.events.push(CommittedEvent {
                height,
                event: event.clone(),
            });
        }
        inner.height = height;

        Ok(height)
    }

    fn height(&self) -> Result<u64> {
        Ok(self.read_inner()?.height)
    }

    fn events_since(&self, after: u64) -> Result<Vec<CommittedEvent>> {
        Ok(self
            .read_inner()?
            .events
            .iter()
            .filter(|e| e.height > after)
            .cloned()
            .collect())
    }
}

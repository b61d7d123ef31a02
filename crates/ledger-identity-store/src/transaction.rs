//! Per-invocation transactions.
//!
//! A transaction reads committed state only: a `put_state` is not visible to a
//! later `get_state` in the same transaction. Every key read is recorded with
//! the version observed so the ledger can reject the commit if another writer
//! got there first.

use bytes::Bytes;

use crate::error::Result;
use crate::traits::{ChangeSet, Ledger, LedgerEvent};

/// A single invocation's view of the ledger.
pub struct Transaction<'a> {
    ledger: &'a dyn Ledger,
    changes: ChangeSet,
}

impl<'a> Transaction<'a> {
    /// Open a transaction over a ledger.
    pub fn new(ledger: &'a dyn Ledger) -> Self {
        Self {
            ledger,
            changes: ChangeSet::default(),
        }
    }

    /// Read the committed value of a key, recording it in the read set.
    pub fn get_state(&mut self, key: &str) -> Result<Option<Bytes>> {
        let current = self.ledger.read(key)?;

        // Keep the first observation: a later re-read must not mask a change.
        self.changes
            .reads
            .entry(key.to_string())
            .or_insert_with(|| current.as_ref().map(|v| v.version));

        Ok(current.map(|v| v.value))
    }

    /// Buffer a write.
    pub fn put_state(&mut self, key: &str, value: impl Into<Bytes>) {
        self.changes.writes.insert(key.to_string(), value.into());
    }

    /// Set the event emitted with this transaction, replacing any earlier one.
    pub fn set_event(&mut self, name: impl Into<String>, payload: impl Into<Bytes>) {
        self.changes.event = Some(LedgerEvent {
            name: name.into(),
            payload: payload.into(),
        });
    }

    /// Inspect the pending change set.
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Submit the change set.
    ///
    /// Returns the commit height, or `None` for a read-only transaction,
    /// which is never sent to the ledger.
    pub fn commit(self) -> Result<Option<u64>> {
        if self.changes.is_read_only() {
            return Ok(None);
        }

        let height = self.ledger.commit(&self.changes)?;
        tracing::debug!(
            height,
            writes = self.changes.writes.len(),
            "transaction committed"
        );
        Ok(Some(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryLedger;

    #[test]
    fn test_read_only_skips_commit() {
        let ledger = MemoryLedger::new();
        let mut tx = Transaction::new(&ledger);
        assert!(tx.get_state("user_alice").unwrap().is_none());
        assert_eq!(tx.commit().unwrap(), None);
        assert_eq!(ledger.height().unwrap(), 0);
    }

    #[test]
    fn test_writes_not_visible_before_commit() {
        let ledger = MemoryLedger::new();
        let mut tx = Transaction::new(&ledger);
        tx.put_state("k", b"v".to_vec());
        assert!(tx.get_state("k").unwrap().is_none());
        assert_eq!(tx.commit().unwrap(), Some(1));

        let mut tx = Transaction::new(&ledger);
        assert_eq!(tx.get_state("k").unwrap().unwrap(), Bytes::from_static(b"v"));
    }

    #[test]
    fn test_concurrent_writers_conflict() {
        let ledger = MemoryLedger::new();

        let mut first = Transaction::new(&ledger);
        let mut second = Transaction::new(&ledger);

        assert!(first.get_state("user_alice").unwrap().is_none());
        assert!(second.get_state("user_alice").unwrap().is_none());

        first.put_state("user_alice", b"one".to_vec());
        second.put_state("user_alice", b"two".to_vec());

        first.commit().unwrap();
        match second.commit() {
            Err(StoreError::Conflict { key }) => assert_eq!(key, "user_alice"),
            other => panic!("expected conflict, got {:?}", other),
        }

        let mut tx = Transaction::new(&ledger);
        assert_eq!(
            tx.get_state("user_alice").unwrap().unwrap(),
            Bytes::from_static(b"one")
        );
    }

    #[test]
    fn test_event_committed_with_writes() {
        let ledger = MemoryLedger::new();
        let mut tx = Transaction::new(&ledger);
        tx.put_state("k", b"v".to_vec());
        tx.set_event("first", b"1".to_vec());
        tx.set_event("grantAccess", b"{}".to_vec());
        let height = tx.commit().unwrap().unwrap();

        let events = ledger.events_since(0).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].height, height);
        assert_eq!(events[0].event.name, "grantAccess");
    }
}

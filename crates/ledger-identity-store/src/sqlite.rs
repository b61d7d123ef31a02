//! SQLite implementation of the Ledger trait.
//!
//! This is the persistent backend. It uses rusqlite with bundled SQLite.
//! Each commit runs inside one SQLite transaction, so read-set validation
//! and the writes it guards land together or not at all.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::{ChangeSet, CommittedEvent, Ledger, LedgerEvent, VersionedValue};

/// SQLite-based ledger implementation.
///
/// Thread-safe via internal Mutex.
pub struct SqliteLedger {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLedger {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Poisoned(format!("mutex poisoned: {}", e)))
    }
}

fn to_version(raw: i64, key: &str) -> Result<u64> {
    u64::try_from(raw)
        .map_err(|_| StoreError::InvalidData(format!("negative version {} for key {}", raw, key)))
}

fn to_sql_height(height: u64) -> Result<i64> {
    i64::try_from(height)
        .map_err(|_| StoreError::InvalidData(format!("height {} out of range", height)))
}

fn current_height(conn: &Connection) -> Result<u64> {
    let raw: i64 = conn.query_row("SELECT COALESCE(MAX(height), 0) FROM commits", [], |row| {
        row.get(0)
    })?;
    to_version(raw, "<height>")
}

impl Ledger for SqliteLedger {
    fn read(&self, key: &str) -> Result<Option<VersionedValue>> {
        let conn = self.lock()?;

        let row: Option<(Vec<u8>, i64)> = conn
            .query_row(
                "SELECT value, version FROM state WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((value, version)) => Ok(Some(VersionedValue {
                value: Bytes::from(value),
                version: to_version(version, key)?,
            })),
            None => Ok(None),
        }
    }

    fn commit(&self, changes: &ChangeSet) -> Result<u64> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        // Validate the read set. Returning early drops `tx`, which rolls back.
        for (key, observed) in &changes.reads {
            let current: Option<i64> = tx
                .query_row(
                    "SELECT version FROM state WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            let current = current.map(|v| to_version(v, key)).transpose()?;
            if current != *observed {
                return Err(StoreError::Conflict { key: key.clone() });
            }
        }

        let height = current_height(&tx)? + 1;
        let sql_height = to_sql_height(height)?;
        tx.execute(
            "INSERT INTO commits (height, committed_at) VALUES (?1, ?2)",
            params![sql_height, now_millis()],
        )?;

        for (key, value) in &changes.writes {
            tx.execute(
                "INSERT INTO state (key, value, version) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, version = excluded.version",
                params![key, value.as_ref(), sql_height],
            )?;
        }

        if let Some(event) = &changes.event {
            tx.execute(
                "INSERT INTO events (height, name, payload) VALUES (?1, ?2, ?3)",
                params![sql_height, event.name, event.payload.as_ref()],
            )?;
        }

        tx.commit()?;
        Ok(height)
    }

    fn height(&self) -> Result<u64> {
        let conn = self.lock()?;
        current_height(&conn)
    }

    fn events_since(&self, after: u64) -> Result<Vec<CommittedEvent>> {
        // No stored height exceeds i64::MAX.
        let Ok(after) = i64::try_from(after) else {
            return Ok(Vec::new());
        };

        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT height, name, payload FROM events WHERE height > ?1 ORDER BY height",
        )?;

        let rows = stmt
            .query_map(params![after], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Vec<u8>>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(height, name, payload)| {
                Ok(CommittedEvent {
                    height: to_version(height, "<event>")?,
                    event: LedgerEvent {
                        name,
                        payload: Bytes::from(payload),
                    },
                })
            })
            .collect()
    }
}

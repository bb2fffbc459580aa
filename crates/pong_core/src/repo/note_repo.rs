//! Note store contract and SQLite implementation.
//!
//! # Responsibility
//! - Own all note persistence: single-slot upsert, atomic inbox drain,
//!   age-based purge.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - At most one row exists per (sender, recipient) pair.
//! - `upsert_note` replaces the pair's row inside one immediate
//!   transaction; a concurrent reader never observes both old and new.
//! - A row returned by `drain_for_recipient` is deleted in the same
//!   transaction and can never be returned to a second caller.
//! - `purge_expired` deleting an already-drained row is a no-op.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer error for note persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite or bootstrap failure.
    Db(DbError),
    /// Connection lock was poisoned by a panicked holder.
    LockPoisoned,
    /// Persisted state violates the note contract.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::LockPoisoned => write!(f, "note store connection lock poisoned"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::LockPoisoned => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the single-slot note store.
pub trait NoteRepository: Send + Sync {
    /// Replaces the pair's pending note and returns the new note's id.
    fn upsert_note(&self, sender: &str, recipient: &str, body: &str) -> RepoResult<NoteId>;
    /// Returns and deletes every pending note for the recipient,
    /// newest first. An empty inbox yields an empty list.
    fn drain_for_recipient(&self, recipient: &str) -> RepoResult<Vec<Note>>;
    /// Deletes notes created strictly before `cutoff_ms`, returning the
    /// number of rows removed.
    fn purge_expired(&self, cutoff_ms: i64) -> RepoResult<u64>;
    /// Returns the total number of pending notes across all recipients.
    fn pending_count(&self) -> RepoResult<u64>;
}

/// SQLite-backed note store.
///
/// Owns its connection behind a `Mutex` so one handle can serve
/// concurrent callers. The delivery invariants rest on the SQL
/// transactions, not on the lock.
pub struct SqliteNoteRepository {
    conn: Mutex<Connection>,
}

impl SqliteNoteRepository {
    /// Wraps a migrated, ready connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock_conn(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::LockPoisoned)
    }
}

impl NoteRepository for SqliteNoteRepository {
    fn upsert_note(&self, sender: &str, recipient: &str, body: &str) -> RepoResult<NoteId> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "DELETE FROM notes WHERE sender = ?1 AND recipient = ?2;",
            params![sender, recipient],
        )?;
        tx.execute(
            "INSERT INTO notes (sender, recipient, body) VALUES (?1, ?2, ?3);",
            params![sender, recipient, body],
        )?;
        let note_id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(note_id)
    }

    fn drain_for_recipient(&self, recipient: &str) -> RepoResult<Vec<Note>> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let notes = {
            let mut stmt = tx.prepare(
                "SELECT id, sender, recipient, body, created_at
                 FROM notes
                 WHERE recipient = ?1
                 ORDER BY created_at DESC, id DESC;",
            )?;
            let mut rows = stmt.query([recipient])?;
            let mut notes = Vec::new();
            while let Some(row) = rows.next()? {
                notes.push(Note {
                    id: row.get("id")?,
                    sender: row.get("sender")?,
                    recipient: row.get("recipient")?,
                    body: row.get("body")?,
                    created_at: row.get("created_at")?,
                });
            }
            notes
        };

        if !notes.is_empty() {
            // The immediate lock held since BEGIN makes this delete cover
            // exactly the rows selected above.
            tx.execute("DELETE FROM notes WHERE recipient = ?1;", [recipient])?;
        }

        tx.commit()?;
        Ok(notes)
    }

    fn purge_expired(&self, cutoff_ms: i64) -> RepoResult<u64> {
        let conn = self.lock_conn()?;
        let removed = conn.execute("DELETE FROM notes WHERE created_at < ?1;", [cutoff_ms])?;
        Ok(removed as u64)
    }

    fn pending_count(&self) -> RepoResult<u64> {
        let conn = self.lock_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

//! SQLite storage backend implementing the SlotStorage trait

use std::path::Path;

use folio_core::{SlotStorage, StoreError};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};

type StoreResult<T> = Result<T, StoreError>;

/// SQLite-backed slot storage.
///
/// Each slot is one row; a write is a single UPSERT, so a failed write
/// leaves the previous value intact.
pub struct SqliteSlots {
    conn: Mutex<Connection>,
}

impl SqliteSlots {
    /// Create a slot storage from a connection
    ///
    /// The connection should already have migrations applied.
    /// Use [`crate::migrate::migrate`] to initialize a fresh database.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Create a new in-memory slot storage (for testing)
    pub fn in_memory() -> crate::error::Result<Self> {
        let conn = Connection::open_in_memory()?;
        crate::migrate::migrate(&conn)?;
        Ok(Self::new(conn))
    }

    /// Open (or create) a file-backed slot storage
    pub fn open(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        crate::migrate::migrate(&conn)?;
        Ok(Self::new(conn))
    }
}

impl std::fmt::Debug for SqliteSlots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSlots").finish_non_exhaustive()
    }
}

impl SlotStorage for SqliteSlots {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        self.conn
            .lock()
            .query_row("SELECT value FROM slots WHERE key = ?", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn
            .lock()
            .execute(
                "INSERT INTO slots (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![key, value],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .lock()
            .execute("DELETE FROM slots WHERE key = ?", [key])
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows_affected > 0)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT key FROM slots ORDER BY key")
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(keys)
    }
}

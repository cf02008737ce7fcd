//! SQLite implementation of the LedgerStore trait.
//!
//! This is the persistent backend. It uses rusqlite with bundled SQLite.
//! Ledger operations are synchronous, so calls run directly on the caller's
//! thread under a connection mutex.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use genevault_core::{DataReference, PermissionKey, Principal};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{InitResult, LedgerStore};

const ADMIN_KEY: &str = "admin";

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

// Helper to convert a BLOB column back into a principal
fn blob_to_principal(bytes: Vec<u8>, column: &str) -> Result<Principal> {
    Principal::try_from(bytes.as_slice()).map_err(|_| {
        StoreError::InvalidData(format!(
            "{} column holds {} bytes, expected 32",
            column,
            bytes.len()
        ))
    })
}

impl LedgerStore for SqliteStore {
    fn admin(&self) -> Result<Option<Principal>> {
        let conn = self.lock()?;

        let bytes: Option<Vec<u8>> = conn
            .query_row(
                "SELECT value FROM ledger_meta WHERE key = ?1",
                params![ADMIN_KEY],
                |row| row.get(0),
            )
            .optional()?;

        bytes.map(|b| blob_to_principal(b, "admin")).transpose()
    }

    fn init_admin(&self, admin: &Principal) -> Result<InitResult> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let existing: Option<Vec<u8>> = tx
            .query_row(
                "SELECT value FROM ledger_meta WHERE key = ?1",
                params![ADMIN_KEY],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(bytes) = existing {
            let existing = blob_to_principal(bytes, "admin")?;
            return Ok(InitResult::AlreadyInitialized { existing });
        }

        tx.execute(
            "INSERT INTO ledger_meta (key, value) VALUES (?1, ?2)",
            params![ADMIN_KEY, admin.as_bytes().as_slice()],
        )?;
        tx.commit()?;

        Ok(InitResult::Initialized)
    }

    fn get_reference(&self, owner: &Principal) -> Result<Option<DataReference>> {
        let conn = self.lock()?;

        let reference: Option<String> = conn
            .query_row(
                "SELECT reference FROM access_records WHERE owner = ?1",
                params![owner.as_bytes().as_slice()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(reference.map(DataReference::from))
    }

    fn put_reference(&self, owner: &Principal, reference: &DataReference) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO access_records (owner, reference, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(owner) DO UPDATE SET
                reference = excluded.reference,
                updated_at = excluded.updated_at",
            params![
                owner.as_bytes().as_slice(),
                reference.as_str(),
                crate::now_millis()
            ],
        )?;

        Ok(())
    }

    fn owners(&self) -> Result<Vec<Principal>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare("SELECT owner FROM access_records ORDER BY owner")?;
        let blobs = stmt
            .query_map([], |row| row.get::<_, Vec<u8>>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        blobs
            .into_iter()
            .map(|b| blob_to_principal(b, "owner"))
            .collect()
    }

    fn is_granted(&self, key: &PermissionKey) -> Result<bool> {
        let conn = self.lock()?;

        let granted: Option<bool> = conn
            .query_row(
                "SELECT granted FROM permissions WHERE owner = ?1 AND reader = ?2",
                params![key.owner.as_bytes().as_slice(), key.reader.as_bytes().as_slice()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(granted.unwrap_or(false))
    }

    fn set_permission(&self, key: &PermissionKey, granted: bool) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO permissions (owner, reader, granted, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(owner, reader) DO UPDATE SET
                granted = excluded.granted,
                updated_at = excluded.updated_at",
            params![
                key.owner.as_bytes().as_slice(),
                key.reader.as_bytes().as_slice(),
                granted,
                crate::now_millis()
            ],
        )?;

        Ok(())
    }

    fn granted_readers(&self, owner: &Principal) -> Result<Vec<Principal>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT reader FROM permissions WHERE owner = ?1 AND granted = 1 ORDER BY reader",
        )?;
        let blobs = stmt
            .query_map(params![owner.as_bytes().as_slice()], |row| {
                row.get::<_, Vec<u8>>(0)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        blobs
            .into_iter()
            .map(|b| blob_to_principal(b, "reader"))
            .collect()
    }
}

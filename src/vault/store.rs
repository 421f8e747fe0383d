//! Record-store backend.
//!
//! `RecordStore` is the seam between the vault lifecycle and whatever
//! persists encrypted rows.  Every call is synchronous and durable when
//! it returns.  `SqliteRecordStore` is the on-disk implementation: one
//! table, autocommit per statement.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::record::CredentialRecord;
use crate::errors::{Result, VaultError};

/// Persistent, key-sorted mapping from service name to encrypted record.
pub trait RecordStore {
    /// Insert or replace the record for `record.service`.
    fn put(&mut self, record: &CredentialRecord) -> Result<()>;

    /// Look up a record by exact service name.
    fn fetch(&self, service: &str) -> Result<Option<CredentialRecord>>;

    /// All service names, ascending.
    fn services(&self) -> Result<Vec<String>>;

    /// Remove a record.  Returns `false` if nothing was stored.
    fn remove(&mut self, service: &str) -> Result<bool>;

    /// Flush and release the backing handle.
    fn close(self: Box<Self>) -> Result<()>;
}

/// SQLite-backed record store.
pub struct SqliteRecordStore {
    conn: Connection,
}

impl SqliteRecordStore {
    /// Open (or create) the record database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Restrict permissions on the database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Self::init(conn)
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS credentials (
                service  TEXT PRIMARY KEY,
                login    TEXT NOT NULL,
                password TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteRecordStore {
    fn put(&mut self, record: &CredentialRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO credentials (service, login, password)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(service) DO UPDATE SET
                login = excluded.login,
                password = excluded.password",
            params![
                record.service,
                record.encrypted_login,
                record.encrypted_password
            ],
        )?;
        debug!(service = %record.service, "record stored");
        Ok(())
    }

    fn fetch(&self, service: &str) -> Result<Option<CredentialRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT service, login, password FROM credentials WHERE service = ?1",
                params![service],
                |row| {
                    Ok(CredentialRecord {
                        service: row.get(0)?,
                        encrypted_login: row.get(1)?,
                        encrypted_password: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    fn services(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT service FROM credentials ORDER BY service")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut services = Vec::new();
        for row in rows {
            services.push(row?);
        }
        Ok(services)
    }

    fn remove(&mut self, service: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM credentials WHERE service = ?1", params![service])?;
        debug!(service, removed, "record delete");
        Ok(removed > 0)
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| VaultError::Storage(e))
    }
}

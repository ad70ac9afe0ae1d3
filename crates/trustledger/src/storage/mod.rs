//! Storage layer for trustledger.
//!
//! This module provides a `SQLite`-backed key-value store. Each key (slot)
//! holds one text value plus a BLAKE3 hash of it, so a corrupted value is
//! detected on read instead of being handed to the JSON decoder. The member
//! snapshot lives in one such slot, exposed through [`StorageSlot`].

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::persistence::PersistencePort;

/// Key-value storage engine.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wrap this storage as the persistence slot for `key`.
    #[must_use]
    pub fn into_slot(self, key: impl Into<String>) -> StorageSlot {
        StorageSlot {
            storage: self,
            key: key.into(),
        }
    }

    /// Compute the BLAKE3 hash of a stored value.
    #[must_use]
    pub fn compute_hash(value: &str) -> String {
        blake3::hash(value.as_bytes()).to_hex().to_string()
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails, or
    /// [`Error::PersistenceUnavailable`] if the stored hash does not match
    /// the stored value.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT value, value_hash FROM slots WHERE key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((value, hash)) if Self::compute_hash(&value) == hash => Ok(Some(value)),
            Some(_) => Err(Error::persistence(format!(
                "value of slot '{key}' does not match its hash"
            ))),
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// The value and its hash are written by a single statement, so readers
    /// observe either the old or the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let hash = Self::compute_hash(value);
        let updated_at = Utc::now().to_rfc3339();

        self.conn.execute(
            r"
            INSERT OR REPLACE INTO slots (key, value, value_hash, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![key, value, hash, updated_at],
        )?;

        debug!("Wrote {} bytes to slot '{}'", value.len(), key);
        Ok(())
    }

    /// Delete the value stored under `key`.
    ///
    /// Returns `true` if a value was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM slots WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// List all slot keys, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM slots ORDER BY updated_at DESC")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let (total_slots, total_value_bytes): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(LENGTH(CAST(value AS BLOB))), 0) FROM slots",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let newest: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM slots ORDER BY updated_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let last_updated = newest
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_slots,
            total_value_bytes,
            last_updated,
            db_size_bytes,
        })
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of slots holding a value.
    pub total_slots: i64,
    /// Combined size of all stored values in bytes.
    pub total_value_bytes: i64,
    /// When any slot was last written.
    pub last_updated: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

/// A single storage key used as the member snapshot slot.
#[derive(Debug)]
pub struct StorageSlot {
    storage: Storage,
    key: String,
}

impl StorageSlot {
    /// The slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

impl PersistencePort for StorageSlot {
    fn describe(&self) -> String {
        format!("slot '{}' of {}", self.key, self.storage.path().display())
    }

    fn read_snapshot(&self) -> Result<Option<String>> {
        self.storage.get(&self.key)
    }

    fn write_snapshot(&self, snapshot: &str) -> Result<()> {
        self.storage.put(&self.key, snapshot)
    }
}

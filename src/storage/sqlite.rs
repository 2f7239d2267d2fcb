//! Implements a SQLite backed key-value store.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use super::{StorageAdapter, StorageError};

/// Stores values as blobs in a single SQLite table.
#[derive(Debug)]
pub struct SqliteStorage {
    connection: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the table cannot be
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::new(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Use an existing `connection`, adding the key-value table if needed.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, StorageError> {
        create_key_value_table(&connection)?;

        Ok(Self { connection })
    }
}

/// Create the key-value table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL
                )",
        (),
    )?;

    Ok(())
}

impl StorageAdapter for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.connection
            .query_row(
                "SELECT value FROM key_value WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(StorageError::from)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.connection.execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.connection
            .execute("DELETE FROM key_value WHERE key = ?1", [key])?;

        Ok(())
    }
}

//! Contains the key-value storage trait the store persists through, its
//! implementations, and the codec for the persisted transaction list.
//!
//! The payload under [STORAGE_KEY] is a JSON array of
//! `{id, description, amount, type, date}` records.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::transaction::Transaction;

/// The key the transaction list is persisted under.
pub const STORAGE_KEY: &str = "afripay-transactions";

/// Errors originating from a storage backend or the persisted payload.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StorageError {
    /// The backend could not be reached or refused the operation.
    #[error("the storage backend is unavailable: {0}")]
    Unavailable(String),

    /// The stored bytes are not a valid transaction list.
    #[error("the stored transactions could not be decoded: {0}")]
    CorruptPayload(String),

    /// The transaction list could not be encoded.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.code == rusqlite::ErrorCode::DatabaseBusy
                    || sql_error.code == rusqlite::ErrorCode::DatabaseLocked
                    || sql_error.code == rusqlite::ErrorCode::CannotOpen =>
            {
                StorageError::Unavailable(sql_error.to_string())
            }
            error => StorageError::SqlError(error.to_string()),
        }
    }
}

/// A key-value byte store.
///
/// Implementations hold no business logic. Writes are best-effort from the
/// point of view of [crate::TransactionStore], which logs failures and carries
/// on.
pub trait StorageAdapter {
    /// Get the bytes stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Remove whatever is stored under `key`. Removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read the transaction list stored under `key`.
///
/// Returns an empty list if nothing is stored.
///
/// # Errors
/// Returns a [StorageError::CorruptPayload] if the stored bytes are not a
/// transaction list, or the backend's error if the read fails.
pub fn load_transactions<S: StorageAdapter + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Vec<Transaction>, StorageError> {
    match storage.get(key)? {
        Some(bytes) => serde_json::from_slice(&bytes)
            .map_err(|error| StorageError::CorruptPayload(error.to_string())),
        None => Ok(Vec::new()),
    }
}

/// Write the full transaction list under `key`.
///
/// # Errors
/// Returns the backend's error if the write fails.
pub fn save_transactions<S: StorageAdapter + ?Sized>(
    storage: &mut S,
    key: &str,
    transactions: &[Transaction],
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec(transactions)
        .map_err(|error| StorageError::JSONSerializationError(error.to_string()))?;

    storage.set(key, &bytes)
}

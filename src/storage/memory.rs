//! An in-memory key-value store.

use std::collections::HashMap;

use super::{StorageAdapter, StorageError};

/// Keeps values in a `HashMap`. Useful for tests and for embedding the store
/// where persistence is handled elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys with a value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys have a value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{MemoryStorage, StorageAdapter};

    #[test]
    fn set_replaces_previous_value() {
        let mut storage = MemoryStorage::new();

        storage.set("key", b"first").unwrap();
        storage.set("key", b"second").unwrap();

        assert_eq!(storage.get("key"), Ok(Some(b"second".to_vec())));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn remove_clears_key() {
        let mut storage = MemoryStorage::new();
        storage.set("key", b"value").unwrap();

        storage.remove("key").unwrap();
        storage.remove("missing").unwrap();

        assert_eq!(storage.get("key"), Ok(None));
        assert!(storage.is_empty());
    }
}

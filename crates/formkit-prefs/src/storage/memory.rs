use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::Storage;
use crate::error::Result;

/// In-memory storage.
///
/// Clones share one map, so two stores built from clones behave like two
/// tabs over the same origin: last write wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Test helper to plant a raw value, e.g. corrupted JSON.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    /// Raw stored value, bypassing deserialization.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("theme").unwrap(), None);
    }

    #[test]
    fn test_write_overwrites() {
        let storage = MemoryStorage::new();
        storage.write("k", "1").unwrap();
        storage.write("k", "2").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let storage = MemoryStorage::new();
        storage.remove("nothing").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let tab_a = MemoryStorage::new();
        let tab_b = tab_a.clone();
        tab_a.write("k", "a").unwrap();
        tab_b.write("k", "b").unwrap();
        assert_eq!(tab_a.raw("k").as_deref(), Some("b"));
    }
}

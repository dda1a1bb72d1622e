//! In-memory Backend
//!
//! Ordered, thread-safe string store used when no other backend is supplied.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::StorageBackend;

// == Memory Backend ==
/// Process-local key-value store backed by a `BTreeMap`.
///
/// Keys enumerate in lexicographic order, so `key_at` is stable between mutations.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the backend holds no keys.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, String>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, String>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.write().insert(key.to_string(), value);
    }

    fn delete(&self, key: &str) {
        self.write().remove(key);
    }

    fn key_count(&self) -> usize {
        self.read().len()
    }

    fn key_at(&self, index: usize) -> Option<String> {
        self.read().keys().nth(index).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }
}

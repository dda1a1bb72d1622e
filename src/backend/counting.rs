//! Counting Backend
//!
//! Wraps another backend and records how many calls of each kind reach it.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::StorageBackend;

// == Backend Calls ==
/// Snapshot of the calls observed by a [`CountingBackend`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackendCalls {
    /// `get` calls
    pub reads: u64,
    /// `set` calls
    pub writes: u64,
    /// `delete` calls
    pub deletes: u64,
    /// `key_count`, `key_at` and `keys` calls
    pub enumerations: u64,
}

// == Counting Backend ==
/// Instrumented backend decorator.
#[derive(Debug, Default)]
pub struct CountingBackend<B> {
    inner: B,
    reads: AtomicU64,
    writes: AtomicU64,
    deletes: AtomicU64,
    enumerations: AtomicU64,
}

impl<B: StorageBackend> CountingBackend<B> {
    /// Wraps `inner` with all counters at zero.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
            enumerations: AtomicU64::new(0),
        }
    }

    /// Returns the wrapped backend, bypassing the counters.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Current call counts.
    pub fn calls(&self) -> BackendCalls {
        BackendCalls {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            enumerations: self.enumerations.load(Ordering::Relaxed),
        }
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        self.reads.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
        self.deletes.store(0, Ordering::Relaxed);
        self.enumerations.store(0, Ordering::Relaxed);
    }
}

impl<B: StorageBackend> StorageBackend for CountingBackend<B> {
    fn get(&self, key: &str) -> Option<String> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.inner.set(key, value);
    }

    fn delete(&self, key: &str) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.inner.delete(key);
    }

    fn key_count(&self) -> usize {
        self.enumerations.fetch_add(1, Ordering::Relaxed);
        self.inner.key_count()
    }

    fn key_at(&self, index: usize) -> Option<String> {
        self.enumerations.fetch_add(1, Ordering::Relaxed);
        self.inner.key_at(index)
    }

    fn keys(&self) -> Vec<String> {
        self.enumerations.fetch_add(1, Ordering::Relaxed);
        self.inner.keys()
    }
}

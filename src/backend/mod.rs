//! Backend Module
//!
//! The storage capability the cache is layered on, plus the stores shipped with the crate.

mod counting;
mod memory;

pub use counting::{BackendCalls, CountingBackend};
pub use memory::MemoryBackend;

// == Storage Backend ==
/// A string key-value store the cache can sit on top of.
///
/// Implementations only need to provide single-key operations and positional key
/// enumeration. The cache never assumes atomicity across calls.
pub trait StorageBackend: Send + Sync + 'static {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String);

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str);

    /// Number of keys currently held.
    fn key_count(&self) -> usize;

    /// Key at position `index`, or `None` when out of range.
    fn key_at(&self, index: usize) -> Option<String>;

    /// Snapshot of every key currently held.
    ///
    /// Taken before any mutation so that deletes during a scan cannot shift positions.
    fn keys(&self) -> Vec<String> {
        (0..self.key_count())
            .filter_map(|index| self.key_at(index))
            .collect()
    }
}

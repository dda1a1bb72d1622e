//! TTL Overlay - expiring entries on top of any key-value store
//!
//! Wraps a string key-value backend with per-entry time-to-live, lazy eviction on
//! access, an optional background sweep, and key namespacing.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
mod tasks;

pub use api::AppState;
pub use backend::{CountingBackend, MemoryBackend, StorageBackend};
pub use cache::{CacheEntry, CacheStats, SweepState, TtlCache};
pub use config::{CacheConfig, ServerConfig};
pub use error::{CacheError, Result};

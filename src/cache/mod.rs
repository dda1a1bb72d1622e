//! Cache Module
//!
//! TTL expiration layered over a pluggable key-value backend.

mod engine;
mod entry;
mod namespace;
mod stats;


// Re-export public types
pub(crate) use engine::CacheCore;
pub use engine::{SweepState, TtlCache};
pub use entry::{CacheEntry, DecodeError};
pub use namespace::KeyNamespace;
pub use stats::CacheStats;
pub(crate) use stats::StatsRecorder;

//! Cache Statistics Module
//!
//! Tracks lookups and evictions performed by the expiration engine.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of cache activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful `get` calls
    pub hits: u64,
    /// Number of `get` calls that found nothing live
    pub misses: u64,
    /// Entries evicted on access (`has`/`get`)
    pub lazy_evictions: u64,
    /// Entries evicted by the background sweep
    pub sweep_evictions: u64,
    /// Completed sweep passes
    pub sweep_passes: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total entries evicted for being expired.
    pub fn evictions(&self) -> u64 {
        self.lazy_evictions + self.sweep_evictions
    }
}

// == Stats Recorder ==
/// Lock-free counters shared between callers and the sweep task.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    lazy_evictions: AtomicU64,
    sweep_evictions: AtomicU64,
    sweep_passes: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_lazy_eviction(&self) {
        self.lazy_evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_sweep(&self, evicted: u64) {
        self.sweep_evictions.fetch_add(evicted, Ordering::Relaxed);
        self.sweep_passes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            lazy_evictions: self.lazy_evictions.load(Ordering::Relaxed),
            sweep_evictions: self.sweep_evictions.load(Ordering::Relaxed),
            sweep_passes: self.sweep_passes.load(Ordering::Relaxed),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = StatsRecorder::default().snapshot();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.evictions(), 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let recorder = StatsRecorder::default();
        recorder.record_hit();
        recorder.record_hit();
        recorder.record_hit();
        recorder.record_miss();

        assert_eq!(recorder.snapshot().hit_rate(), 0.75);
    }

    #[test]
    fn test_evictions_combine_lazy_and_sweep() {
        let recorder = StatsRecorder::default();
        recorder.record_lazy_eviction();
        recorder.record_sweep(3);
        recorder.record_sweep(0);

        let stats = recorder.snapshot();
        assert_eq!(stats.lazy_evictions, 1);
        assert_eq!(stats.sweep_evictions, 3);
        assert_eq!(stats.sweep_passes, 2);
        assert_eq!(stats.evictions(), 4);
    }
}

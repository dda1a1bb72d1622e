//! Expiration Engine Module
//!
//! TTL enforcement on top of a [`StorageBackend`]: lazy eviction on access, an optional
//! background sweep, and namespace-scoped flushing on close.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::backend::{MemoryBackend, StorageBackend};
use crate::cache::{CacheEntry, CacheStats, KeyNamespace, StatsRecorder};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweep_task, SweepHandle};

// == Lookup ==
/// Outcome of the check-and-evict primitive for one backend key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// Nothing stored
    Missing,
    /// Stored data is not a cache entry; left untouched
    Undecodable,
    /// Entry had expired and was deleted
    Expired,
    /// Entry is valid
    Live,
}

// == Sweep State ==
/// Lifecycle of the background sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    /// No sweep configured
    Idle,
    /// Sweep timer active
    Running,
    /// Cache closed
    Stopped,
}

enum Lifecycle {
    Idle,
    Running(SweepHandle),
    Stopped,
}

// == Cache Core ==
/// State shared between caller operations and the sweep task.
pub(crate) struct CacheCore {
    backend: Arc<dyn StorageBackend>,
    namespace: KeyNamespace,
    default_ttl: Option<u64>,
    stats: StatsRecorder,
}

impl CacheCore {
    /// Reads `backend_key`, deleting it if it holds an expired entry.
    ///
    /// At most one read and one delete reach the backend.
    pub(crate) fn check_and_evict(&self, backend_key: &str) -> Lookup {
        let Some(raw) = self.backend.get(backend_key) else {
            return Lookup::Missing;
        };

        let entry = match CacheEntry::decode(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(key = backend_key, error = %e, "Ignoring undecodable entry");
                return Lookup::Undecodable;
            }
        };

        if entry.is_expired() {
            self.backend.delete(backend_key);
            return Lookup::Expired;
        }

        Lookup::Live
    }

    /// Runs the check-and-evict primitive over every namespaced key.
    ///
    /// Returns the number of entries evicted.
    pub(crate) fn sweep_expired(&self) -> u64 {
        let mut evicted = 0;

        for backend_key in self.owned_keys() {
            if self.check_and_evict(&backend_key) == Lookup::Expired {
                debug!(key = ?self.namespace.strip(&backend_key), "Sweep evicted expired entry");
                evicted += 1;
            }
        }

        self.stats.record_sweep(evicted);
        evicted
    }

    /// Deletes every namespaced key regardless of content.
    fn flush(&self) -> usize {
        let keys = self.owned_keys();
        for backend_key in &keys {
            self.backend.delete(backend_key);
        }
        keys.len()
    }

    fn owned_keys(&self) -> Vec<String> {
        self.backend
            .keys()
            .into_iter()
            .filter(|key| self.namespace.owns(key))
            .collect()
    }
}

// == TTL Cache ==
/// TTL cache overlay over a string key-value backend.
///
/// Values are stored as JSON under `key_prefix + key`. Expired entries are never returned
/// and are deleted whenever a lookup or sweep pass observes them.
///
/// # Example
///
/// ```rust
/// use ttl_overlay::{CacheConfig, TtlCache};
///
/// let cache = TtlCache::new(CacheConfig::default()).unwrap();
/// cache.set("foo", "bar").unwrap();
/// assert!(cache.has("foo"));
/// assert_eq!(cache.get::<String>("foo").unwrap(), "bar");
/// cache.close();
/// ```
pub struct TtlCache {
    core: Arc<CacheCore>,
    lifecycle: Mutex<Lifecycle>,
    closed: AtomicBool,
}

impl TtlCache {
    // == Constructors ==
    /// Creates a cache over a fresh [`MemoryBackend`].
    ///
    /// Fails only if a sweep period is configured outside a Tokio runtime.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Self::with_backend(config, Arc::new(MemoryBackend::new()))
    }

    /// Creates a cache over `backend`, starting the sweep if one is configured.
    pub fn with_backend(config: CacheConfig, backend: Arc<dyn StorageBackend>) -> Result<Self> {
        let sweep_period = config.effective_sweep_period();

        let core = Arc::new(CacheCore {
            backend,
            namespace: KeyNamespace::new(config.key_prefix),
            default_ttl: config.default_ttl,
            stats: StatsRecorder::default(),
        });

        let lifecycle = match sweep_period {
            Some(period) => Lifecycle::Running(spawn_sweep_task(core.clone(), period)?),
            None => Lifecycle::Idle,
        };

        Ok(Self {
            core,
            lifecycle: Mutex::new(lifecycle),
            closed: AtomicBool::new(false),
        })
    }

    // == Has ==
    /// Returns true if a live entry exists for `key`.
    ///
    /// An expired entry found here is deleted from the backend. Undecodable data counts
    /// as absent. Always false once the cache is closed.
    pub fn has(&self, key: &str) -> bool {
        if self.is_closed() {
            warn!(key, "has called on closed cache");
            return false;
        }

        match self.core.check_and_evict(&self.core.namespace.key(key)) {
            Lookup::Live => true,
            Lookup::Expired => {
                debug!(key, "Lazily evicted expired entry");
                self.core.stats.record_lazy_eviction();
                false
            }
            Lookup::Missing | Lookup::Undecodable => false,
        }
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// # Errors
    /// - `NotFound` if the key is absent, expired, or holds undecodable data
    /// - `Invalid` if the entry changed between the existence check and the read,
    ///   or its value does not deserialize into `T`
    /// - `Closed` after [`TtlCache::close`]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.ensure_open()?;

        if !self.has(key) {
            self.core.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        }

        let raw = self
            .core
            .backend
            .get(&self.core.namespace.key(key))
            .ok_or_else(|| CacheError::Invalid(key.to_string()))?;

        let entry = CacheEntry::decode(&raw).map_err(|e| {
            warn!(key, error = %e, "Entry became undecodable after existence check");
            CacheError::Invalid(key.to_string())
        })?;

        let value = serde_json::from_value(entry.value).map_err(|e| {
            debug!(key, error = %e, "Stored value does not match requested type");
            CacheError::Invalid(key.to_string())
        })?;

        self.core.stats.record_hit();
        Ok(value)
    }

    // == Set ==
    /// Stores `value` under `key` with the configured default TTL.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.set_with_ttl(key, value, self.core.default_ttl)
    }

    /// Stores `value` under `key` expiring after `ttl` seconds.
    ///
    /// `None` stores an entry that never expires. `Some(0)` writes nothing.
    /// Any existing entry is overwritten.
    pub fn set_with_ttl<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<u64>,
    ) -> Result<()> {
        self.ensure_open()?;

        if ttl == Some(0) {
            debug!(key, "Skipping write for zero TTL");
            return Ok(());
        }

        let value =
            serde_json::to_value(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        let entry = CacheEntry::new(value, ttl);

        self.core
            .backend
            .set(&self.core.namespace.key(key), entry.encode());
        Ok(())
    }

    // == Expire ==
    /// Removes `key` whether or not it exists. No-op once the cache is closed.
    pub fn expire(&self, key: &str) {
        if self.is_closed() {
            warn!(key, "expire called on closed cache");
            return;
        }

        self.core.backend.delete(&self.core.namespace.key(key));
    }

    // == Close ==
    /// Stops the sweep and deletes every key in this cache's namespace.
    ///
    /// No sweep pass runs after this returns. Keys outside the namespace are untouched.
    /// Calling it again does nothing.
    pub fn close(&self) {
        let previous = std::mem::replace(&mut *self.lifecycle(), Lifecycle::Stopped);

        if matches!(previous, Lifecycle::Stopped) {
            return;
        }
        self.closed.store(true, Ordering::SeqCst);

        if let Lifecycle::Running(handle) = previous {
            handle.stop();
        }

        let removed = self.core.flush();
        info!(removed, prefix = self.core.namespace.prefix(), "Cache closed");
    }

    // == Introspection ==
    /// Current sweep lifecycle state.
    pub fn sweep_state(&self) -> SweepState {
        match &*self.lifecycle() {
            Lifecycle::Idle => SweepState::Idle,
            Lifecycle::Running(_) => SweepState::Running,
            Lifecycle::Stopped => SweepState::Stopped,
        }
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.core.stats.snapshot()
    }

    /// The namespace prefix applied to every key.
    pub fn key_prefix(&self) -> &str {
        self.core.namespace.prefix()
    }

    #[cfg(test)]
    pub(crate) fn core(&self) -> Arc<CacheCore> {
        self.core.clone()
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(CacheError::Closed);
        }
        Ok(())
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

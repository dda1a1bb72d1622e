//! Expiry Sweep Task
//!
//! Background task that periodically evicts expired entries from a cache's namespace
//! without waiting for them to be read.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheCore;
use crate::error::{CacheError, Result};

/// Handle to a running sweep task.
///
/// Stopping is synchronous: once [`SweepHandle::stop`] returns, any pass that was in
/// flight has finished and no further pass will start. Dropping the handle stops the task.
pub(crate) struct SweepHandle {
    /// Set to true under the lock to cancel; every pass runs while holding it
    gate: Arc<Mutex<bool>>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Cancels the sweep. Safe to call more than once.
    pub(crate) fn stop(&self) {
        {
            let mut cancelled = self.gate.lock().unwrap_or_else(|p| p.into_inner());
            if *cancelled {
                return;
            }
            *cancelled = true;
        }

        let _ = self.shutdown_tx.send(true);
        self.task.abort();
        info!("Expiry sweep stopped");
    }

    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns the sweep loop for `core`, running a pass every `period`.
///
/// # Errors
/// Returns `Runtime` when called outside a Tokio runtime.
pub(crate) fn spawn_sweep_task(core: Arc<CacheCore>, period: Duration) -> Result<SweepHandle> {
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| CacheError::Runtime(format!("expiry sweep needs a Tokio runtime: {e}")))?;

    let gate = Arc::new(Mutex::new(false));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let task = runtime.spawn(sweep_loop(core, period, gate.clone(), shutdown_rx));

    info!(period_ms = period.as_millis() as u64, "Expiry sweep started");

    Ok(SweepHandle {
        gate,
        shutdown_tx,
        task,
    })
}

async fn sweep_loop(
    core: Arc<CacheCore>,
    period: Duration,
    gate: Arc<Mutex<bool>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(period) => {}
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    debug!("Expiry sweep received shutdown signal");
                    return;
                }
            }
        }

        let evicted = {
            let cancelled = gate.lock().unwrap_or_else(|p| p.into_inner());
            if *cancelled {
                return;
            }
            core.sweep_expired()
        };

        if evicted > 0 {
            info!("Expiry sweep: removed {} expired entries", evicted);
        } else {
            debug!("Expiry sweep: no expired entries found");
        }
    }
}

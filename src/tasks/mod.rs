//! Background Tasks Module
//!
//! Contains background tasks that run periodically while a cache is open.
//!
//! # Tasks
//! - Sweep: evicts expired namespaced entries at the configured period

mod sweep;

pub(crate) use sweep::{spawn_sweep_task, SweepHandle};

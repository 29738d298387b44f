//! Engine time source
//!
//! The engine stamps every submission once and reuses the value for the
//! order id, trade ids, and the resting timestamp. `MonotonicClock`
//! anchors wall-clock milliseconds at construction and advances by a
//! monotonic instant, so time never runs backward within one engine
//! lifetime. `ManualClock` drives deterministic tests and simulations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Source of wall-clock milliseconds for the engine.
pub trait TimeSource: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall-anchored monotonic clock.
#[derive(Debug)]
pub struct MonotonicClock {
    base_ms: u64,
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        let base_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |epoch| epoch.as_millis() as u64);
        Self {
            base_ms,
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.base_ms + self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-advanced clock for tests and deterministic simulation.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

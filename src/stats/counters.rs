//! Process-wide notification counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// In-memory counters, reset on restart.
#[derive(Debug)]
pub struct ProcessCounters {
    started_at: Instant,
    received: AtomicU64,
    logged: AtomicU64,
    write_errors: AtomicU64,
    rotations: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterValues {
    pub received: u64,
    pub logged: u64,
    pub write_errors: u64,
    pub rotations: u64,
}

impl ProcessCounters {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            received: AtomicU64::new(0),
            logged: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            rotations: AtomicU64::new(0),
        }
    }

    /// A webhook body was accepted by the normalizer.
    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    /// A notification reached the log file.
    pub fn record_logged(&self, rotated: bool) {
        self.logged.fetch_add(1, Ordering::Relaxed);
        if rotated {
            self.rotations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn values(&self) -> CounterValues {
        CounterValues {
            received: self.received.load(Ordering::Relaxed),
            logged: self.logged.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
        }
    }
}

impl Default for ProcessCounters {
    fn default() -> Self {
        Self::new()
    }
}

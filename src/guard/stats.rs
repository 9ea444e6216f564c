//! Guard Statistics Module
//!
//! Counts what happened to armed items over the engine's lifetime.

use serde::Serialize;

// == Guard Stats ==
/// Lifetime counters for a guard engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuardStats {
    /// Number of items armed
    pub armed: u64,
    /// Number of items removed by disarm before they fired
    pub disarmed: u64,
    /// Number of items whose deadline passed and were fired
    pub fired: u64,
    /// Number of expiry callbacks that panicked
    pub callback_failures: u64,
    /// Number of sweeps skipped or not persisted because storage failed
    pub sweep_failures: u64,
}

impl GuardStats {
    // == Constructor ==
    /// Creates a new GuardStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_armed(&mut self) {
        self.armed += 1;
    }

    pub fn record_disarmed(&mut self) {
        self.disarmed += 1;
    }

    pub fn record_fired(&mut self) {
        self.fired += 1;
    }

    pub fn record_callback_failure(&mut self) {
        self.callback_failures += 1;
    }

    pub fn record_sweep_failure(&mut self) {
        self.sweep_failures += 1;
    }

    // == Settled ==
    /// Items that reached a terminal outcome (disarmed or fired).
    pub fn settled(&self) -> u64 {
        self.disarmed + self.fired
    }
}

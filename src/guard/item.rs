//! Tracked Item Module
//!
//! Defines a guarded payload together with its absolute deadline.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Tracked Item ==
/// A caller payload armed with an expiration deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedItem<T> {
    /// The caller-defined payload
    pub payload: T,
    /// Expiration timestamp (Unix milliseconds)
    pub expire_at: u64,
}

impl<T> TrackedItem<T> {
    // == Constructor ==
    /// Creates a new item that expires `ttl` after `now_ms`.
    ///
    /// # Arguments
    /// * `payload` - The payload to guard
    /// * `now_ms` - Current Unix time in milliseconds
    /// * `ttl` - Time until the item expires
    pub fn new(payload: T, now_ms: u64, ttl: Duration) -> Self {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        Self {
            payload,
            expire_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks whether the deadline has passed at `now_ms`.
    ///
    /// The comparison is strict: an item whose deadline equals `now_ms` is
    /// still pending and fires on the next sweep.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        self.expire_at < now_ms
    }

    // == Remaining ==
    /// Returns milliseconds left before the deadline, or 0 once it has passed.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.expire_at.saturating_sub(now_ms)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

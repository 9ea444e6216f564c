//! Guard Module
//!
//! Expiry tracking: arm a payload with a deadline, disarm it, or let the
//! sweep fire it. The item collection lives in a pluggable blob store.

pub mod codec;
mod config;
mod engine;
mod item;
mod stats;
mod storage;


// Re-export public types
pub use config::{
    Clock, ExpireCallback, GuardConfig, IdentityCheck, DEFAULT_STORAGE_KEY,
    DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL,
};
pub use engine::Guard;
pub use item::{current_timestamp_ms, TrackedItem};
pub use stats::GuardStats;
pub use storage::{MemoryStorage, Storage};

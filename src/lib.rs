//! Deadline Guard - arm, disarm, or let it fire
//!
//! Tracks payloads with expiration deadlines and invokes a callback exactly
//! once for every item that is not disarmed in time. The item collection is
//! persisted through a pluggable blob store.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{GuardError, Result};
pub use guard::{Guard, GuardConfig, MemoryStorage, Storage, TrackedItem};
pub use tasks::spawn_sweep_task;

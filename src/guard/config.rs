//! Guard Configuration Module
//!
//! Builder for everything a [`Guard`](crate::guard::Guard) needs. The two
//! callbacks are required; everything else falls back to a default.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::guard::storage::{MemoryStorage, Storage};

/// Default time-to-live for armed items (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default interval between sweeps (1 minute)
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Default storage key the item collection is kept under
pub const DEFAULT_STORAGE_KEY: &str = "deadline_guard_default_key";

/// Matches an external id against a payload.
pub type IdentityCheck<T> = Arc<dyn Fn(&str, &T) -> bool + Send + Sync>;

/// Called once with the payload of every item whose deadline passed.
pub type ExpireCallback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Returns the current Unix time in milliseconds.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Configuration for a guard engine.
///
/// # Example
///
/// ```rust
/// use deadline_guard::guard::GuardConfig;
/// use std::time::Duration;
///
/// let config = GuardConfig::<String>::new()
///     .identity_check(|id, payload| id == payload)
///     .on_expire(|payload| println!("{payload} expired"))
///     .default_ttl(Duration::from_secs(30))
///     .sweep_interval(Duration::from_secs(5));
/// ```
pub struct GuardConfig<T> {
    pub(crate) identity_check: Option<IdentityCheck<T>>,
    pub(crate) on_expire: Option<ExpireCallback<T>>,
    pub(crate) default_ttl: Duration,
    pub(crate) sweep_interval: Duration,
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) storage_key: String,
    pub(crate) fixed_ttl: bool,
    pub(crate) clock: Option<Clock>,
}

impl<T> Default for GuardConfig<T> {
    fn default() -> Self {
        Self {
            identity_check: None,
            on_expire: None,
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            storage: Arc::new(MemoryStorage::new()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            fixed_ttl: false,
            clock: None,
        }
    }
}

impl<T> GuardConfig<T> {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the predicate used by disarm to find an item by external id.
    pub fn identity_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&str, &T) -> bool + Send + Sync + 'static,
    {
        self.identity_check = Some(Arc::new(check));
        self
    }

    /// Sets the callback invoked when an item expires.
    ///
    /// It runs synchronously inside the sweep and should return quickly.
    pub fn on_expire<F>(mut self, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.on_expire = Some(Arc::new(callback));
        self
    }

    /// Sets the TTL used when arm is called without one. Zero keeps the default.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        if !ttl.is_zero() {
            self.default_ttl = ttl;
        }
        self
    }

    /// Sets the interval between sweeps. Zero keeps the default.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        if !interval.is_zero() {
            self.sweep_interval = interval;
        }
        self
    }

    /// Sets the storage backend.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    /// Sets the key the collection is stored under. Empty keeps the default.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.is_empty() {
            self.storage_key = key;
        }
        self
    }

    /// When true, per-call TTLs passed to arm are ignored.
    pub fn fixed_ttl(mut self, fixed: bool) -> Self {
        self.fixed_ttl = fixed;
        self
    }

    /// Replaces the system clock.
    pub fn clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        self.clock = Some(Arc::new(clock));
        self
    }
}

impl<T> fmt::Debug for GuardConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardConfig")
            .field("identity_check", &self.identity_check.is_some())
            .field("on_expire", &self.on_expire.is_some())
            .field("default_ttl", &self.default_ttl)
            .field("sweep_interval", &self.sweep_interval)
            .field("storage_key", &self.storage_key)
            .field("fixed_ttl", &self.fixed_ttl)
            .finish_non_exhaustive()
    }
}

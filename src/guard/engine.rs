//! Guard Engine Module
//!
//! Arms payloads with deadlines, disarms them on request, and fires the
//! expiry callback for every item a sweep finds past its deadline.
//!
//! Each read-modify-write cycle against the stored collection runs under a
//! single engine-wide lock, so a sweep can never overwrite an item that an
//! arm appended concurrently (or resurrect one a disarm just removed).

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{watch, Mutex};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::error::{GuardError, Result};
use crate::guard::config::{Clock, ExpireCallback, GuardConfig, IdentityCheck};
use crate::guard::item::current_timestamp_ms;
use crate::guard::{codec, GuardStats, Storage, TrackedItem};

struct GuardInner<T> {
    identity_check: IdentityCheck<T>,
    on_expire: ExpireCallback<T>,
    default_ttl: Duration,
    sweep_interval: Duration,
    storage: Arc<dyn Storage>,
    storage_key: String,
    fixed_ttl: bool,
    clock: Clock,
    /// Held for the whole of every cycle
    cycle: Mutex<CycleState<T>>,
}

struct CycleState<T> {
    stats: GuardStats,
    /// Collection left behind by a sweep that fired items but could not
    /// write the result. It supersedes what storage holds until persisted.
    unsaved: Option<Vec<TrackedItem<T>>>,
}

// == Guard ==
/// Expiry tracking engine.
///
/// Cloning is cheap and every clone drives the same engine, so one clone can
/// be moved into the sweep task while others keep arming and disarming.
pub struct Guard<T> {
    inner: Arc<GuardInner<T>>,
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Guard<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    // == Constructor ==
    /// Builds an engine from `config`.
    ///
    /// # Errors
    /// Returns `GuardError::Configuration` when the identity check or the
    /// expiry callback was not set.
    pub fn new(config: GuardConfig<T>) -> Result<Self> {
        let identity_check = config.identity_check.ok_or_else(|| {
            GuardError::Configuration("identity check is required".to_string())
        })?;
        let on_expire = config
            .on_expire
            .ok_or_else(|| GuardError::Configuration("expiry callback is required".to_string()))?;

        Ok(Self {
            inner: Arc::new(GuardInner {
                identity_check,
                on_expire,
                default_ttl: config.default_ttl,
                sweep_interval: config.sweep_interval,
                storage: config.storage,
                storage_key: config.storage_key,
                fixed_ttl: config.fixed_ttl,
                clock: config.clock.unwrap_or_else(|| Arc::new(current_timestamp_ms)),
                cycle: Mutex::new(CycleState {
                    stats: GuardStats::new(),
                    unsaved: None,
                }),
            }),
        })
    }

    // == Arm ==
    /// Tracks `payload` until it is disarmed or its deadline passes.
    ///
    /// `ttl` overrides the default TTL unless the engine runs in fixed-TTL
    /// mode. Nothing is appended if the stored collection cannot be read.
    pub async fn arm(&self, payload: T, ttl: Option<Duration>) -> Result<()> {
        let ttl = match ttl {
            Some(ttl) if !self.inner.fixed_ttl => ttl,
            _ => self.inner.default_ttl,
        };

        let mut state = self.inner.cycle.lock().await;
        let mut items = self.load(&mut state).await?;
        let item = TrackedItem::new(payload, (self.inner.clock)(), ttl);
        let expire_at = item.expire_at;
        items.push(item);
        self.save(&items).await?;
        state.stats.record_armed();

        debug!(expire_at, pending = items.len(), "Armed item");
        Ok(())
    }

    // == Disarm ==
    /// Removes the first item matching `id` before it can fire.
    ///
    /// Returns `Ok(false)` without touching storage when nothing matches.
    /// A failed write-back is reported to the caller.
    pub async fn disarm(&self, id: &str) -> Result<bool> {
        let mut state = self.inner.cycle.lock().await;
        let mut items = self.load(&mut state).await?;

        let Some(index) = items
            .iter()
            .position(|item| (self.inner.identity_check)(id, &item.payload))
        else {
            debug!(id, "Disarm found no matching item");
            return Ok(false);
        };

        items.remove(index);
        self.save(&items).await?;
        state.stats.record_disarmed();

        debug!(id, pending = items.len(), "Disarmed item");
        Ok(true)
    }

    // == Sweep ==
    /// Fires and removes every item whose deadline has passed.
    ///
    /// Returns the number of items fired. A failed read is logged and the
    /// sweep becomes a no-op, to be retried on the next tick. Storage is only
    /// written when at least one item expired. If that write fails, the
    /// remaining collection is held by the engine and written before the next
    /// cycle reads storage, so fired items never fire again.
    pub async fn sweep(&self) -> usize {
        let mut state = self.inner.cycle.lock().await;

        let items = match self.load(&mut state).await {
            Ok(items) => items,
            Err(e) => {
                state.stats.record_sweep_failure();
                warn!("Sweep skipped, could not read items: {}", e);
                return 0;
            }
        };

        let now = (self.inner.clock)();
        let (expired, kept): (Vec<_>, Vec<_>) =
            items.into_iter().partition(|item| item.is_expired_at(now));

        if expired.is_empty() {
            return 0;
        }

        let fired = expired.len();
        for item in expired {
            let on_expire = &self.inner.on_expire;
            let payload = item.payload;
            if panic::catch_unwind(AssertUnwindSafe(|| on_expire(payload))).is_err() {
                state.stats.record_callback_failure();
                error!(expire_at = item.expire_at, "Expiry callback panicked");
            }
            state.stats.record_fired();
        }

        if let Err(e) = self.save(&kept).await {
            state.stats.record_sweep_failure();
            warn!("Sweep fired {} items but could not persist: {}", fired, e);
            state.unsaved = Some(kept);
        }

        fired
    }

    // == Run ==
    /// Sweeps every `sweep_interval` until `shutdown` turns true or its sender
    /// is dropped.
    ///
    /// The first sweep happens one full interval after the call. A sweep that
    /// is already running finishes before the loop notices the signal.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        if *shutdown.borrow() {
            return;
        }

        let interval = self.sweep_interval();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        info!("Starting sweep loop with interval of {:?}", interval);

        loop {
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let fired = self.sweep().await;
                    if fired > 0 {
                        info!("Sweep fired {} expired items", fired);
                    } else {
                        debug!("Sweep found no expired items");
                    }
                }
            }
        }

        info!("Sweep loop stopped");
    }

    // == Snapshot ==
    /// Returns the stored collection as it is right now.
    pub async fn snapshot(&self) -> Result<Vec<TrackedItem<T>>> {
        let mut state = self.inner.cycle.lock().await;
        self.load(&mut state).await
    }

    // == Stats ==
    /// Returns a copy of the lifetime counters.
    pub async fn stats(&self) -> GuardStats {
        self.inner.cycle.lock().await.stats.clone()
    }

    /// Current time according to the engine's clock, in Unix milliseconds.
    pub fn now_ms(&self) -> u64 {
        (self.inner.clock)()
    }

    pub fn sweep_interval(&self) -> Duration {
        self.inner.sweep_interval
    }

    async fn load(&self, state: &mut CycleState<T>) -> Result<Vec<TrackedItem<T>>> {
        if let Some(items) = state.unsaved.take() {
            if let Err(e) = self.save(&items).await {
                state.unsaved = Some(items);
                return Err(e);
            }
            debug!(pending = items.len(), "Persisted items held since a failed sweep write");
            return Ok(items);
        }

        let key = &self.inner.storage_key;
        if !self.inner.storage.exists(key).await? {
            return Ok(Vec::new());
        }
        codec::decode(&self.inner.storage.get(key).await?)
    }

    async fn save(&self, items: &[TrackedItem<T>]) -> Result<()> {
        let blob = codec::encode(items)?;
        self.inner.storage.set(&self.inner.storage_key, blob).await
    }
}

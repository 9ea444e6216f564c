//! Sweep Task
//!
//! Background task that drives a guard's periodic sweep.

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::guard::Guard;

/// Spawns a background task that sweeps `guard` at its configured interval.
///
/// The task stops after `shutdown` receives `true` (or its sender is dropped);
/// a sweep already in progress is allowed to finish.
///
/// # Example
/// ```ignore
/// let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
/// let sweep_handle = spawn_sweep_task(guard.clone(), shutdown_rx);
/// // Later, during shutdown:
/// shutdown_tx.send(true).ok();
/// sweep_handle.await.ok();
/// ```
pub fn spawn_sweep_task<T>(guard: Guard<T>, shutdown: watch::Receiver<bool>) -> JoinHandle<()>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    tokio::spawn(async move { guard.run(shutdown).await })
}

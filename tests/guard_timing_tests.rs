//! Integration Tests for the Guard Engine
//!
//! Runs the engine against the real clock and the background sweep loop.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use deadline_guard::guard::codec;
use deadline_guard::{spawn_sweep_task, Guard, GuardConfig, MemoryStorage, Storage};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Reservation {
    id: String,
    seat: u32,
}

fn reservation(id: &str, seat: u32) -> Reservation {
    Reservation {
        id: id.to_string(),
        seat,
    }
}

fn build_guard(
    interval: Duration,
    storage: Arc<dyn Storage>,
) -> (Guard<Reservation>, Arc<Mutex<Vec<Reservation>>>) {
    let fired = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&fired);
    let guard = Guard::new(
        GuardConfig::new()
            .identity_check(|id, r: &Reservation| r.id == id)
            .on_expire(move |r| sink.lock().unwrap().push(r))
            .sweep_interval(interval)
            .storage(storage),
    )
    .unwrap();
    (guard, fired)
}

#[tokio::test]
async fn test_expiry_fires_exactly_once() {
    let (guard, fired) = build_guard(Duration::from_millis(10), Arc::new(MemoryStorage::new()));
    let (tx, rx) = watch::channel(false);
    let handle = spawn_sweep_task(guard.clone(), rx);

    guard
        .arm(reservation("r1", 4), Some(Duration::from_millis(50)))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(*fired.lock().unwrap(), vec![reservation("r1", 4)]);
    assert!(guard.snapshot().await.unwrap().is_empty());

    tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_batch_expiry() {
    let (guard, fired) = build_guard(Duration::from_millis(100), Arc::new(MemoryStorage::new()));
    let (tx, rx) = watch::channel(false);
    let handle = spawn_sweep_task(guard.clone(), rx);

    for seat in 0..8 {
        guard
            .arm(
                reservation(&format!("r{}", seat), seat),
                Some(Duration::from_millis(200)),
            )
            .await
            .unwrap();
    }

    tokio::time::sleep(Duration::from_millis(450)).await;

    let mut seats: Vec<u32> = fired.lock().unwrap().iter().map(|r| r.seat).collect();
    seats.sort_unstable();
    assert_eq!(seats, (0..8).collect::<Vec<_>>());
    assert!(guard.snapshot().await.unwrap().is_empty());
    assert_eq!(guard.stats().await.fired, 8);

    tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_cancel_before_deadline_wins() {
    let (guard, fired) = build_guard(Duration::from_millis(10), Arc::new(MemoryStorage::new()));
    let (tx, rx) = watch::channel(false);
    let handle = spawn_sweep_task(guard.clone(), rx);

    guard
        .arm(reservation("r1", 1), Some(Duration::from_millis(100)))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(guard.disarm("r1").await.unwrap());

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(fired.lock().unwrap().is_empty());
    assert!(guard.snapshot().await.unwrap().is_empty());

    tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_collection_survives_engine_restart() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

    let (first, _) = build_guard(Duration::from_millis(10), Arc::clone(&storage));
    first
        .arm(reservation("r1", 9), Some(Duration::from_millis(60)))
        .await
        .unwrap();
    first
        .arm(reservation("r2", 10), Some(Duration::from_secs(3600)))
        .await
        .unwrap();
    drop(first);

    // A new engine over the same store picks the items up
    let (second, fired) = build_guard(Duration::from_millis(10), Arc::clone(&storage));
    assert_eq!(second.snapshot().await.unwrap().len(), 2);

    let (tx, rx) = watch::channel(false);
    let handle = spawn_sweep_task(second.clone(), rx);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(*fired.lock().unwrap(), vec![reservation("r1", 9)]);
    assert!(second.disarm("r2").await.unwrap());

    tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_stored_blob_is_decodable_collection() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let (guard, _) = build_guard(Duration::from_secs(60), Arc::clone(&storage));

    guard.arm(reservation("r1", 3), None).await.unwrap();

    let blob = storage
        .get(deadline_guard::guard::DEFAULT_STORAGE_KEY)
        .await
        .unwrap();
    let items: Vec<deadline_guard::TrackedItem<Reservation>> = codec::decode(&blob).unwrap();
    assert_eq!(items, guard.snapshot().await.unwrap());
    assert_eq!(items[0].payload, reservation("r1", 3));
}

#[tokio::test]
async fn test_concurrent_arm_and_sweep_lose_nothing() {
    let (guard, fired) = build_guard(Duration::from_millis(5), Arc::new(MemoryStorage::new()));
    let (tx, rx) = watch::channel(false);
    let handle = spawn_sweep_task(guard.clone(), rx);

    let mut tasks = Vec::new();
    for worker in 0..4u32 {
        let guard = guard.clone();
        tasks.push(tokio::spawn(async move {
            for n in 0..25u32 {
                let seat = worker * 100 + n;
                let ttl = if n % 2 == 0 { 1 } else { 3_600_000 };
                guard
                    .arm(
                        reservation(&seat.to_string(), seat),
                        Some(Duration::from_millis(ttl)),
                    )
                    .await
                    .unwrap();
                tokio::task::yield_now().await;
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    tokio::time::sleep(Duration::from_millis(100)).await;

    let fired = fired.lock().unwrap().len();
    let pending = guard.snapshot().await.unwrap().len();
    assert_eq!(fired, 50);
    assert_eq!(pending, 50);

    tx.send(true).unwrap();
    handle.await.unwrap();
}

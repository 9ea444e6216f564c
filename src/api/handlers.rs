//! API Handlers
//!
//! HTTP request handlers for each guard server endpoint.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::warn;

use crate::config::Config;
use crate::error::{GuardError, Result};
use crate::guard::{Guard, GuardConfig};
use crate::models::{
    ArmRequest, ArmResponse, DisarmResponse, HealthResponse, ItemsResponse, PendingItem,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// The guard is internally synchronized, so handlers share it by clone.
#[derive(Clone)]
pub struct AppState {
    pub guard: Guard<PendingItem>,
}

impl AppState {
    /// Creates a new AppState around an existing guard.
    pub fn new(guard: Guard<PendingItem>) -> Self {
        Self { guard }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Expired items are reported through the log.
    pub fn from_config(config: &Config) -> Result<Self> {
        let guard = Guard::new(
            config.apply(
                GuardConfig::new()
                    .identity_check(PendingItem::matches)
                    .on_expire(|item: PendingItem| {
                        warn!(id = %item.id, data = %item.data, "Pending item expired");
                    }),
            ),
        )?;
        Ok(Self::new(guard))
    }
}

/// Handler for PUT /arm
///
/// Arms an item with optional TTL in seconds.
pub async fn arm_handler(
    State(state): State<AppState>,
    Json(req): Json<ArmRequest>,
) -> Result<Json<ArmResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(GuardError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.map(Duration::from_secs);
    state
        .guard
        .arm(PendingItem::new(req.id.clone(), req.data), ttl)
        .await?;

    Ok(Json(ArmResponse::new(req.id)))
}

/// Handler for DELETE /disarm/:id
///
/// Disarms the first pending item with the given id. Unknown ids succeed
/// with `disarmed: false`.
pub async fn disarm_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DisarmResponse>> {
    let disarmed = state.guard.disarm(&id).await?;

    Ok(Json(DisarmResponse::new(id, disarmed)))
}

/// Handler for GET /items
///
/// Lists pending items with their remaining time.
pub async fn items_handler(State(state): State<AppState>) -> Result<Json<ItemsResponse>> {
    let items = state.guard.snapshot().await?;

    Ok(Json(ItemsResponse::from_snapshot(
        items,
        state.guard.now_ms(),
    )))
}

/// Handler for GET /stats
///
/// Returns guard statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let pending = state.guard.snapshot().await?.len();
    let stats = state.guard.stats().await;

    Ok(Json(StatsResponse::new(stats, pending)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

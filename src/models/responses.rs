//! Response DTOs for the guard server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::guard::{GuardStats, TrackedItem};
use crate::models::PendingItem;

/// Response body for the ARM operation (PUT /arm)
#[derive(Debug, Clone, Serialize)]
pub struct ArmResponse {
    /// Success message
    pub message: String,
    /// The id that was armed
    pub id: String,
}

impl ArmResponse {
    /// Creates a new ArmResponse
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Item '{}' armed successfully", id),
            id,
        }
    }
}

/// Response body for the DISARM operation (DELETE /disarm/:id)
#[derive(Debug, Clone, Serialize)]
pub struct DisarmResponse {
    /// Outcome message
    pub message: String,
    /// The id that was requested
    pub id: String,
    /// Whether a pending item was removed
    pub disarmed: bool,
}

impl DisarmResponse {
    /// Creates a new DisarmResponse
    pub fn new(id: impl Into<String>, disarmed: bool) -> Self {
        let id = id.into();
        let message = if disarmed {
            format!("Item '{}' disarmed successfully", id)
        } else {
            format!("No pending item for '{}'", id)
        };
        Self {
            message,
            id,
            disarmed,
        }
    }
}

/// One pending item as shown by GET /items
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: String,
    pub data: serde_json::Value,
    /// Deadline in Unix milliseconds
    pub expire_at: u64,
    /// Milliseconds left before the deadline
    pub remaining_ms: u64,
}

/// Response body for the items endpoint (GET /items)
#[derive(Debug, Clone, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<ItemView>,
    pub total: usize,
}

impl ItemsResponse {
    /// Builds the listing from a guard snapshot taken at `now_ms`
    pub fn from_snapshot(items: Vec<TrackedItem<PendingItem>>, now_ms: u64) -> Self {
        let items: Vec<ItemView> = items
            .into_iter()
            .map(|item| ItemView {
                remaining_ms: item.remaining_ms(now_ms),
                expire_at: item.expire_at,
                id: item.payload.id,
                data: item.payload.data,
            })
            .collect();
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of items armed
    pub armed: u64,
    /// Number of items disarmed before firing
    pub disarmed: u64,
    /// Number of items fired
    pub fired: u64,
    /// Number of expiry callbacks that panicked
    pub callback_failures: u64,
    /// Number of sweeps hit by a storage failure
    pub sweep_failures: u64,
    /// Items that were disarmed or fired
    pub settled: u64,
    /// Items currently waiting for their deadline
    pub pending: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from guard statistics
    pub fn new(stats: GuardStats, pending: usize) -> Self {
        Self {
            settled: stats.settled(),
            armed: stats.armed,
            disarmed: stats.disarmed,
            fired: stats.fired,
            callback_failures: stats.callback_failures,
            sweep_failures: stats.sweep_failures,
            pending,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

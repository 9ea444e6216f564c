//! Request and Response models for the guard server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, plus the
//! payload type the server guards.

pub mod pending;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use pending::PendingItem;
pub use requests::ArmRequest;
pub use responses::{
    ArmResponse, DisarmResponse, ErrorResponse, HealthResponse, ItemView, ItemsResponse,
    StatsResponse,
};

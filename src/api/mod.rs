//! API Module
//!
//! HTTP handlers and routing for the guard server REST API.
//!
//! # Endpoints
//! - `PUT /arm` - Arm an item with a deadline
//! - `DELETE /disarm/:id` - Disarm a pending item
//! - `GET /items` - List pending items
//! - `GET /stats` - Get guard statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

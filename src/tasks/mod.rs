//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Sweep: fires armed items whose deadline has passed

mod sweeper;

pub use sweeper::spawn_sweep_task;

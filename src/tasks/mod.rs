//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Reclaim: Removes expired entries at configured intervals (opt-in)

mod cleanup;

pub use cleanup::spawn_reclaim_task;

//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Age Cleanup: Removes items older than the configured age at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;

//! Bounded Cache - A size-bounded, persistent key-value cache server
//!
//! Stores arbitrary JSON values under string keys, refuses new keys once the
//! configured capacity is reached, and removes items past a given age on demand.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheManager, CacheStats, SetOutcome};
pub use config::Config;
pub use error::{CacheError, StoreError};
pub use tasks::spawn_cleanup_task;

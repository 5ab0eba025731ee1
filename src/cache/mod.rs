//! Cache Module
//!
//! Size-bounded cache management over a durable item store.

mod manager;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use manager::{CacheManager, SetOutcome, DEFAULT_CLEANUP_MAX_AGE_MINUTES, DEFAULT_MAX_SIZE};
pub use stats::CacheStats;

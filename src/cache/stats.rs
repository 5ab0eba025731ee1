//! Cache Statistics Module
//!
//! Point-in-time view of the item set: count, timestamp range and capacity.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of items currently stored
    pub total_items: usize,
    /// Timestamp of the least recently written item
    pub oldest_item_timestamp: Option<DateTime<Utc>>,
    /// Timestamp of the most recently written item
    pub newest_item_timestamp: Option<DateTime<Utc>>,
    /// Configured capacity
    pub max_size: usize,
    /// Items that can still be admitted, never negative
    pub remaining_space: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Builds stats, deriving `remaining_space` from the count and capacity.
    pub fn new(
        total_items: usize,
        oldest_item_timestamp: Option<DateTime<Utc>>,
        newest_item_timestamp: Option<DateTime<Utc>>,
        max_size: usize,
    ) -> Self {
        Self {
            total_items,
            oldest_item_timestamp,
            newest_item_timestamp,
            max_size,
            remaining_space: max_size.saturating_sub(total_items),
        }
    }

    // == Is Full ==
    /// True when no new key can be admitted.
    pub fn is_full(&self) -> bool {
        self.remaining_space == 0
    }
}

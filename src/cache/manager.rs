//! Cache Manager Module
//!
//! Applies admission control, validation and age-based cleanup on top of an
//! [`ItemStore`]. The store is the single source of truth; the manager only
//! carries the configured capacity.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::CacheStats;
use crate::error::{CacheError, Result, StoreError};
use crate::store::{Extreme, ItemRecord, ItemStore, MemoryStore};

/// Age used by cleanup when the caller gives none.
pub const DEFAULT_CLEANUP_MAX_AGE_MINUTES: f64 = 60.0;

/// Capacity used when none is configured.
pub const DEFAULT_MAX_SIZE: usize = 10;

/// Result of a successful `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key was new and passed the admission gate
    Created,
    /// The key existed; value and timestamp were replaced
    Updated,
}

// == Cache Manager ==
/// Size-bounded cache over a shared item store.
///
/// Cloning is cheap and every clone talks to the same store. Mutations hold
/// the store's write lock from the admission check through the write, so
/// concurrent `set` calls cannot push the item count past `max_size`.
#[derive(Debug, Clone)]
pub struct CacheManager {
    store: Arc<RwLock<dyn ItemStore>>,
    max_size: usize,
}

impl CacheManager {
    // == Constructor ==
    /// Creates a manager over `store` admitting at most `max_size` keys.
    pub fn new<S: ItemStore + 'static>(store: S, max_size: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            max_size,
        }
    }

    /// Creates a manager over a fresh [`MemoryStore`].
    pub fn in_memory(max_size: usize) -> Self {
        Self::new(MemoryStore::new(), max_size)
    }

    /// The configured capacity.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    // == Set ==
    /// Stores `value` under `key`, creating or replacing the record.
    ///
    /// A `None` value is rejected; `Some(Value::Null)` is a real value.
    /// New keys are refused with [`CacheError::CapacityExceeded`] once the
    /// store holds `max_size` items. Updates to existing keys always pass.
    pub async fn set(&self, key: &str, value: impl Into<Option<Value>>) -> Result<SetOutcome> {
        validate_key(key)?;
        let value = value
            .into()
            .ok_or_else(|| CacheError::Validation("Value is required".to_string()))?;
        let encoded = encode_value(&value).map_err(CacheError::operation("set"))?;

        let mut store = self.store.write().await;

        let exists = store.exists(key).map_err(CacheError::operation("set"))?;
        if !exists {
            let count = store.count().map_err(CacheError::operation("set"))?;
            if count >= self.max_size {
                warn!(key, count, max_size = self.max_size, "Admission denied, cache is full");
                return Err(CacheError::CapacityExceeded {
                    max_size: self.max_size,
                });
            }
        }

        store
            .upsert(ItemRecord::new(key, encoded, Utc::now()))
            .map_err(CacheError::operation("set"))?;

        let outcome = if exists {
            SetOutcome::Updated
        } else {
            SetOutcome::Created
        };
        debug!(key, ?outcome, "Stored cache item");
        Ok(outcome)
    }

    // == Get ==
    /// Returns the value stored under `key`, or `None` if there is none.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;

        let record = {
            let store = self.store.read().await;
            store.find_by_key(key).map_err(CacheError::operation("get"))?
        };

        record
            .map(|record| decode_value(&record.value))
            .transpose()
            .map_err(CacheError::operation("get"))
    }

    // == Delete ==
    /// Removes `key`. Returns whether a record was actually removed.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;

        let mut store = self.store.write().await;
        let removed = store
            .delete_by_key(key)
            .map_err(CacheError::operation("delete"))?;

        if removed > 0 {
            debug!(key, "Deleted cache item");
        }
        Ok(removed > 0)
    }

    // == Has ==
    /// Whether an item exists for `key`. The stored value is not decoded.
    pub async fn has(&self, key: &str) -> Result<bool> {
        validate_key(key)?;

        let store = self.store.read().await;
        store.exists(key).map_err(CacheError::operation("has"))
    }

    // == Size ==
    /// Number of items currently stored.
    pub async fn size(&self) -> Result<usize> {
        let store = self.store.read().await;
        store.count().map_err(CacheError::operation("size"))
    }

    // == Clear ==
    /// Removes every item. Clearing an empty cache is a no-op.
    pub async fn clear(&self) -> Result<()> {
        let mut store = self.store.write().await;
        store.delete_all().map_err(CacheError::operation("clear"))?;
        info!("Cache cleared");
        Ok(())
    }

    // == Cleanup Old Entries ==
    /// Removes every item last written more than `max_age_minutes` ago.
    ///
    /// Items stamped exactly at the cutoff are kept. Returns the number of
    /// items removed.
    pub async fn cleanup_old_entries(&self, max_age_minutes: f64) -> Result<usize> {
        let cutoff = max_age(max_age_minutes)?.and_then(|age| Utc::now().checked_sub_signed(age));

        // A cutoff before the representable range cannot match anything.
        let Some(cutoff) = cutoff else {
            debug!(max_age_minutes, "Cleanup age exceeds timestamp range, nothing to remove");
            return Ok(0);
        };

        let mut store = self.store.write().await;
        let removed = store
            .delete_older_than(cutoff)
            .map_err(CacheError::operation("cleanup"))?;

        debug!(removed, max_age_minutes, "Cleaned up old cache entries");
        Ok(removed)
    }

    // == Stats ==
    /// Snapshot of item count, timestamp range and remaining capacity.
    pub async fn stats(&self) -> Result<CacheStats> {
        let store = self.store.read().await;
        let op = CacheError::operation;

        let total_items = store.count().map_err(op("stats"))?;
        let oldest = store.find_extreme(Extreme::Oldest).map_err(op("stats"))?;
        let newest = store.find_extreme(Extreme::Newest).map_err(op("stats"))?;

        Ok(CacheStats::new(
            total_items,
            oldest.map(|r| r.timestamp),
            newest.map(|r| r.timestamp),
            self.max_size,
        ))
    }
}

// == Validation Helpers ==
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::Validation(
            "Key must be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

/// Converts a positive, finite number of minutes into a chrono duration.
///
/// Returns `Ok(None)` when the age is too large to represent; such an age
/// reaches back before any stored timestamp.
fn max_age(max_age_minutes: f64) -> Result<Option<chrono::Duration>> {
    if !max_age_minutes.is_finite() || max_age_minutes <= 0.0 {
        return Err(CacheError::Validation(format!(
            "maxAgeMinutes must be a positive number, got {}",
            max_age_minutes
        )));
    }

    Ok(std::time::Duration::try_from_secs_f64(max_age_minutes * 60.0)
        .ok()
        .and_then(|d| chrono::Duration::from_std(d).ok()))
}

// == Value Codec ==
fn encode_value(value: &Value) -> std::result::Result<String, StoreError> {
    Ok(serde_json::to_string(value)?)
}

fn decode_value(text: &str) -> std::result::Result<Value, StoreError> {
    Ok(serde_json::from_str(text)?)
}

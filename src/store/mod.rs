//! Item Store Module
//!
//! Durable storage contract for cache items plus the in-memory and
//! file-backed implementations.

mod file;
mod memory;

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use file::FileStore;
pub use memory::MemoryStore;

// == Item Record ==
/// A single persisted cache item.
///
/// `value` holds the serialized JSON text; the store never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Primary key
    pub key: String,
    /// Serialized value
    pub value: String,
    /// Time of the last write
    pub timestamp: DateTime<Utc>,
}

impl ItemRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            timestamp,
        }
    }
}

/// Which end of the timestamp ordering to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Oldest,
    Newest,
}

// == Item Store Trait ==
/// Storage backend consulted by the cache manager.
///
/// Implementations hold no policy: capacity and validation live in the
/// manager. Mutations must either apply fully or leave the store untouched.
pub trait ItemStore: Send + Sync + Debug {
    /// Number of records currently stored.
    fn count(&self) -> Result<usize, StoreError>;

    /// Whether a record exists for `key`, without reading its value.
    fn exists(&self, key: &str) -> Result<bool, StoreError>;

    fn find_by_key(&self, key: &str) -> Result<Option<ItemRecord>, StoreError>;

    /// Inserts the record or replaces the one with the same key.
    fn upsert(&mut self, record: ItemRecord) -> Result<(), StoreError>;

    /// Returns the number of records removed (0 or 1).
    fn delete_by_key(&mut self, key: &str) -> Result<usize, StoreError>;

    fn delete_all(&mut self) -> Result<(), StoreError>;

    /// Removes every record with `timestamp < cutoff`, returning how many.
    fn delete_older_than(&mut self, cutoff: DateTime<Utc>) -> Result<usize, StoreError>;

    /// Record with the minimum or maximum timestamp, if any.
    fn find_extreme(&self, extreme: Extreme) -> Result<Option<ItemRecord>, StoreError>;
}

/// Picks the record at the requested end of the timestamp ordering.
pub(crate) fn pick_extreme<'a>(
    records: impl Iterator<Item = &'a ItemRecord>,
    extreme: Extreme,
) -> Option<ItemRecord> {
    let picked = match extreme {
        Extreme::Oldest => records.min_by_key(|r| r.timestamp),
        Extreme::Newest => records.max_by_key(|r| r.timestamp),
    };
    picked.cloned()
}

//! In-memory item store backed by a HashMap.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{pick_extreme, Extreme, ItemRecord, ItemStore};
use crate::error::StoreError;

// == Memory Store ==
/// Non-durable store, used for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, ItemRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for MemoryStore {
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.items.len())
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.items.contains_key(key))
    }

    fn find_by_key(&self, key: &str) -> Result<Option<ItemRecord>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn upsert(&mut self, record: ItemRecord) -> Result<(), StoreError> {
        self.items.insert(record.key.clone(), record);
        Ok(())
    }

    fn delete_by_key(&mut self, key: &str) -> Result<usize, StoreError> {
        Ok(usize::from(self.items.remove(key).is_some()))
    }

    fn delete_all(&mut self) -> Result<(), StoreError> {
        self.items.clear();
        Ok(())
    }

    fn delete_older_than(&mut self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let before = self.items.len();
        self.items.retain(|_, record| record.timestamp >= cutoff);
        Ok(before - self.items.len())
    }

    fn find_extreme(&self, extreme: Extreme) -> Result<Option<ItemRecord>, StoreError> {
        Ok(pick_extreme(self.items.values(), extreme))
    }
}

//! File-backed item store
//!
//! Keeps the working set in memory and persists a full JSON snapshot on
//! every mutation. The snapshot is written to a sibling temp file, flushed to
//! disk and then renamed over the target, so the file never holds a
//! half-written state, even after a crash.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{pick_extreme, Extreme, ItemRecord, ItemStore};
use crate::error::StoreError;

/// On-disk layout of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    items: Vec<ItemRecord>,
}

// == File Store ==
/// Durable store persisted as a JSON snapshot file.
#[derive(Debug)]
pub struct FileStore {
    /// Location of the snapshot file
    path: PathBuf,
    /// Current records, mirrors the file contents
    items: HashMap<String, ItemRecord>,
}

impl FileStore {
    // == Constructor ==
    /// Opens the store at `path`, loading any existing snapshot.
    ///
    /// A missing or empty file yields an empty store. A file that cannot be
    /// parsed is reported as [`StoreError::Corrupt`] rather than discarded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let items = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => HashMap::new(),
            Ok(content) => {
                let snapshot: Snapshot =
                    serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    })?;
                snapshot
                    .items
                    .into_iter()
                    .map(|record| (record.key.clone(), record))
                    .collect()
            }
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        info!("Opened file store at {} with {} items", path.display(), items.len());
        Ok(Self { path, items })
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Commit ==
    /// Persists `next` and, only once that succeeded, makes it current.
    fn commit(&mut self, next: HashMap<String, ItemRecord>) -> Result<(), StoreError> {
        self.persist(&next)?;
        self.items = next;
        Ok(())
    }

    fn persist(&self, items: &HashMap<String, ItemRecord>) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut records: Vec<ItemRecord> = items.values().cloned().collect();
        records.sort_by(|a, b| a.key.cmp(&b.key));
        let json = serde_json::to_string_pretty(&Snapshot { items: records })?;

        let tmp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        // Data must be on disk before the rename makes it visible.
        file.sync_all().map_err(io_err)?;
        drop(file);
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        debug!("Persisted {} items to {}", items.len(), self.path.display());
        Ok(())
    }
}

impl ItemStore for FileStore {
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
        let mut next = self.items.clone();
        next.insert(record.key.clone(), record);
        self.commit(next)
    }

    fn delete_by_key(&mut self, key: &str) -> Result<usize, StoreError> {
        if !self.items.contains_key(key) {
            return Ok(0);
        }
        let mut next = self.items.clone();
        next.remove(key);
        self.commit(next)?;
        Ok(1)
    }

    fn delete_all(&mut self) -> Result<(), StoreError> {
        if self.items.is_empty() {
            return Ok(());
        }
        self.commit(HashMap::new())
    }

    fn delete_older_than(&mut self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let next: HashMap<String, ItemRecord> = self
            .items
            .iter()
            .filter(|(_, record)| record.timestamp >= cutoff)
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect();

        let removed = self.items.len() - next.len();
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    fn find_extreme(&self, extreme: Extreme) -> Result<Option<ItemRecord>, StoreError> {
        Ok(pick_extreme(self.items.values(), extreme))
    }
}

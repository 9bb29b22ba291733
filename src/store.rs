//! Persistent store for style records.

use crate::error::{Result, StyleError};
use crate::types::{ListFilter, StyleDraft, StyleId, StyleRecord, StyleStatus, Timestamp};
use fs2::FileExt;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Magic bytes for the store manifest.
const STORE_MAGIC: &[u8; 4] = b"BST\0";

/// Current store format version.
const STORE_VERSION: u8 = 1;

/// Magic bytes for the style index file.
const INDEX_MAGIC: &[u8; 4] = b"BSI\0";

/// Current index format version.
const INDEX_VERSION: u8 = 1;

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Base path for the store.
    pub path: PathBuf,

    /// Whether to create the store if it doesn't exist.
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./styles"),
            create_if_missing: true,
        }
    }
}

/// In-memory style index.
#[derive(Debug, Default)]
struct StyleIndex {
    /// All records by id.
    styles: HashMap<StyleId, StyleRecord>,

    /// Next record id to assign.
    next_id: u64,
}

/// On-disk form of the index. Records are stored as a flat list so the
/// payload stays a plain JSON document.
#[derive(Serialize, Deserialize)]
struct IndexSnapshot {
    next_id: u64,
    styles: Vec<StyleRecord>,
}

/// Persistent store owning all style records.
///
/// One process owns a store at a time (exclusive file lock); within the
/// process an RwLock serializes writers. Every save is a complete
/// recomputation of the submitted fields, so concurrent saves degrade to
/// last-write-wins.
pub struct StyleStore {
    /// Store configuration.
    config: StoreConfig,

    /// Lock file for exclusive access.
    _lock_file: File,

    /// In-memory index.
    index: RwLock<StyleIndex>,
}

impl StyleStore {
    /// Open an existing store or create a new one.
    pub fn open_or_create(config: StoreConfig) -> Result<Self> {
        if config.path.exists() {
            Self::open(config)
        } else if config.create_if_missing {
            Self::create(config)
        } else {
            Err(StyleError::NotInitialized)
        }
    }

    /// Create a new store.
    pub fn create(config: StoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.path)?;

        Self::write_manifest(&config.path)?;
        let lock_file = Self::acquire_lock(&config.path)?;

        let store = Self {
            config,
            _lock_file: lock_file,
            index: RwLock::new(StyleIndex {
                styles: HashMap::new(),
                next_id: 1,
            }),
        };

        store.save()?;
        debug!(path = %store.config.path.display(), "created style store");
        Ok(store)
    }

    /// Open an existing store.
    pub fn open(config: StoreConfig) -> Result<Self> {
        Self::verify_manifest(&config.path)?;
        let lock_file = Self::acquire_lock(&config.path)?;

        let store = Self {
            config,
            _lock_file: lock_file,
            index: RwLock::new(StyleIndex::default()),
        };

        store.load_from_file()?;
        debug!(
            path = %store.config.path.display(),
            records = store.count(),
            "opened style store"
        );
        Ok(store)
    }

    // --- Record Operations ---

    /// Add a new record from a draft, assigning its id and timestamps.
    pub fn add(&self, draft: StyleDraft) -> StyleRecord {
        let mut index = self.index.write();

        let id = StyleId(index.next_id);
        index.next_id += 1;

        let now = Timestamp::now();
        let record = StyleRecord {
            id,
            status: draft.status,
            title: draft.title,
            explicit_slug: draft.explicit_slug,
            style_name: draft.style_name,
            block: draft.block,
            css: draft.css,
            resolved_slug: String::new(),
            created: now,
            modified: now,
        };

        index.styles.insert(id, record.clone());
        debug!(%id, "added style record");
        record
    }

    /// Get a record by id.
    pub fn get(&self, id: StyleId) -> Option<StyleRecord> {
        self.index.read().styles.get(&id).cloned()
    }

    /// Update a record in place, refreshing its modified timestamp.
    pub fn update(
        &self,
        id: StyleId,
        mutate: impl FnOnce(&mut StyleRecord),
    ) -> Result<StyleRecord> {
        let mut index = self.index.write();
        let record = index
            .styles
            .get_mut(&id)
            .ok_or(StyleError::StyleNotFound(id))?;

        mutate(record);
        record.modified = Timestamp::now();
        debug!(%id, "updated style record");
        Ok(record.clone())
    }

    /// List records matching a filter, ordered by id.
    ///
    /// Without an explicit status, trashed records are excluded.
    pub fn list(&self, filter: &ListFilter) -> Vec<StyleRecord> {
        let index = self.index.read();
        let mut records: Vec<StyleRecord> = index
            .styles
            .values()
            .filter(|record| match filter.status {
                Some(status) => record.status == status,
                None => record.status != StyleStatus::Trashed,
            })
            .filter(|record| match &filter.block {
                Some(block) => record.block == *block,
                None => true,
            })
            .cloned()
            .collect();

        records.sort_by_key(|record| record.id);
        records
    }

    /// List all published records.
    pub fn list_published(&self) -> Vec<StyleRecord> {
        self.list(&ListFilter::published())
    }

    /// Distinct block ids assigned to published records.
    pub fn used_blocks(&self) -> Vec<String> {
        let mut blocks: Vec<String> = self
            .list_published()
            .into_iter()
            .map(|record| record.block)
            .filter(|block| !block.is_empty())
            .collect();

        blocks.sort();
        blocks.dedup();
        blocks
    }

    /// Move a record to the trash.
    pub fn trash(&self, id: StyleId) -> Result<StyleRecord> {
        self.update(id, |record| {
            record.status = StyleStatus::Trashed;
        })
    }

    /// Restore a trashed record as a draft.
    pub fn restore(&self, id: StyleId) -> Result<StyleRecord> {
        self.update(id, |record| {
            if record.status == StyleStatus::Trashed {
                record.status = StyleStatus::Draft;
            }
        })
    }

    /// Permanently delete a record.
    pub fn delete_permanently(&self, id: StyleId) -> Result<StyleRecord> {
        let mut index = self.index.write();
        let record = index
            .styles
            .remove(&id)
            .ok_or(StyleError::StyleNotFound(id))?;

        debug!(%id, "permanently deleted style record");
        Ok(record)
    }

    /// Number of records, trash included.
    pub fn count(&self) -> usize {
        self.index.read().styles.len()
    }

    /// Get the store path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    // --- Persistence ---

    /// Sync the index to disk.
    pub fn save(&self) -> Result<()> {
        let index = self.index.read();
        let mut styles: Vec<StyleRecord> = index.styles.values().cloned().collect();
        styles.sort_by_key(|record| record.id);

        let snapshot = IndexSnapshot {
            next_id: index.next_id,
            styles,
        };
        let encoded = serde_json::to_vec(&snapshot)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.index_path())?;

        file.write_all(INDEX_MAGIC)?;
        file.write_all(&[INDEX_VERSION])?;
        file.write_all(&(encoded.len() as u64).to_le_bytes())?;
        file.write_all(&encoded)?;
        file.sync_all()?;

        Ok(())
    }

    /// Load the index from disk.
    fn load_from_file(&self) -> Result<()> {
        let mut file = File::open(self.index_path())?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != INDEX_MAGIC {
            return Err(StyleError::InvalidFormat("Invalid index magic".into()));
        }

        let mut version = [0u8; 1];
        file.read_exact(&mut version)?;
        if version[0] != INDEX_VERSION {
            return Err(StyleError::InvalidFormat(format!(
                "Unsupported index version: {}",
                version[0]
            )));
        }

        let mut len_bytes = [0u8; 8];
        file.read_exact(&mut len_bytes)?;
        let len = u64::from_le_bytes(len_bytes) as usize;

        let mut encoded = vec![0u8; len];
        file.read_exact(&mut encoded)?;

        let snapshot: IndexSnapshot = serde_json::from_slice(&encoded)
            .map_err(|e| StyleError::Deserialization(e.to_string()))?;

        let mut index = self.index.write();
        index.next_id = snapshot.next_id;
        index.styles = snapshot
            .styles
            .into_iter()
            .map(|record| (record.id, record))
            .collect();

        Ok(())
    }

    fn index_path(&self) -> PathBuf {
        self.config.path.join("styles.bin")
    }

    fn write_manifest(path: &Path) -> Result<()> {
        let manifest_path = path.join("MANIFEST");
        let mut file = File::create(manifest_path)?;

        file.write_all(STORE_MAGIC)?;
        file.write_all(&[STORE_VERSION])?;
        file.sync_all()?;

        Ok(())
    }

    fn verify_manifest(path: &Path) -> Result<()> {
        let manifest_path = path.join("MANIFEST");
        let mut file = File::open(manifest_path)?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != STORE_MAGIC {
            return Err(StyleError::InvalidFormat("Invalid store magic".into()));
        }

        let mut version = [0u8; 1];
        file.read_exact(&mut version)?;
        if version[0] != STORE_VERSION {
            return Err(StyleError::InvalidFormat(format!(
                "Unsupported store version: {}",
                version[0]
            )));
        }

        Ok(())
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_path = path.join("LOCK");
        let lock_file = File::create(lock_path)?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| StyleError::Locked)?;

        Ok(lock_file)
    }
}

impl Drop for StyleStore {
    fn drop(&mut self) {
        // Best-effort sync on drop
        let _ = self.save();
    }
}

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Named JSON slots on disk, one file per key.
///
/// A slot that is missing or cannot be parsed loads as an empty list. Writes
/// go to a temp file first and are renamed into place, so a reader never
/// sees a partially written list.
#[derive(Debug, Clone)]
pub struct ListStore {
    dir: PathBuf,
}

impl ListStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.slot_path(key).exists()
    }

    pub fn load<T>(&self, key: &str) -> Vec<T>
    where
        T: DeserializeOwned,
    {
        let path = self.slot_path(key);

        if !path.exists() {
            debug!("Store miss: {} (file does not exist)", key);
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read store slot {}: {}", key, e);
                return Vec::new();
            }
        };

        // `null` is what an undefined list serializes to
        match serde_json::from_str::<Option<Vec<T>>>(&content) {
            Ok(items) => {
                let items = items.unwrap_or_default();
                info!("Store hit: {} (loaded {} items)", key, items.len());
                items
            }
            Err(e) => {
                let backup_path = path.with_extension("json.bak");
                warn!(
                    "Store slot {} is corrupt: {}. Moving it to {:?} and starting empty.",
                    key, e, backup_path
                );
                if let Err(mv_err) = std::fs::rename(&path, &backup_path) {
                    warn!("Failed to back up corrupt store slot: {}", mv_err);
                }
                Vec::new()
            }
        }
    }

    pub fn save<T>(&self, key: &str, items: &[T]) -> Result<()>
    where
        T: Serialize,
    {
        let path = self.slot_path(key);
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| anyhow!("Failed to serialize store slot {}: {}", key, e))?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)
            .map_err(|e| anyhow!("Failed to write store slot {}: {}", key, e))?;
        std::fs::rename(&temp_path, &path)
            .map_err(|e| anyhow!("Failed to replace store slot {}: {}", key, e))?;

        debug!("Store saved: {} ({} items)", key, items.len());
        Ok(())
    }
}

/// An in-memory list mirrored to a `ListStore` slot on every mutation.
pub struct PersistentList<T> {
    store: ListStore,
    key: String,
    items: Vec<T>,
}

impl<T> PersistentList<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Read the slot once; later reads come from memory.
    pub fn open(store: ListStore, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = store.load(&key);
        Self { store, key, items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Append and persist. On a failed write the list is left unchanged.
    pub fn push(&mut self, item: T) -> Result<()> {
        self.items.push(item);
        if let Err(e) = self.store.save(&self.key, &self.items) {
            self.items.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Keep only matching items and persist. Returns how many were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let flags: Vec<bool> = self.items.iter().map(|item| keep(item)).collect();
        let removed = flags.iter().filter(|kept| !**kept).count();
        if removed == 0 {
            return Ok(0);
        }

        let kept: Vec<&T> = self
            .items
            .iter()
            .zip(&flags)
            .filter(|(_, kept)| **kept)
            .map(|(item, _)| item)
            .collect();
        self.store.save(&self.key, &kept)?;

        let mut flags = flags.into_iter();
        self.items.retain(|_| flags.next().unwrap_or(false));
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.save::<T>(&self.key, &[])?;
        self.items.clear();
        Ok(())
    }
}

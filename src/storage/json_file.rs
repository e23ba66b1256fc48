//! JSON snapshot store
//!
//! The whole wardrobe lives in one JSON document:
//!
//! ```json
//! { "items": [...], "outfits": [...], "logs": [...] }
//! ```
//!
//! Reads are served from memory. Every append rewrites the file through a
//! sibling temp file and a rename so a crash never leaves half a snapshot.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::{record_wear, StoreError, WardrobeStore};
use crate::types::{ClothingItem, Outfit, OutfitLog};

/// On-disk document layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WardrobeSnapshot {
    #[serde(default)]
    pub items: Vec<ClothingItem>,
    #[serde(default)]
    pub outfits: Vec<Outfit>,
    #[serde(default)]
    pub logs: Vec<OutfitLog>,
}

pub struct JsonFileStore {
    path: PathBuf,
    snapshot: RwLock<WardrobeSnapshot>,
}

impl JsonFileStore {
    /// Open a snapshot file. A missing file is an empty wardrobe; it is
    /// created on the first append.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            tracing::info!(path = %path.display(), "Snapshot not found, starting empty wardrobe");
            WardrobeSnapshot::default()
        };

        tracing::info!(
            path = %path.display(),
            items = snapshot.items.len(),
            outfits = snapshot.outfits.len(),
            logs = snapshot.logs.len(),
            "Wardrobe snapshot loaded"
        );

        Ok(Self {
            path,
            snapshot: RwLock::new(snapshot),
        })
    }

    /// Create (or overwrite) a snapshot file with the given contents.
    pub fn create<P: AsRef<Path>>(path: P, snapshot: WardrobeSnapshot) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        write_snapshot(&path, &snapshot)?;
        Ok(Self {
            path,
            snapshot: RwLock::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, WardrobeSnapshot>, StoreError> {
        self.snapshot
            .read()
            .map_err(|e| StoreError::Storage(e.to_string()))
    }
}

fn write_snapshot(path: &Path, snapshot: &WardrobeSnapshot) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl WardrobeStore for JsonFileStore {
    fn items(&self) -> Result<Vec<ClothingItem>, StoreError> {
        Ok(self.read()?.items.clone())
    }

    fn outfits(&self) -> Result<Vec<Outfit>, StoreError> {
        Ok(self.read()?.outfits.clone())
    }

    fn logs(&self) -> Result<Vec<OutfitLog>, StoreError> {
        Ok(self.read()?.logs.clone())
    }

    fn append_log(&self, log: &OutfitLog) -> Result<(), StoreError> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        // Stage on a copy so a failed write leaves memory and disk in agreement.
        let mut next = guard.clone();
        record_wear(&mut next.outfits, log)?;
        next.logs.push(log.clone());
        write_snapshot(&self.path, &next)?;
        *guard = next;

        tracing::debug!(outfit = %log.outfit_id, date = %log.date, "Wear log appended");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "JsonFile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> WardrobeSnapshot {
        WardrobeSnapshot {
            items: vec![ClothingItem::new("tee", "Tee", "t-shirt")],
            outfits: vec![Outfit::new("o1", "Basic", &["tee"])],
            logs: Vec::new(),
        }
    }

    #[test]
    fn test_missing_file_is_empty_wardrobe() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
        assert!(store.items().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wardrobe.json");
        let store = JsonFileStore::create(&path, sample()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        store.append_log(&OutfitLog::new("l1", "o1", date)).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.logs().unwrap().len(), 1);
        assert_eq!(reopened.outfits().unwrap()[0].wear_count, 1);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_rejected_append_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wardrobe.json");
        let store = JsonFileStore::create(&path, sample()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        assert!(store.append_log(&OutfitLog::new("l1", "ghost", date)).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert!(store.logs().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wardrobe.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Serialization(_))));
    }
}

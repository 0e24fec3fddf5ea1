//! Where prior setting values are parked while a setting is suppressed.
//!
//! The store outlives the process: whatever is still in it at start-up was
//! never restored and is put back by [`SuppressionController::recover`].
//!
//! [`SuppressionController::recover`]: super::SuppressionController::recover

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::SettingValue;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read snapshot store at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse snapshot store at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to write snapshot store at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize snapshots: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The value a setting had before it was first suppressed.
///
/// `value: None` records that the setting was unset, so restoring removes
/// it again instead of writing a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SettingValue>,
}

impl SettingSnapshot {
    pub fn new(value: Option<SettingValue>) -> Self {
        Self { value }
    }
}

/// Key-value storage for snapshots, one per caller-stable key.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Result<Option<SettingSnapshot>, StoreError>;
    fn put(&mut self, key: &str, snapshot: SettingSnapshot) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    fn list_all(&self) -> Result<Vec<(String, SettingSnapshot)>, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: BTreeMap<String, SettingSnapshot>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn get(&self, key: &str) -> Result<Option<SettingSnapshot>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, snapshot: SettingSnapshot) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), snapshot);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<(String, SettingSnapshot)>, StoreError> {
        Ok(self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

/// Snapshots persisted as a TOML table per key, rewritten on every change.
#[derive(Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
    entries: BTreeMap<String, SettingSnapshot>,
}

impl FileSnapshotStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let entries = toml::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let write_error = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = toml::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content).map_err(write_error)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn get(&self, key: &str) -> Result<Option<SettingSnapshot>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, snapshot: SettingSnapshot) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), snapshot);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<(String, SettingSnapshot)>, StoreError> {
        Ok(self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

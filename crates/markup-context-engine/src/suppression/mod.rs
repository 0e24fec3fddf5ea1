//! # Suppression
//!
//! While the cursor sits in element text content, an editor setting (auto
//! closing brackets, typically) is switched to a suppressed value; when the
//! cursor leaves, the original value is put back.
//!
//! The prior value is snapshotted once, on the first disable for a key, and
//! stored in a [`SnapshotStore`] *before* the setting is touched. A crash in
//! between leaves a snapshot behind, which [`SuppressionController::recover`]
//! restores on the next start.
//!
//! Failures from either collaborator never reach the caller: they are logged
//! and the operation reports that nothing changed.

pub mod session;
pub mod store;

use std::collections::BTreeMap;

pub use session::{CursorSession, Transition};
pub use store::{FileSnapshotStore, MemorySnapshotStore, SettingSnapshot, SnapshotStore, StoreError};

/// Values are whatever the settings host stores; TOML values cover strings,
/// booleans, numbers and nested tables.
pub type SettingValue = toml::Value;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Setting '{setting}' is not writable in '{scope}'")]
    ReadOnly { scope: String, setting: String },
    #[error("Settings host unavailable: {0}")]
    Unavailable(String),
}

/// The host's settings, addressed by scope (workspace folder, user profile)
/// and setting name.
pub trait SettingsBackend {
    fn read(&self, scope: &str, setting: &str) -> Result<Option<SettingValue>, SettingsError>;

    /// `None` removes the setting from `scope`.
    fn write(
        &mut self,
        scope: &str,
        setting: &str,
        value: Option<SettingValue>,
    ) -> Result<(), SettingsError>;
}

/// In-process settings, for tests and for callers without a host.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: BTreeMap<(String, String), SettingValue>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, scope: &str, setting: &str) -> Option<&SettingValue> {
        self.values.get(&(scope.to_string(), setting.to_string()))
    }
}

impl SettingsBackend for MemorySettings {
    fn read(&self, scope: &str, setting: &str) -> Result<Option<SettingValue>, SettingsError> {
        Ok(self.get(scope, setting).cloned())
    }

    fn write(
        &mut self,
        scope: &str,
        setting: &str,
        value: Option<SettingValue>,
    ) -> Result<(), SettingsError> {
        let key = (scope.to_string(), setting.to_string());
        match value {
            Some(value) => {
                self.values.insert(key, value);
            }
            None => {
                self.values.remove(&key);
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
enum SuppressionError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Disables one setting per key and restores it from its snapshot.
pub struct SuppressionController<B, S> {
    backend: B,
    store: S,
    setting: String,
    suppressed: SettingValue,
}

impl<B: SettingsBackend, S: SnapshotStore> SuppressionController<B, S> {
    pub fn new(backend: B, store: S, setting: impl Into<String>, suppressed: SettingValue) -> Self {
        Self {
            backend,
            store,
            setting: setting.into(),
            suppressed,
        }
    }

    pub fn setting(&self) -> &str {
        &self.setting
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// A snapshot exists for `key` and the setting holds the suppressed value.
    pub fn is_suppressed(&self, key: &str) -> bool {
        matches!(self.store.get(key), Ok(Some(_)))
            && matches!(self.backend.read(key, &self.setting), Ok(Some(v)) if v == self.suppressed)
    }

    /// Switch the setting to its suppressed value. Returns `false` when it
    /// was already suppressed or the change failed.
    ///
    /// A snapshot left by an earlier failed write is kept and the write is
    /// retried.
    pub fn disable(&mut self, key: &str) -> bool {
        match self.try_disable(key) {
            Ok(changed) => changed,
            Err(err) => {
                log::warn!("Could not suppress '{}' for {key}: {err}", self.setting);
                false
            }
        }
    }

    /// Put back the snapshotted value. Returns `false` when there was no
    /// snapshot or the change failed.
    pub fn restore(&mut self, key: &str) -> bool {
        match self.try_restore(key) {
            Ok(changed) => changed,
            Err(err) => {
                log::warn!("Could not restore '{}' for {key}: {err}", self.setting);
                false
            }
        }
    }

    /// Restore every snapshot left behind by an earlier run.
    /// Returns how many keys were restored.
    pub fn recover(&mut self) -> usize {
        let pending = match self.store.list_all() {
            Ok(pending) => pending,
            Err(err) => {
                log::warn!("Could not list pending snapshots: {err}");
                return 0;
            }
        };
        if !pending.is_empty() {
            log::info!("Recovering {} suppressed setting(s)", pending.len());
        }
        pending
            .iter()
            .filter(|(key, _)| self.restore(key))
            .count()
    }

    fn try_disable(&mut self, key: &str) -> Result<bool, SuppressionError> {
        let current = self.backend.read(key, &self.setting)?;
        if self.store.get(key)?.is_some() {
            if current.as_ref() == Some(&self.suppressed) {
                return Ok(false);
            }
        } else {
            self.store.put(key, SettingSnapshot::new(current))?;
        }
        self.backend
            .write(key, &self.setting, Some(self.suppressed.clone()))?;
        log::debug!("Suppressed '{}' for {key}", self.setting);
        Ok(true)
    }

    fn try_restore(&mut self, key: &str) -> Result<bool, SuppressionError> {
        let Some(snapshot) = self.store.get(key)? else {
            return Ok(false);
        };
        self.backend.write(key, &self.setting, snapshot.value)?;
        self.store.remove(key)?;
        log::debug!("Restored '{}' for {key}", self.setting);
        Ok(true)
    }
}

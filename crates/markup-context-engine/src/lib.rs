pub mod classify;
pub mod io;
pub mod models;
pub mod suppression;

// Re-export key types for easier usage
pub use classify::{
    CachedClassifier, ResultCache, Strategy, classify, classify_language, classify_with,
};
pub use io::*;
pub use models::*;
pub use suppression::{
    CursorSession, FileSnapshotStore, MemorySettings, MemorySnapshotStore, SettingValue,
    SettingsBackend, SnapshotStore, SuppressionController, Transition,
};

//! Configuration schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Resolved recents configuration.
///
/// ```yaml
/// storage_dir: ~/.local/share/recents
/// max_items: 10
/// debounce_ms: 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecentsConfig {
    /// Directory holding one file per history key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Maximum entries kept per history.
    pub max_items: usize,

    /// Quiet period before a debounced save, in milliseconds.
    pub debounce_ms: u64,
}

impl RecentsConfig {
    /// Default entries kept per history.
    pub const DEFAULT_MAX_ITEMS: usize = 10;

    /// Default quiet period in milliseconds.
    pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

    /// Directory where histories are stored.
    ///
    /// Falls back to the platform data directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(default_storage_dir)
    }

    /// Quiet period as a duration.
    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}

impl Default for RecentsConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            max_items: Self::DEFAULT_MAX_ITEMS,
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Get the default storage directory.
pub fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recents")
}

//! # Configuration
//!
//! Dragly keeps a small JSON config next to its data, in `<data dir>/config.json`.
//! A missing file means defaults.
//!
//! ## Data Directory
//!
//! Resolved in priority order:
//! 1. An explicit path from the host (e.g. `--data-dir`).
//! 2. The `DRAGLY_HOME` environment variable.
//! 3. The OS data directory (via `directories`).
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `dragly.items` | Slot that holds the queue |
//! | `legacy_keys` | `["dragly.queueItems"]` | Slots read once when `storage_key` is empty |

use crate::error::{DraglyError, Result};
use crate::store::{DEFAULT_STORAGE_KEY, LEGACY_STORAGE_KEY};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "DRAGLY_HOME";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraglyConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_legacy_keys")]
    pub legacy_keys: Vec<String>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_legacy_keys() -> Vec<String> {
    vec![LEGACY_STORAGE_KEY.to_string()]
}

impl Default for DraglyConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            legacy_keys: default_legacy_keys(),
        }
    }
}

impl DraglyConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DraglyError::Io)?;
        let config: DraglyConfig =
            serde_json::from_str(&content).map_err(DraglyError::Serialization)?;
        Ok(config)
    }

    /// Like [`DraglyConfig::load`], but an unreadable or malformed file only
    /// logs a warning and yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(config_dir: P) -> Self {
        let config_dir = config_dir.as_ref();
        Self::load(config_dir).unwrap_or_else(|e| {
            warn!(
                path = %config_dir.join(CONFIG_FILENAME).display(),
                error = %e,
                "Ignoring unreadable config, using defaults"
            );
            Self::default()
        })
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DraglyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DraglyError::Serialization)?;
        fs::write(config_path, content).map_err(DraglyError::Io)?;
        Ok(())
    }
}

/// Picks the data directory: explicit override, then `DRAGLY_HOME`, then the OS default.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("ly", "drag", "dragly")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DraglyError::Api("Could not determine data directory".to_string()))
}

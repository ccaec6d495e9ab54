//! Engine configuration
//!
//! Where saves go. Defaults match the shipped game; the native binary can
//! override them from a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::STORAGE_KEY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Key of the single save slot
    pub storage_key: String,
    /// Directory for file-backed saves (native only)
    pub save_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            save_dir: PathBuf::from("saves"),
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load config from a JSON file, falling back to defaults if it is
    /// missing or invalid
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default config ({}: {})", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json_str(&json) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

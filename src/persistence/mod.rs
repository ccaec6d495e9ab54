//! Save/load persistence
//!
//! Features:
//! - Versioned JSON save (`codec`)
//! - Pluggable key-value stores (`store`)
//! - A single fixed-key slot that swallows every persistence error into
//!   "no save" plus a log line, so callers never see a failure

pub mod codec;
pub mod store;

pub use codec::{DecodeError, Save, deserialize, serialize};
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;
pub use store::{MemoryStore, SaveStore, StoreError};

use crate::state::{GameState, Stat};

impl Save {
    /// Load this save into `state`
    ///
    /// Stats missing from the save keep their defaults; unknown ones are
    /// dropped. Unlocked nodes are cleared and the current node reset, so
    /// the caller must recompute unlocks afterwards.
    pub fn apply_to(&self, state: &mut GameState) {
        let mut loaded = GameState::new();
        loaded.progress.completed = self.completed.iter().cloned().collect();

        for (name, value) in &self.stats {
            match Stat::from_name(name) {
                Some(stat) => loaded.stats.set(stat, *value),
                None => log::debug!("Dropping unknown stat '{}' from save", name),
            }
        }

        for item in &self.items {
            if !loaded.has_item(item) {
                loaded.inventory.push(item.clone());
            }
        }
        for achievement in &self.achievements {
            if !loaded.has_achievement(achievement) {
                loaded.achievements.push(achievement.clone());
            }
        }

        *state = loaded;
    }
}

/// The one save slot, bound to a fixed key in a store
pub struct SaveSlot<S: SaveStore> {
    store: S,
    key: String,
}

impl<S: SaveStore> SaveSlot<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Whether anything is stored under the key (valid or not)
    pub fn has_save(&self) -> bool {
        matches!(self.store.get(&self.key), Ok(Some(_)))
    }

    /// Read and decode the stored save
    ///
    /// Returns `None` when nothing is stored, the save is from another
    /// version (warned), or it cannot be decoded (error).
    pub fn load(&self) -> Option<Save> {
        let json = match self.store.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No save found");
                return None;
            }
            Err(e) => {
                log::error!("Failed to read save: {}", e);
                return None;
            }
        };

        match deserialize(&json) {
            Ok(save) => {
                log::info!("Loaded save ({} nodes completed)", save.completed.len());
                Some(save)
            }
            Err(e @ DecodeError::VersionMismatch { .. }) => {
                log::warn!("Discarding save: {}", e);
                None
            }
            Err(e @ DecodeError::Malformed(_)) => {
                log::error!("Failed to load save: {}", e);
                None
            }
        }
    }

    /// Encode and write `save`, replacing whatever was stored. Returns
    /// false (and logs) if the store rejected it; the old save is kept.
    pub fn store(&mut self, save: &Save) -> bool {
        let json = match codec::encode(save) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to encode save: {}", e);
                return false;
            }
        };

        match self.store.set(&self.key, &json) {
            Ok(()) => {
                log::info!("Game saved ({} nodes completed)", save.completed.len());
                true
            }
            Err(e) => {
                log::error!("Failed to write save: {}", e);
                false
            }
        }
    }

    /// Remove the stored save
    pub fn clear(&mut self) {
        match self.store.remove(&self.key) {
            Ok(()) => log::info!("Saved game cleared"),
            Err(e) => log::error!("Failed to clear save: {}", e),
        }
    }
}

//! Alter Life - story progress engine
//!
//! Core modules:
//! - `state`: Player state (node progress, stats, inventory, achievements)
//! - `content`: Authored acts, nodes, scenes and choices
//! - `unlock`: Unlock resolution over the node requirement graph
//! - `effects`: Narrative effects applied to player state
//! - `persistence`: Versioned save format and key-value stores
//! - `progress`: Controller tying the above together
//! - `config`: Engine configuration

pub mod config;
pub mod content;
pub mod effects;
pub mod persistence;
pub mod progress;
pub mod state;
pub mod unlock;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::Config;
pub use content::{ActData, Node, Scene};
pub use effects::Effect;
pub use persistence::{DecodeError, Save, SaveSlot, SaveStore, StoreError};
pub use progress::{NodeState, ProgressController};
pub use state::{GameState, Stat, Stats};

/// Engine constants
pub mod consts {
    /// Save format version; anything else is discarded on load
    pub const SAVE_VERSION: u32 = 1;
    /// Default key of the save slot
    pub const STORAGE_KEY: &str = "alter-life-save";

    /// Stat bounds, enforced on every mutation
    pub const STAT_MIN: u8 = 0;
    pub const STAT_MAX: u8 = 100;
}

//! Versioned JSON save format
//!
//! ```json
//! { "version": 1, "completed": [...], "stats": {...}, "items": [...], "achievements": [...] }
//! ```
//!
//! The version is checked before the rest of the document is decoded,
//! so a save from another schema reports a mismatch rather than a parse
//! failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SAVE_VERSION;
use crate::state::{AchievementId, GameState, ItemId, NodeId};

/// Why a stored save could not be used
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed save: {0}")]
    Malformed(String),
    #[error("save version {found} does not match supported version {expected}")]
    VersionMismatch { found: i64, expected: u32 },
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Malformed(e.to_string())
    }
}

/// Persisted subset of [`GameState`]
///
/// Unlocked nodes and the current node are not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Save {
    pub version: u32,
    pub completed: Vec<NodeId>,
    pub stats: BTreeMap<String, i64>,
    pub items: Vec<ItemId>,
    pub achievements: Vec<AchievementId>,
}

impl Save {
    /// Snapshot the persisted parts of `state` at the current version
    pub fn from_state(state: &GameState) -> Self {
        Self {
            version: SAVE_VERSION,
            completed: state.progress.completed.iter().cloned().collect(),
            stats: state.stats.to_named(),
            items: state.inventory.clone(),
            achievements: state.achievements.clone(),
        }
    }
}

/// Encode the persisted parts of `state`
pub fn serialize(state: &GameState) -> Result<String, serde_json::Error> {
    encode(&Save::from_state(state))
}

pub fn encode(save: &Save) -> Result<String, serde_json::Error> {
    serde_json::to_string(save)
}

/// Parse and validate a stored save
pub fn deserialize(json: &str) -> Result<Save, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let version = value
        .get("version")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| DecodeError::Malformed("missing integer 'version'".into()))?;

    if version != SAVE_VERSION as i64 {
        return Err(DecodeError::VersionMismatch {
            found: version,
            expected: SAVE_VERSION,
        });
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stat;

    fn sample_state() -> GameState {
        let mut state = GameState::new();
        state.progress.completed.insert("intro".into());
        state.progress.completed.insert("clinic".into());
        state.progress.unlocked.insert("night".into());
        state.progress.current_node = Some("night".into());
        state.stats.set(Stat::Patience, 12);
        state.inventory = vec!["thermos".into(), "notebook".into()];
        state.achievements = vec!["early-bird".into()];
        state
    }

    #[test]
    fn test_serialize_omits_derived_fields() {
        let json = serialize(&sample_state()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["items"], serde_json::json!(["thermos", "notebook"]));
        assert_eq!(value["stats"]["patience"], 12);
        assert_eq!(value["stats"]["problemSolving"], 0);
        assert!(value.get("unlocked").is_none());
        assert!(value.get("currentNode").is_none());
        assert!(!json.contains("night"));
    }

    #[test]
    fn test_round_trip() {
        let state = sample_state();
        let save = deserialize(&serialize(&state).unwrap()).unwrap();
        assert_eq!(save, Save::from_state(&state));
    }

    #[test]
    fn test_version_mismatch() {
        let json = r#"{"version":2,"completed":[],"stats":{},"items":[],"achievements":[]}"#;
        assert!(matches!(
            deserialize(json),
            Err(DecodeError::VersionMismatch { found: 2, expected: 1 })
        ));

        // Other schema versions need not match this layout
        assert!(matches!(
            deserialize(r#"{"version":0,"progress":{}}"#),
            Err(DecodeError::VersionMismatch { found: 0, .. })
        ));
    }

    #[test]
    fn test_malformed() {
        for json in [
            "",
            "not json",
            "[]",
            r#"{"completed":[]}"#,
            r#"{"version":"1","completed":[],"stats":{},"items":[],"achievements":[]}"#,
            r#"{"version":1,"completed":"intro","stats":{},"items":[],"achievements":[]}"#,
            r#"{"version":1,"completed":[],"stats":{"health":"high"},"items":[],"achievements":[]}"#,
        ] {
            assert!(
                matches!(deserialize(json), Err(DecodeError::Malformed(_))),
                "expected malformed for {json:?}"
            );
        }
    }
}

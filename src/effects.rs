//! Narrative effects and how they mutate the player state
//!
//! Effects are authored on choices and scene resolutions. Applying one
//! only touches the [`GameState`]; persisting is left to the caller.

use serde::{Deserialize, Serialize};

use crate::state::{GameState, Stat};

/// Change a stat by a signed amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    /// Stat name as authored (e.g. `"empathy"`)
    pub stat: String,
    pub delta: i64,
}

/// A content-authored mutation of player state
///
/// Wire format is externally tagged: `{"grantItem": "notebook"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Effect {
    StatDelta(StatDelta),
    GrantItem(String),
    GrantAchievement(String),
    /// Branching flag; accepted but not tracked by the engine yet
    SetFlag(String),
}

impl Effect {
    pub fn stat_delta(stat: Stat, delta: i64) -> Self {
        Effect::StatDelta(StatDelta {
            stat: stat.name().to_string(),
            delta,
        })
    }

    pub fn grant_item(id: impl Into<String>) -> Self {
        Effect::GrantItem(id.into())
    }

    pub fn grant_achievement(id: impl Into<String>) -> Self {
        Effect::GrantAchievement(id.into())
    }
}

/// Push `id` unless it is already present. Returns true if added.
fn insert_unique(list: &mut Vec<String>, id: &str) -> bool {
    if list.iter().any(|existing| existing == id) {
        return false;
    }
    list.push(id.to_string());
    true
}

/// Apply a single effect to the state
pub fn apply(state: &mut GameState, effect: &Effect) {
    match effect {
        Effect::StatDelta(StatDelta { stat, delta }) => match Stat::from_name(stat) {
            Some(stat) => {
                let value = state.stats.adjust(stat, *delta);
                log::debug!("{} {:+} -> {}", stat.name(), delta, value);
            }
            // Stats are a closed set; unknown names are ignored
            None => log::warn!("Ignoring delta for unknown stat '{}'", stat),
        },
        Effect::GrantItem(id) => {
            if insert_unique(&mut state.inventory, id) {
                log::info!("Item granted: {}", id);
            }
        }
        Effect::GrantAchievement(id) => {
            if insert_unique(&mut state.achievements, id) {
                log::info!("Achievement unlocked: {}", id);
            }
        }
        Effect::SetFlag(name) => {
            log::debug!("Flag '{}' set (not tracked)", name);
        }
    }
}

/// Apply effects in order
pub fn apply_all(state: &mut GameState, effects: &[Effect]) {
    for effect in effects {
        apply(state, effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_delta_clamps_both_ways() {
        let mut state = GameState::new();
        apply(&mut state, &Effect::stat_delta(Stat::Energy, 70));
        apply(&mut state, &Effect::stat_delta(Stat::Energy, 70));
        assert_eq!(state.stats.get(Stat::Energy), 100);

        apply(&mut state, &Effect::stat_delta(Stat::Energy, -250));
        assert_eq!(state.stats.get(Stat::Energy), 0);
    }

    #[test]
    fn test_unknown_stat_is_noop() {
        let mut state = GameState::new();
        let before = state.clone();
        apply(
            &mut state,
            &Effect::StatDelta(StatDelta {
                stat: "charisma".into(),
                delta: 10,
            }),
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_grants_are_idempotent_and_ordered() {
        let mut state = GameState::new();
        apply_all(
            &mut state,
            &[
                Effect::grant_item("notebook"),
                Effect::grant_item("thermos"),
                Effect::grant_item("notebook"),
                Effect::grant_achievement("first-steps"),
                Effect::grant_achievement("first-steps"),
            ],
        );
        assert_eq!(state.inventory, vec!["notebook", "thermos"]);
        assert_eq!(state.achievements, vec!["first-steps"]);
    }

    #[test]
    fn test_set_flag_leaves_state_alone() {
        let mut state = GameState::new();
        apply(&mut state, &Effect::SetFlag("met-midwife".into()));
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_effect_wire_format() {
        let effect: Effect =
            serde_json::from_str(r#"{"statDelta":{"stat":"empathy","delta":-3}}"#).unwrap();
        assert_eq!(effect, Effect::stat_delta(Stat::Empathy, -3));

        let effect: Effect = serde_json::from_str(r#"{"grantAchievement":"night-owl"}"#).unwrap();
        assert_eq!(effect, Effect::grant_achievement("night-owl"));

        assert_eq!(
            serde_json::to_string(&Effect::grant_item("map")).unwrap(),
            r#"{"grantItem":"map"}"#
        );
    }
}

//! Player state model
//!
//! Everything the story engine tracks about a playthrough lives here:
//! node progress, character stats, inventory and achievements. Only
//! `completed`, stats, inventory and achievements are persisted; the
//! unlocked set and current node are derived/ephemeral.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::consts::{STAT_MAX, STAT_MIN};

/// Identifier of a story node
pub type NodeId = String;
/// Identifier of an inventory item
pub type ItemId = String;
/// Identifier of an achievement
pub type AchievementId = String;

/// Character stats tracked by the story
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Support,
    Knowledge,
    Communication,
    Preparation,
    Presence,
    Empathy,
    Energy,
    Finances,
    Relationship,
    Patience,
    Organization,
    Resilience,
    Attentiveness,
    ProblemSolving,
    Health,
}

impl Stat {
    /// Every stat, in display order
    pub const ALL: [Stat; 15] = [
        Stat::Support,
        Stat::Knowledge,
        Stat::Communication,
        Stat::Preparation,
        Stat::Presence,
        Stat::Empathy,
        Stat::Energy,
        Stat::Finances,
        Stat::Relationship,
        Stat::Patience,
        Stat::Organization,
        Stat::Resilience,
        Stat::Attentiveness,
        Stat::ProblemSolving,
        Stat::Health,
    ];

    /// Name used in saves and authored content
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Support => "support",
            Stat::Knowledge => "knowledge",
            Stat::Communication => "communication",
            Stat::Preparation => "preparation",
            Stat::Presence => "presence",
            Stat::Empathy => "empathy",
            Stat::Energy => "energy",
            Stat::Finances => "finances",
            Stat::Relationship => "relationship",
            Stat::Patience => "patience",
            Stat::Organization => "organization",
            Stat::Resilience => "resilience",
            Stat::Attentiveness => "attentiveness",
            Stat::ProblemSolving => "problemSolving",
            Stat::Health => "health",
        }
    }

    /// Look up a stat by its saved/authored name (exact match)
    pub fn from_name(name: &str) -> Option<Self> {
        Stat::ALL.into_iter().find(|stat| stat.name() == name)
    }
}

/// Clamp an arbitrary value into the stat range
#[inline]
pub fn clamp_stat(value: i64) -> u8 {
    value.clamp(STAT_MIN as i64, STAT_MAX as i64) as u8
}

/// Stat values; every stat is always present and within `[STAT_MIN, STAT_MAX]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    values: BTreeMap<Stat, u8>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            values: Stat::ALL.into_iter().map(|stat| (stat, STAT_MIN)).collect(),
        }
    }
}

impl Stats {
    pub fn get(&self, stat: Stat) -> u8 {
        self.values.get(&stat).copied().unwrap_or(STAT_MIN)
    }

    /// Set a stat, clamping into range
    pub fn set(&mut self, stat: Stat, value: i64) {
        self.values.insert(stat, clamp_stat(value));
    }

    /// Add a (possibly negative) delta, clamping into range. Returns the new value.
    pub fn adjust(&mut self, stat: Stat, delta: i64) -> u8 {
        let value = clamp_stat((self.get(stat) as i64).saturating_add(delta));
        self.values.insert(stat, value);
        value
    }

    /// Iterate all stats in display order
    pub fn iter(&self) -> impl Iterator<Item = (Stat, u8)> + '_ {
        self.values.iter().map(|(stat, value)| (*stat, *value))
    }

    /// Stats keyed by their saved name
    pub fn to_named(&self) -> BTreeMap<String, i64> {
        self.iter()
            .map(|(stat, value)| (stat.name().to_string(), value as i64))
            .collect()
    }
}

/// Node progress for the current playthrough
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    /// Nodes the player has finished (grows until a new game)
    pub completed: BTreeSet<NodeId>,
    /// Nodes reachable but not completed; recomputed wholesale, never patched
    pub unlocked: BTreeSet<NodeId>,
    /// Node currently being played
    pub current_node: Option<NodeId>,
}

/// Complete player state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub progress: Progress,
    pub stats: Stats,
    /// Held items, in the order they were granted
    pub inventory: Vec<ItemId>,
    /// Unlocked achievements, in the order they were granted
    pub achievements: Vec<AchievementId>,
}

impl GameState {
    /// Create a fresh state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every field to its default in one assignment
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.progress.completed.contains(id)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.progress.unlocked.contains(id)
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.inventory.iter().any(|item| item == id)
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|achievement| achievement == id)
    }
}

//! Progress controller
//!
//! Owns the [`GameState`] and the save slot, and is the only thing that
//! mutates them. Unlocks are recomputed only when asked
//! (`update_unlocked_nodes`, `refresh_unlocked`), on load and on a new
//! game; completing a node does not by itself unlock its successors.
//!
//! Single owner, not thread-safe. Every call runs to completion; a host
//! that re-enters gets last-write-wins saves with no locking.

use serde::{Deserialize, Serialize};

use crate::content::{Choice, Node, Scene};
use crate::effects::{self, Effect};
use crate::persistence::{Save, SaveSlot, SaveStore};
use crate::state::GameState;
use crate::unlock;

/// Display state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Locked,
    Unlocked,
    Completed,
}

pub struct ProgressController<S: SaveStore> {
    state: GameState,
    slot: SaveSlot<S>,
    /// Last catalog passed to `update_unlocked_nodes`
    catalog: Option<Vec<Node>>,
    /// Bumped on every mutation so observers can poll for changes
    revision: u64,
}

impl<S: SaveStore> ProgressController<S> {
    /// Controller with default state; nothing is loaded until `load_save`
    pub fn new(slot: SaveSlot<S>) -> Self {
        Self {
            state: GameState::new(),
            slot,
            catalog: None,
            revision: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn slot(&self) -> &SaveSlot<S> {
        &self.slot
    }

    pub fn catalog(&self) -> Option<&[Node]> {
        self.catalog.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn has_save(&self) -> bool {
        self.slot.has_save()
    }

    /// Resume from the stored save. Returns false (state untouched) if
    /// there is no usable save.
    pub fn load_save(&mut self) -> bool {
        let Some(save) = self.slot.load() else {
            return false;
        };

        save.apply_to(&mut self.state);
        self.recompute_unlocked();
        self.touch();
        true
    }

    /// Persist the current state
    pub fn save_game(&mut self) -> bool {
        self.slot.store(&Save::from_state(&self.state))
    }

    /// Reset to a fresh playthrough and overwrite the stored save
    pub fn start_new_game(&mut self) {
        self.state.reset();
        self.recompute_unlocked();
        self.touch();
        log::info!("New game started");
        self.save_game();
    }

    /// Remember `nodes` as the catalog and recompute unlocks from it
    pub fn update_unlocked_nodes(&mut self, nodes: &[Node]) {
        self.catalog = Some(nodes.to_vec());
        self.recompute_unlocked();
        self.touch();
    }

    /// Recompute unlocks against the remembered catalog
    pub fn refresh_unlocked(&mut self) {
        self.recompute_unlocked();
        self.touch();
    }

    fn recompute_unlocked(&mut self) {
        // No catalog yet: keep whatever unlocked set there is
        if let Some(nodes) = &self.catalog {
            self.state.progress.unlocked = unlock::resolve(nodes, &self.state.progress.completed);
            log::debug!("{} nodes unlocked", self.state.progress.unlocked.len());
        }
    }

    pub fn node_state(&self, node: &Node) -> NodeState {
        self.node_state_of(&node.id)
    }

    /// Completed wins over unlocked; anything else is locked
    pub fn node_state_of(&self, id: &str) -> NodeState {
        if self.state.is_completed(id) {
            NodeState::Completed
        } else if self.state.is_unlocked(id) {
            NodeState::Unlocked
        } else {
            NodeState::Locked
        }
    }

    /// Make `id` the node being played. Does not check that it is unlocked.
    pub fn start_node(&mut self, id: &str) {
        self.state.progress.current_node = Some(id.to_string());
        self.touch();
        log::info!("Started node '{}'", id);
    }

    /// Mark `id` completed, clear the current node and save
    pub fn complete_node(&mut self, id: &str) {
        self.state.progress.completed.insert(id.to_string());
        self.state.progress.unlocked.remove(id);
        self.state.progress.current_node = None;
        self.touch();
        log::info!("Completed node '{}'", id);
        self.save_game();
    }

    /// Apply a single effect; does not save
    pub fn apply_effect(&mut self, effect: &Effect) {
        effects::apply(&mut self.state, effect);
        self.touch();
    }

    pub fn apply_effects(&mut self, effects: &[Effect]) {
        effects::apply_all(&mut self.state, effects);
        self.touch();
    }

    /// Apply the effects of a picked choice
    pub fn choose(&mut self, choice: &Choice) {
        log::debug!("Chose '{}'", choice.id);
        self.apply_effects(&choice.effects);
    }

    /// Apply a finished scene's resolution effects
    pub fn resolve_scene(&mut self, scene: &Scene) {
        self.apply_effects(&scene.on_resolve);
    }
}

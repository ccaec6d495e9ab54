//! Browser bindings
//!
//! Exposes the progress controller to the JS front end. Structured
//! arguments and results cross the boundary as JSON strings.

use std::collections::BTreeMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::consts::STORAGE_KEY;
use crate::content::Node;
use crate::effects::Effect;
use crate::persistence::{LocalStorage, SaveSlot};
use crate::progress::{NodeState, ProgressController};
use crate::state::GameState;

/// Serialized view of the full state for the UI
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateView<'a> {
    completed: Vec<&'a str>,
    unlocked: Vec<&'a str>,
    current_node: Option<&'a str>,
    stats: BTreeMap<String, i64>,
    inventory: &'a [String],
    achievements: &'a [String],
}

impl<'a> From<&'a GameState> for StateView<'a> {
    fn from(state: &'a GameState) -> Self {
        Self {
            completed: state.progress.completed.iter().map(String::as_str).collect(),
            unlocked: state.progress.unlocked.iter().map(String::as_str).collect(),
            current_node: state.progress.current_node.as_deref(),
            stats: state.stats.to_named(),
            inventory: &state.inventory,
            achievements: &state.achievements,
        }
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    controller: ProgressController<LocalStorage>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(storage_key: Option<String>) -> Result<WebGame, JsValue> {
        let store = LocalStorage::open().map_err(js_error)?;
        let key = storage_key.unwrap_or_else(|| STORAGE_KEY.to_string());
        Ok(Self {
            controller: ProgressController::new(SaveSlot::new(store, key)),
        })
    }

    /// Current state as JSON
    pub fn state(&self) -> Result<String, JsValue> {
        serde_json::to_string(&StateView::from(self.controller.state())).map_err(js_error)
    }

    pub fn revision(&self) -> u64 {
        self.controller.revision()
    }

    #[wasm_bindgen(js_name = hasSave)]
    pub fn has_save(&self) -> bool {
        self.controller.has_save()
    }

    #[wasm_bindgen(js_name = loadSave)]
    pub fn load_save(&mut self) -> bool {
        self.controller.load_save()
    }

    #[wasm_bindgen(js_name = saveGame)]
    pub fn save_game(&mut self) -> bool {
        self.controller.save_game()
    }

    #[wasm_bindgen(js_name = startNewGame)]
    pub fn start_new_game(&mut self) {
        self.controller.start_new_game();
    }

    /// `nodes_json` is an array of authored nodes
    #[wasm_bindgen(js_name = updateUnlockedNodes)]
    pub fn update_unlocked_nodes(&mut self, nodes_json: &str) -> Result<(), JsValue> {
        let nodes: Vec<Node> = serde_json::from_str(nodes_json).map_err(js_error)?;
        self.controller.update_unlocked_nodes(&nodes);
        Ok(())
    }

    /// `"locked"`, `"unlocked"` or `"completed"`
    #[wasm_bindgen(js_name = getNodeState)]
    pub fn get_node_state(&self, node_id: &str) -> String {
        match self.controller.node_state_of(node_id) {
            NodeState::Locked => "locked",
            NodeState::Unlocked => "unlocked",
            NodeState::Completed => "completed",
        }
        .to_string()
    }

    #[wasm_bindgen(js_name = completeNode)]
    pub fn complete_node(&mut self, node_id: &str) {
        self.controller.complete_node(node_id);
    }

    #[wasm_bindgen(js_name = startNode)]
    pub fn start_node(&mut self, node_id: &str) {
        self.controller.start_node(node_id);
    }

    /// Unrecognized effects are logged and ignored rather than thrown
    #[wasm_bindgen(js_name = applyEffect)]
    pub fn apply_effect(&mut self, effect_json: &str) {
        match serde_json::from_str::<Effect>(effect_json) {
            Ok(effect) => self.controller.apply_effect(&effect),
            Err(e) => log::warn!("Ignoring unrecognized effect {}: {}", effect_json, e),
        }
    }
}

/// Module start hook: logging and panic reporting for the browser
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Alter Life engine loaded");
}

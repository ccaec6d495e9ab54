//! Authored story content
//!
//! Nodes, scenes and their choices are loaded from JSON acts. The engine
//! only reads node ids/requirements and effects; everything else is
//! carried through for the presentation layer.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::effects::Effect;
use crate::state::NodeId;

/// Failure loading authored content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse an effect list, dropping entries that are not a known effect
fn lenient_effects<'de, D>(deserializer: D) -> Result<Vec<Effect>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Effect>(value.clone()) {
            Ok(effect) => Some(effect),
            Err(e) => {
                log::warn!("Skipping unrecognized effect {}: {}", value, e);
                None
            }
        })
        .collect())
}

/// A unit of narrative gated by other nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    /// Nodes that must be completed before this one unlocks
    #[serde(default)]
    pub requires: Vec<NodeId>,
    pub scene_id: String,
}

impl Node {
    pub fn new(id: impl Into<String>, requires: &[&str]) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            scene_id: id.clone(),
            id,
            requires: requires.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Step body text, either plain or markdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prose {
    Plain(String),
    Markdown { md: String },
}

impl Prose {
    pub fn text(&self) -> &str {
        match self {
            Prose::Plain(text) => text,
            Prose::Markdown { md } => md,
        }
    }
}

/// A selectable option inside a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
    #[serde(default, deserialize_with = "lenient_effects")]
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: String,
    pub prompt: String,
    pub options: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub prose: Prose,
    #[serde(default)]
    pub groups: Vec<OptionGroup>,
    /// Id of the following step, if not simply the next in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub steps: Vec<Step>,
    /// Effects applied once the scene is finished
    #[serde(default, deserialize_with = "lenient_effects")]
    pub on_resolve: Vec<Effect>,
}

impl Scene {
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Step following `current`: its explicit `next`, else the next in order
    pub fn next_step(&self, current: &Step) -> Option<&Step> {
        match &current.next {
            Some(next) => self.step(next),
            None => {
                let index = self.steps.iter().position(|step| step.id == current.id)?;
                self.steps.get(index + 1)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub blurb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub hidden: bool,
}

/// One act: its node graph and the scenes the nodes trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActData {
    pub act_id: String,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl ActData {
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let act: ActData = serde_json::from_str(json)?;
        log::info!(
            "Loaded act '{}' ({} nodes, {} scenes)",
            act.act_id,
            act.nodes.len(),
            act.scenes.len()
        );
        Ok(act)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    /// Scene triggered by `node`
    pub fn scene_for(&self, node: &Node) -> Option<&Scene> {
        self.scene(&node.scene_id)
    }
}

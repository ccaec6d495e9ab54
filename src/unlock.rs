//! Unlock resolution over the node requirement graph
//!
//! The unlocked set is always recomputed from scratch, so it is a pure
//! function of the catalog and the completed set and cannot drift.

use std::collections::BTreeSet;

use crate::content::Node;
use crate::state::NodeId;

/// Nodes that are not completed and have every requirement completed.
///
/// Requirements naming nodes outside the catalog never resolve, and
/// nodes on a requirement cycle stay locked; no graph validation is done.
pub fn resolve(nodes: &[Node], completed: &BTreeSet<NodeId>) -> BTreeSet<NodeId> {
    nodes
        .iter()
        .filter(|node| !completed.contains(&node.id))
        .filter(|node| node.requires.iter().all(|req| completed.contains(req)))
        .map(|node| node.id.clone())
        .collect()
}

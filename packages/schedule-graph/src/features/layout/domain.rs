// Layout Domain Models
//
// Field names follow the ELK JSON format (`layoutOptions`, `sources`,
// `targets`) so the tree can be handed to the engine as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::features::graph_builder::GraphNode;

/// Id of the synthetic top-level layout node
pub const LAYOUT_ROOT_ID: &str = "root";

/// Engine option key → value
pub type LayoutOptions = BTreeMap<String, String>;

/// Layered algorithm with the inspector's spacing
pub fn default_layout_options() -> LayoutOptions {
    [
        ("elk.algorithm", "layered"),
        ("elk.layered.spacing.nodeNodeBetweenLayers", "100"),
        ("elk.spacing.nodeNode", "80"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
}

impl NodeSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Supplies rendered node sizes; `None` means not measured yet
pub trait NodeMeasurer {
    fn measure(&self, node: &GraphNode) -> Option<NodeSize>;
}

impl<F> NodeMeasurer for F
where
    F: Fn(&GraphNode) -> Option<NodeSize>,
{
    fn measure(&self, node: &GraphNode) -> Option<NodeSize> {
        self(node)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub layout_options: LayoutOptions,
    #[serde(default)]
    pub children: Vec<LayoutNode>,
    /// Assigned by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

// Nesting can be as deep as the schedule hierarchy; unlink children onto a
// flat list instead of dropping them recursively
impl Drop for LayoutNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: String,
    pub sources: Vec<String>,
    pub targets: Vec<String>,
}

/// Top-level layout input (and, once laid out, output)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutGraph {
    pub id: String,
    #[serde(default)]
    pub layout_options: LayoutOptions,
    #[serde(default)]
    pub children: Vec<LayoutNode>,
    #[serde(default)]
    pub edges: Vec<LayoutEdge>,
}

/// Engine-assigned position of one node, relative to its parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

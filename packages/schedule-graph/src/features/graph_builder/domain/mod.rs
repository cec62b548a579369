// Graph Builder Domain Models
//
// Output graph (nodes + ordering edges), the schedule selection seam, and the
// build report. Pure data; the builder lives in infrastructure.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::shared::models::{
    deserialize_arc_str, deserialize_option_arc_str, deserialize_vec_arc_str, serialize_arc_str,
    serialize_option_arc_str, serialize_vec_arc_str,
};
use crate::shared::{Diagnostic, EdgeKind, InternedString, NodeKind, Severity};

// ============================================================
// Schedule Selection
// ============================================================

/// Decides which schedules take part in a build
pub trait ScheduleSelector {
    fn select(&self, name: &str) -> bool;
}

impl<F> ScheduleSelector for F
where
    F: Fn(&str) -> bool,
{
    fn select(&self, name: &str) -> bool {
        self(name)
    }
}

// ============================================================
// Graph Node
// ============================================================

/// Schedule root, set or system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Namespaced id, unique across the graph
    #[serde(
        serialize_with = "serialize_arc_str",
        deserialize_with = "deserialize_arc_str"
    )]
    pub id: InternedString,

    pub kind: NodeKind,

    /// Last namespace segment of the qualified name
    pub label: String,

    /// Ordered children; always empty for systems
    #[serde(
        serialize_with = "serialize_vec_arc_str",
        deserialize_with = "deserialize_vec_arc_str"
    )]
    pub child_ids: Vec<InternedString>,

    /// None only for schedule roots
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_option_arc_str",
        deserialize_with = "deserialize_option_arc_str"
    )]
    pub parent_id: Option<InternedString>,
}

impl GraphNode {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

// ============================================================
// Graph Edge
// ============================================================

/// Directed ordering edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    #[serde(
        serialize_with = "serialize_arc_str",
        deserialize_with = "deserialize_arc_str"
    )]
    pub id: InternedString,

    pub kind: EdgeKind,

    #[serde(
        serialize_with = "serialize_arc_str",
        deserialize_with = "deserialize_arc_str"
    )]
    pub source_id: InternedString,

    #[serde(
        serialize_with = "serialize_arc_str",
        deserialize_with = "deserialize_arc_str"
    )]
    pub target_id: InternedString,
}

// ============================================================
// Schedule Graph
// ============================================================

/// Complete graph for one snapshot
///
/// Nodes appear schedule by schedule: root first, then members in collection
/// order. Edges appear in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl ScheduleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Get node by ID (O(N) scan)
    pub fn get_node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id.as_ref() == node_id)
    }

    /// Get edge by ID (O(E) scan)
    pub fn get_edge(&self, edge_id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id.as_ref() == edge_id)
    }

    /// Schedule roots in build order
    pub fn roots(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.is_root())
    }

    /// Id → node map for repeated lookups
    pub fn node_map(&self) -> AHashMap<&str, &GraphNode> {
        self.nodes.iter().map(|n| (n.id.as_ref(), n)).collect()
    }

    pub fn get_nodes_by_kind(&self, kind: NodeKind) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|n| n.kind == kind).collect()
    }

    pub fn get_edges_by_kind(&self, kind: EdgeKind) -> Vec<&GraphEdge> {
        self.edges.iter().filter(|e| e.kind == kind).collect()
    }

    /// Outgoing edges of a node
    pub fn get_edges_from(&self, source_id: &str) -> Vec<&GraphEdge> {
        self.edges
            .iter()
            .filter(|e| e.source_id.as_ref() == source_id)
            .collect()
    }

    /// Incoming edges of a node
    pub fn get_edges_to(&self, target_id: &str) -> Vec<&GraphEdge> {
        self.edges
            .iter()
            .filter(|e| e.target_id.as_ref() == target_id)
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        let mut nodes_by_kind = HashMap::new();
        for node in &self.nodes {
            *nodes_by_kind.entry(node.kind).or_insert(0) += 1;
        }

        let mut edges_by_kind = HashMap::new();
        for edge in &self.edges {
            *edges_by_kind.entry(edge.kind).or_insert(0) += 1;
        }

        GraphStats {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            nodes_by_kind,
            edges_by_kind,
        }
    }

    /// Check the structural guarantees every built graph carries:
    /// unique ids, resolvable parents and edge endpoints, children and parent
    /// pointers agreeing, parent chains ending at a schedule root.
    pub fn verify(&self) -> Result<(), GraphInvariantError> {
        let mut nodes: AHashMap<&str, &GraphNode> = AHashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if nodes.insert(node.id.as_ref(), node).is_some() {
                return Err(GraphInvariantError::DuplicateNode(node.id.to_string()));
            }
        }

        // (parent, child) pairs declared by child lists
        let mut declared: AHashSet<(&str, &str)> = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            for child in &node.child_ids {
                let consistent = declared.insert((node.id.as_ref(), child.as_ref()))
                    && nodes
                        .get(child.as_ref())
                        .is_some_and(|c| c.parent_id.as_ref() == Some(&node.id));
                if !consistent {
                    return Err(GraphInvariantError::ChildMismatch {
                        parent: node.id.to_string(),
                        child: child.to_string(),
                    });
                }
            }
        }

        for node in &self.nodes {
            match (&node.parent_id, node.kind) {
                (None, NodeKind::Schedule) => {}
                (None, _) => return Err(GraphInvariantError::MissingParent(node.id.to_string())),
                (Some(_), NodeKind::Schedule) => {
                    return Err(GraphInvariantError::ParentedRoot(node.id.to_string()))
                }
                (Some(parent), _) => {
                    let Some(parent_node) = nodes.get(parent.as_ref()) else {
                        return Err(GraphInvariantError::DanglingParent {
                            node: node.id.to_string(),
                            parent: parent.to_string(),
                        });
                    };
                    if !parent_node.kind.is_container() {
                        return Err(GraphInvariantError::LeafParent {
                            node: node.id.to_string(),
                            parent: parent.to_string(),
                        });
                    }
                    if !declared.contains(&(parent.as_ref(), node.id.as_ref())) {
                        return Err(GraphInvariantError::ChildMismatch {
                            parent: parent.to_string(),
                            child: node.id.to_string(),
                        });
                    }
                }
            }
        }

        // Every parent chain must reach a root; chains already known to do so
        // end the walk early
        let mut grounded: AHashSet<&str> = AHashSet::with_capacity(self.nodes.len());
        let mut path: Vec<&str> = Vec::new();
        for node in &self.nodes {
            path.clear();
            let mut current = node;
            loop {
                let id = current.id.as_ref();
                if grounded.contains(id) {
                    break;
                }
                if path.len() > self.nodes.len() {
                    return Err(GraphInvariantError::ParentCycle(node.id.to_string()));
                }
                path.push(id);
                match current
                    .parent_id
                    .as_ref()
                    .and_then(|p| nodes.get(p.as_ref()).copied())
                {
                    Some(next) => current = next,
                    None => break,
                }
            }
            grounded.extend(path.iter().copied());
        }

        let mut edge_ids = AHashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_ref()) {
                return Err(GraphInvariantError::DuplicateEdge(edge.id.to_string()));
            }
            for endpoint in [&edge.source_id, &edge.target_id] {
                if !nodes.contains_key(endpoint.as_ref()) {
                    return Err(GraphInvariantError::DanglingEdge {
                        edge: edge.id.to_string(),
                        endpoint: endpoint.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Graph statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub nodes_by_kind: HashMap<NodeKind, usize>,
    pub edges_by_kind: HashMap<EdgeKind, usize>,
}

/// Structural violation found by [`ScheduleGraph::verify`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphInvariantError {
    #[error("node id '{0}' appears more than once")]
    DuplicateNode(String),

    #[error("edge id '{0}' appears more than once")]
    DuplicateEdge(String),

    #[error("non-root node '{0}' has no parent")]
    MissingParent(String),

    #[error("schedule root '{0}' has a parent")]
    ParentedRoot(String),

    #[error("node '{node}' points at missing parent '{parent}'")]
    DanglingParent { node: String, parent: String },

    #[error("node '{node}' is nested under system '{parent}'")]
    LeafParent { node: String, parent: String },

    #[error("children of '{parent}' disagree with parent pointer of '{child}'")]
    ChildMismatch { parent: String, child: String },

    #[error("parent chain of '{0}' never reaches a root")]
    ParentCycle(String),

    #[error("edge '{edge}' references missing node '{endpoint}'")]
    DanglingEdge { edge: String, endpoint: String },
}

// ============================================================
// Build Report
// ============================================================

/// What happened to one input schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Included; counts cover this schedule's own nodes (root included)
    /// and dependency edges
    Built { nodes: usize, edges: usize },
    /// Selector said no
    NotSelected,
    /// Failed ingestion or collided with an earlier schedule
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Position in the unfiltered input
    pub index: usize,
    pub name: String,
    /// Namespace prefix, `"{name}-{index}"`
    pub schedule_id: String,
    pub status: ScheduleStatus,
}

/// Side-channel output of a build; never needed to use the graph itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub schedules: Vec<ScheduleOutcome>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
    }

    pub fn built_count(&self) -> usize {
        self.schedules
            .iter()
            .filter(|s| matches!(s.status, ScheduleStatus::Built { .. }))
            .count()
    }

    pub fn rejected_count(&self) -> usize {
        self.schedules
            .iter()
            .filter(|s| matches!(s.status, ScheduleStatus::Rejected { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::intern;

    fn node(id: &str, kind: NodeKind, parent: Option<&str>, children: &[&str]) -> GraphNode {
        GraphNode {
            id: intern(id),
            kind,
            label: id.to_string(),
            child_ids: children.iter().map(intern).collect(),
            parent_id: parent.map(intern),
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
        GraphEdge {
            id: intern(id),
            kind: EdgeKind::Dependency,
            source_id: intern(source),
            target_id: intern(target),
        }
    }

    fn small_graph() -> ScheduleGraph {
        ScheduleGraph {
            nodes: vec![
                node("U-0", NodeKind::Schedule, None, &["U-0-a"]),
                node("U-0-a", NodeKind::Set, Some("U-0"), &["U-0-b"]),
                node("U-0-b", NodeKind::System, Some("U-0-a"), &[]),
            ],
            edges: vec![edge("U-0-a-b", "U-0-a", "U-0-b")],
        }
    }

    #[test]
    fn test_verify_accepts_consistent_graph() {
        assert_eq!(small_graph().verify(), Ok(()));
        assert_eq!(ScheduleGraph::new().verify(), Ok(()));
    }

    #[test]
    fn test_verify_duplicate_node() {
        let mut graph = small_graph();
        graph.nodes.push(node("U-0-b", NodeKind::System, Some("U-0-a"), &[]));
        assert_eq!(
            graph.verify(),
            Err(GraphInvariantError::DuplicateNode("U-0-b".to_string()))
        );
    }

    #[test]
    fn test_verify_dangling_edge() {
        let mut graph = small_graph();
        graph.edges.push(edge("e", "U-0-a", "U-0-missing"));
        assert!(matches!(
            graph.verify(),
            Err(GraphInvariantError::DanglingEdge { .. })
        ));
    }

    #[test]
    fn test_verify_child_mismatch() {
        let mut graph = small_graph();
        graph.nodes[1].child_ids.clear();
        assert!(matches!(
            graph.verify(),
            Err(GraphInvariantError::ChildMismatch { .. })
        ));
    }

    #[test]
    fn test_verify_system_parent() {
        let mut graph = small_graph();
        graph.nodes[2].child_ids.push(intern("U-0-c"));
        graph.nodes.push(node("U-0-c", NodeKind::System, Some("U-0-b"), &[]));
        assert!(matches!(
            graph.verify(),
            Err(GraphInvariantError::LeafParent { .. })
        ));
    }

    #[test]
    fn test_verify_cycle() {
        let graph = ScheduleGraph {
            nodes: vec![
                node("a", NodeKind::Set, Some("b"), &["b"]),
                node("b", NodeKind::Set, Some("a"), &["a"]),
            ],
            edges: vec![],
        };
        assert!(matches!(
            graph.verify(),
            Err(GraphInvariantError::ParentCycle(_))
        ));
    }

    #[test]
    fn test_queries_and_stats() {
        let graph = small_graph();
        assert_eq!(graph.roots().count(), 1);
        assert_eq!(graph.get_node("U-0-b").unwrap().kind, NodeKind::System);
        assert_eq!(graph.get_edges_from("U-0-a").len(), 1);
        assert_eq!(graph.get_edges_to("U-0-a").len(), 0);
        assert!(graph.get_edge("U-0-a-b").is_some());

        let stats = graph.stats();
        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.total_edges, 1);
        assert_eq!(stats.nodes_by_kind[&NodeKind::Set], 1);
        assert_eq!(stats.edges_by_kind[&EdgeKind::Dependency], 1);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(small_graph()).unwrap();
        let root = &json["nodes"][0];
        assert_eq!(root["id"], "U-0");
        assert_eq!(root["childIds"], serde_json::json!(["U-0-a"]));
        assert!(root.get("parentId").is_none());
        assert_eq!(json["nodes"][1]["parentId"], "U-0");
        assert_eq!(json["edges"][0]["sourceId"], "U-0-a");

        let back: ScheduleGraph = serde_json::from_value(json).unwrap();
        assert_eq!(back, small_graph());
    }

    #[test]
    fn test_closure_selector() {
        let only_update = |name: &str| name == "Update";
        assert!(only_update.select("Update"));
        assert!(!only_update.select("Startup"));
    }
}

//! Custom assertions for schedule graph verification

use pretty_assertions::assert_eq;
use schedule_graph::{EdgeKind, GraphNode, NodeKind, ScheduleGraph};

/// Assert every structural invariant holds
pub fn assert_graph_valid(graph: &ScheduleGraph) {
    if let Err(e) = graph.verify() {
        panic!(
            "graph violates invariants: {e}\nnodes: {:?}",
            graph.nodes.iter().map(|n| n.id.as_ref()).collect::<Vec<_>>()
        );
    }
}

/// Assert node ids in emission order
pub fn assert_node_ids(graph: &ScheduleGraph, expected: &[&str]) {
    let actual: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_ref()).collect();
    assert_eq!(actual, expected);
}

/// Assert (source, target, kind) triples in emission order
pub fn assert_edges(graph: &ScheduleGraph, expected: &[(&str, &str, EdgeKind)]) {
    let actual: Vec<(&str, &str, EdgeKind)> = graph
        .edges
        .iter()
        .map(|e| (e.source_id.as_ref(), e.target_id.as_ref(), e.kind))
        .collect();
    assert_eq!(actual, expected);
}

/// Look a node up or fail with the list of known ids
pub fn expect_node<'a>(graph: &'a ScheduleGraph, id: &str) -> &'a GraphNode {
    graph.get_node(id).unwrap_or_else(|| {
        panic!(
            "node '{id}' not in graph; have {:?}",
            graph.nodes.iter().map(|n| n.id.as_ref()).collect::<Vec<_>>()
        )
    })
}

/// Assert kind, label and parent of one node
pub fn assert_node(graph: &ScheduleGraph, id: &str, kind: NodeKind, label: &str, parent: Option<&str>) {
    let node = expect_node(graph, id);
    assert_eq!(node.kind, kind, "kind of '{id}'");
    assert_eq!(node.label, label, "label of '{id}'");
    assert_eq!(node.parent_id.as_deref(), parent, "parent of '{id}'");
}

/// Assert ordered children of one node
pub fn assert_children(graph: &ScheduleGraph, id: &str, expected: &[&str]) {
    let node = expect_node(graph, id);
    let actual: Vec<&str> = node.child_ids.iter().map(|c| c.as_ref()).collect();
    assert_eq!(actual, expected, "children of '{id}'");
}

// Layout Adapter
//
// Schedule roots become top-level layout nodes; each node's `child_ids` become
// nested layout children in order. The synthetic root carries the defaults
// merged with the caller's options; every other node carries only the
// caller's options.

use ahash::{AHashMap, AHashSet};
use tracing::debug;

use super::domain::{
    default_layout_options, LayoutEdge, LayoutGraph, LayoutNode, LayoutOptions, NodeMeasurer,
    NodePosition, LAYOUT_ROOT_ID,
};
use crate::features::graph_builder::{GraphNode, ScheduleGraph};

pub struct LayoutAdapter<'m, M: NodeMeasurer + ?Sized> {
    measurer: &'m M,
    options: LayoutOptions,
}

impl<'m, M: NodeMeasurer + ?Sized> LayoutAdapter<'m, M> {
    pub fn new(measurer: &'m M) -> Self {
        Self {
            measurer,
            options: LayoutOptions::new(),
        }
    }

    /// Caller options; override the defaults on the root and apply to every node
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    pub fn to_layout_graph(&self, graph: &ScheduleGraph) -> LayoutGraph {
        let nodes = graph.node_map();
        let mut placed: AHashSet<&str> = AHashSet::with_capacity(graph.nodes.len());

        let mut children: Vec<LayoutNode> = Vec::new();
        for root in graph.roots() {
            if let Some(tree) = self.layout_subtree(root, &nodes, &mut placed) {
                children.push(tree);
            }
        }

        let edges: Vec<LayoutEdge> = graph
            .edges
            .iter()
            .map(|e| LayoutEdge {
                id: e.id.to_string(),
                sources: vec![e.source_id.to_string()],
                targets: vec![e.target_id.to_string()],
            })
            .collect();

        let mut layout_options = default_layout_options();
        layout_options.extend(self.options.clone());

        debug!(
            "layout input: {} top-level nodes, {} of {} nodes placed, {} edges",
            children.len(),
            placed.len(),
            graph.nodes.len(),
            edges.len()
        );

        LayoutGraph {
            id: LAYOUT_ROOT_ID.to_string(),
            layout_options,
            children,
            edges,
        }
    }

    /// Nested layout node for `top` and everything below it.
    ///
    /// Depth-first with an explicit frame stack; a node is finished once all
    /// of its children are. `placed` guards against a node being nested twice.
    fn layout_subtree<'g>(
        &self,
        top: &'g GraphNode,
        nodes: &AHashMap<&str, &'g GraphNode>,
        placed: &mut AHashSet<&'g str>,
    ) -> Option<LayoutNode> {
        if !placed.insert(top.id.as_ref()) {
            return None;
        }
        let mut frames = vec![Frame::new(top)];

        while let Some(frame) = frames.last_mut() {
            let node: &'g GraphNode = frame.node;
            if let Some(child_id) = node.child_ids.get(frame.next_child) {
                frame.next_child += 1;
                if let Some(&child) = nodes.get(child_id.as_ref()) {
                    if placed.insert(child.id.as_ref()) {
                        frames.push(Frame::new(child));
                    }
                }
                continue;
            }

            let finished = self.finish(frames.pop()?);
            match frames.last_mut() {
                Some(parent) => parent.children.push(finished),
                None => return Some(finished),
            }
        }
        None
    }

    fn finish(&self, frame: Frame<'_>) -> LayoutNode {
        let size = self.measurer.measure(frame.node).unwrap_or_default();
        LayoutNode {
            id: frame.node.id.to_string(),
            width: size.width,
            height: size.height,
            layout_options: self.options.clone(),
            children: frame.children,
            x: None,
            y: None,
        }
    }
}

/// Node whose children are still being laid out
struct Frame<'g> {
    node: &'g GraphNode,
    next_child: usize,
    children: Vec<LayoutNode>,
}

impl<'g> Frame<'g> {
    fn new(node: &'g GraphNode) -> Self {
        Self {
            node,
            next_child: 0,
            children: Vec::with_capacity(node.child_ids.len()),
        }
    }
}

/// Layout tree for `graph` with default options
pub fn to_layout_graph<M>(graph: &ScheduleGraph, measurer: &M) -> LayoutGraph
where
    M: NodeMeasurer + ?Sized,
{
    LayoutAdapter::new(measurer).to_layout_graph(graph)
}

/// Positions of every node in a laid-out tree, parents before children.
/// Missing coordinates read as 0.
pub fn flatten_positions(laid_out: &LayoutGraph) -> Vec<NodePosition> {
    let mut positions = Vec::new();
    let mut stack: Vec<&LayoutNode> = laid_out.children.iter().rev().collect();

    while let Some(node) = stack.pop() {
        positions.push(NodePosition {
            id: node.id.clone(),
            x: node.x.unwrap_or(0.0),
            y: node.y.unwrap_or(0.0),
        });
        stack.extend(node.children.iter().rev());
    }

    positions
}

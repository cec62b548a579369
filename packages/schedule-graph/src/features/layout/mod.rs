// Layout Input Adapter - Schedule Graph ⇄ Layered Layout Engine Tree
//
// Builds the nested node tree an ELK-style layered layout engine consumes and
// reads engine-assigned positions back. No geometry is computed here.
//
// ## Architecture
// - Domain: LayoutGraph/LayoutNode/LayoutEdge, options, measurer seam
// - Adapter: graph → layout tree, layout tree → positions

pub mod adapter;
pub mod domain;

pub use adapter::{flatten_positions, to_layout_graph, LayoutAdapter};
pub use domain::{
    default_layout_options, LayoutEdge, LayoutGraph, LayoutNode, LayoutOptions, NodeMeasurer,
    NodePosition, NodeSize, LAYOUT_ROOT_ID,
};

// Graph Builder Infrastructure
//
// Per-schedule node collection, edge conversion and the multi-schedule merge

pub mod builder;
pub mod edge_converter;
pub mod namespace;
pub mod node_converter;

pub use builder::{build_graph, build_graph_with_report, GraphBuilder};
pub use edge_converter::EdgeConverter;
pub use node_converter::{CollectedSchedule, NodeConverter};

// Graph Builder - Schedule Descriptors → Unified Schedule Graph
//
// Flattens every selected schedule into one node/edge list:
// - One root node per schedule, chained by sequence edges
// - Sets and systems namespaced under their schedule, wired as a tree
// - Dependency edges between collected members
//
// ## Architecture
// - Domain: Pure models (GraphNode, GraphEdge, ScheduleGraph, BuildReport)
// - Infrastructure: Node/edge conversion and the multi-schedule merge
// - Application: Use case wrapping a configured builder

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export application layer
pub use application::{GraphBuildResult, GraphBuilderUseCase, GraphBuilderUseCaseImpl};

// Re-exports
pub use domain::{
    BuildReport, GraphEdge, GraphInvariantError, GraphNode, GraphStats, ScheduleGraph,
    ScheduleOutcome, ScheduleSelector, ScheduleStatus,
};

pub use infrastructure::{build_graph, build_graph_with_report, GraphBuilder};

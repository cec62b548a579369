/*
 * Schedule Graph - ECS Schedule Topology for Hierarchical Layout
 *
 * Feature-First Hexagonal Architecture:
 * - shared/   : Ids, node/edge kinds, diagnostics
 * - config/   : Build options (YAML loadable)
 * - features/ : schedule_ingest → graph_builder → graph_store / layout,
 *               plus snapshot decoding in front
 *
 * Pipeline:
 *   snapshot JSON → ScheduleDescriptor[] → ScheduleIndex per schedule
 *   → ScheduleGraph (+ BuildReport) → published / fed to the layout engine
 */

/// Shared models and utilities
pub mod shared;

/// Build configuration
pub mod config;

/// Feature modules
pub mod features;

/// Crate-level error type
pub mod errors;

pub use config::{BuildConfig, ScheduleFilter};
pub use errors::{Result, ScheduleGraphError};
pub use features::graph_builder::{
    build_graph, build_graph_with_report, BuildReport, GraphBuildResult, GraphBuilder, GraphBuilderUseCase,
    GraphBuilderUseCaseImpl, GraphEdge, GraphNode, ScheduleGraph, ScheduleSelector,
};
pub use features::graph_store::GraphStore;
pub use features::schedule_ingest::ScheduleDescriptor;
pub use features::snapshot::decode_schedules;
pub use shared::{Diagnostic, EdgeKind, NodeKind, Severity};

//! Current graph holder
//!
//! The graph is rebuilt wholesale on each snapshot. Publishing swaps one
//! `Arc` under a write lock; readers clone the `Arc` and keep a consistent
//! graph for as long as they hold it.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::features::graph_builder::{BuildReport, GraphBuilder, ScheduleGraph};
use crate::features::schedule_ingest::ScheduleDescriptor;
use crate::features::snapshot::{decode_schedules, DecodeResult};

/// Graph, report and generation published together
#[derive(Debug, Clone, Default)]
pub struct PublishedGraph {
    pub graph: Arc<ScheduleGraph>,
    pub report: Arc<BuildReport>,
    /// 0 until the first publish
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct GraphStore {
    current: RwLock<PublishedGraph>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest graph
    pub fn current(&self) -> Arc<ScheduleGraph> {
        self.current.read().graph.clone()
    }

    /// Latest graph together with its report and generation
    pub fn snapshot(&self) -> PublishedGraph {
        self.current.read().clone()
    }

    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    /// Replace the current graph; returns the new generation
    pub fn publish(&self, graph: ScheduleGraph, report: BuildReport) -> u64 {
        let graph = Arc::new(graph);
        let report = Arc::new(report);
        let mut current = self.current.write();
        current.generation += 1;
        current.graph = graph;
        current.report = report;
        current.generation
    }

    /// Build with `builder`'s configured selection and publish
    pub fn apply_snapshot(&self, builder: &GraphBuilder, schedules: &[ScheduleDescriptor]) -> u64 {
        let (graph, report) = builder.build_configured(schedules);
        let (nodes, edges) = (graph.nodes.len(), graph.edges.len());
        let generation = self.publish(graph, report);
        info!(
            "published schedule graph generation {} ({} nodes, {} edges)",
            generation, nodes, edges
        );
        generation
    }

    /// Decode a JSON payload, then build and publish.
    /// A payload that fails to decode leaves the current graph untouched.
    pub fn apply_payload(&self, builder: &GraphBuilder, payload: &str) -> DecodeResult<u64> {
        let schedules = decode_schedules(payload)?;
        Ok(self.apply_snapshot(builder, &schedules))
    }

    /// Drop back to the empty graph
    pub fn clear(&self) -> u64 {
        self.publish(ScheduleGraph::new(), BuildReport::default())
    }
}

// Edge Converter - Dependencies → Graph Edges
//
// Dependency pairs are namespaced and kept only when both endpoints were
// collected for the schedule. Repeated pairs collapse into one edge.

use ahash::AHashSet;
use tracing::trace;

use super::namespace::{claim_unique_id, dependency_edge_id, node_id, sequence_edge_id};
use crate::features::graph_builder::domain::GraphEdge;
use crate::features::schedule_ingest::ScheduleIndex;
use crate::shared::{EdgeKind, InternedString};

#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeConverter;

impl EdgeConverter {
    pub fn new() -> Self {
        Self
    }

    /// Dependency edges of one schedule, in input order.
    ///
    /// `visited` holds the namespaced ids collected for the schedule;
    /// `edge_ids` holds every edge id already emitted into the graph.
    pub fn dependency_edges(
        &self,
        index: &ScheduleIndex,
        schedule_id: &str,
        visited: &AHashSet<InternedString>,
        edge_ids: &mut AHashSet<InternedString>,
    ) -> Vec<GraphEdge> {
        let mut edges = Vec::with_capacity(index.dependencies().len());
        let mut seen_pairs: AHashSet<(&str, &str)> = AHashSet::new();
        let mut dropped = 0usize;

        for dep in index.dependencies() {
            let source_id = node_id(schedule_id, &dep.source);
            let target_id = node_id(schedule_id, &dep.target);
            if !visited.contains(&source_id) || !visited.contains(&target_id) {
                dropped += 1;
                continue;
            }
            if !seen_pairs.insert((dep.source.as_str(), dep.target.as_str())) {
                continue;
            }

            let id = claim_unique_id(
                dependency_edge_id(schedule_id, &dep.source, &dep.target),
                edge_ids,
            );
            edges.push(GraphEdge {
                id,
                kind: EdgeKind::Dependency,
                source_id,
                target_id,
            });
        }

        if dropped > 0 {
            trace!(
                "schedule '{}': dropped {} dependencies with uncollected endpoints",
                schedule_id,
                dropped
            );
        }

        edges
    }

    /// Ordering edge between consecutive schedule roots
    pub fn sequence_edge(
        &self,
        previous_root: &InternedString,
        root: &InternedString,
        edge_ids: &mut AHashSet<InternedString>,
    ) -> GraphEdge {
        GraphEdge {
            id: claim_unique_id(sequence_edge_id(previous_root, root), edge_ids),
            kind: EdgeKind::Sequence,
            source_id: previous_root.clone(),
            target_id: root.clone(),
        }
    }
}

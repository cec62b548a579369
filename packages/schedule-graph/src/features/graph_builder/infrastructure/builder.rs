// Graph Builder - Schedules → Unified Schedule Graph
//
// Walks the input schedules in order:
// 1. Selector gate (unselected schedules still consume their index)
// 2. Ingestion (structural failures reject the schedule)
// 3. Node collection into a per-schedule buffer
// 4. Collision check against ids emitted by earlier schedules
// 5. Merge: sequencing edge, root, members, dependency edges
//
// A rejected schedule contributes nothing and does not break the sequencing
// chain: the next included schedule links to the last included root.

use ahash::AHashSet;
use tracing::{debug, error, info};

use super::edge_converter::EdgeConverter;
use super::namespace::schedule_id;
use super::node_converter::NodeConverter;
use crate::config::BuildConfig;
use crate::features::graph_builder::domain::{
    BuildReport, ScheduleGraph, ScheduleOutcome, ScheduleSelector, ScheduleStatus,
};
use crate::features::schedule_ingest::{ScheduleDescriptor, ScheduleIndexer};
use crate::shared::{Diagnostic, InternedString};

/// Unified graph builder
///
/// Stateless between calls; one instance can serve any number of builds.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: BuildConfig,
    indexer: ScheduleIndexer,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            config,
            indexer: ScheduleIndexer::new(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the graph for the schedules accepted by `selector`
    pub fn build<S>(&self, schedules: &[ScheduleDescriptor], selector: &S) -> ScheduleGraph
    where
        S: ScheduleSelector + ?Sized,
    {
        self.build_with_report(schedules, selector).0
    }

    /// Build with the selection from the builder's own config
    pub fn build_configured(&self, schedules: &[ScheduleDescriptor]) -> (ScheduleGraph, BuildReport) {
        self.build_with_report(schedules, &self.config.schedules)
    }

    /// Build and return the per-schedule outcomes and diagnostics as well
    pub fn build_with_report<S>(
        &self,
        schedules: &[ScheduleDescriptor],
        selector: &S,
    ) -> (ScheduleGraph, BuildReport)
    where
        S: ScheduleSelector + ?Sized,
    {
        let mut graph = ScheduleGraph::new();
        let mut report = BuildReport::default();
        let mut node_ids: AHashSet<InternedString> = AHashSet::new();
        let mut edge_ids: AHashSet<InternedString> = AHashSet::new();
        let mut previous_root: Option<InternedString> = None;

        let node_converter = NodeConverter::new(&self.config);
        let edge_converter = EdgeConverter::new();

        for (index, descriptor) in schedules.iter().enumerate() {
            let sid = schedule_id(&descriptor.name, index);
            let mut outcome = ScheduleOutcome {
                index,
                name: descriptor.name.clone(),
                schedule_id: sid.to_string(),
                status: ScheduleStatus::NotSelected,
            };

            if !selector.select(&descriptor.name) {
                debug!("schedule '{}' not selected", sid);
                report.schedules.push(outcome);
                continue;
            }

            let schedule_index = match self.indexer.index(descriptor) {
                Ok(schedule_index) => schedule_index,
                Err(e) => {
                    reject(&mut report, outcome, e.to_string());
                    continue;
                }
            };

            let mut collected = node_converter.convert(&schedule_index, &sid);

            if let Some(clash) = collected.ids().find(|id| node_ids.contains(*id)) {
                let reason = format!("node id '{}' was already emitted by an earlier schedule", clash);
                reject(&mut report, outcome, reason);
                continue;
            }

            // Findings are logged only for schedules that make it into the graph
            let diagnostics = schedule_index
                .diagnostics()
                .iter()
                .cloned()
                .chain(collected.diagnostics.drain(..));
            for diagnostic in diagnostics {
                diagnostic.emit();
                report.diagnostics.push(diagnostic);
            }

            let root_id = collected.root.id.clone();
            if let Some(previous) = &previous_root {
                graph
                    .edges
                    .push(edge_converter.sequence_edge(previous, &root_id, &mut edge_ids));
            }

            let dependency_edges = edge_converter.dependency_edges(
                &schedule_index,
                &sid,
                &collected.visited,
                &mut edge_ids,
            );

            outcome.status = ScheduleStatus::Built {
                nodes: collected.node_count(),
                edges: dependency_edges.len(),
            };
            report.schedules.push(outcome);

            node_ids.extend(collected.ids().cloned());
            graph.nodes.push(collected.root);
            graph.nodes.extend(collected.members);
            graph.edges.extend(dependency_edges);
            previous_root = Some(root_id);
        }

        if cfg!(debug_assertions) {
            if let Err(e) = graph.verify() {
                error!("built graph violates structural invariants: {}", e);
            }
        }

        info!(
            "built schedule graph: {} schedules, {} nodes, {} edges, {} diagnostics",
            report.built_count(),
            graph.nodes.len(),
            graph.edges.len(),
            report.diagnostics.len()
        );

        (graph, report)
    }
}

fn reject(report: &mut BuildReport, mut outcome: ScheduleOutcome, reason: String) {
    let diagnostic = Diagnostic::ScheduleRejected {
        schedule: outcome.name.clone(),
        reason: reason.clone(),
    };
    diagnostic.emit();
    report.diagnostics.push(diagnostic);
    outcome.status = ScheduleStatus::Rejected { reason };
    report.schedules.push(outcome);
}

/// Build with default configuration
pub fn build_graph<S>(schedules: &[ScheduleDescriptor], selector: &S) -> ScheduleGraph
where
    S: ScheduleSelector + ?Sized,
{
    GraphBuilder::new().build(schedules, selector)
}

/// [`build_graph`] plus the build report
pub fn build_graph_with_report<S>(
    schedules: &[ScheduleDescriptor],
    selector: &S,
) -> (ScheduleGraph, BuildReport)
where
    S: ScheduleSelector + ?Sized,
{
    GraphBuilder::new().build_with_report(schedules, selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleFilter;
    use crate::shared::{EdgeKind, NodeKind};

    fn schedule(name: &str) -> ScheduleDescriptor {
        ScheduleDescriptor::new(name)
            .with_system("System(0)", "app::first")
            .with_system("System(1)", "app::second")
            .with_dependency("System(0)", "System(1)")
    }

    #[test]
    fn test_selector_filters_by_name() {
        let schedules = vec![schedule("Startup"), schedule("Update")];
        let graph = build_graph(&schedules, &ScheduleFilter::default());

        assert_eq!(graph.roots().count(), 1);
        assert!(graph.get_node("Update-1").is_some());
        assert!(graph.get_node("Startup-0").is_none());
        assert_eq!(graph.verify(), Ok(()));
    }

    #[test]
    fn test_sequence_links_consecutive_roots() {
        let schedules = vec![schedule("A"), schedule("B"), schedule("C")];
        let graph = build_graph(&schedules, &ScheduleFilter::All);

        let sequence: Vec<_> = graph
            .get_edges_by_kind(EdgeKind::Sequence)
            .into_iter()
            .map(|e| (e.source_id.as_ref(), e.target_id.as_ref()))
            .collect();
        assert_eq!(sequence, vec![("A-0", "B-1"), ("B-1", "C-2")]);
    }

    #[test]
    fn test_empty_input() {
        let (graph, report) = GraphBuilder::new().build_with_report(&[], &ScheduleFilter::All);
        assert!(graph.is_empty());
        assert!(report.schedules.is_empty());
    }

    #[test]
    fn test_ingest_failure_rejects_schedule_only() {
        let mut broken = schedule("B");
        broken.sets = None;
        let schedules = vec![schedule("A"), broken, schedule("C")];
        let (graph, report) = GraphBuilder::new().build_with_report(&schedules, &ScheduleFilter::All);

        assert_eq!(report.built_count(), 2);
        assert_eq!(report.rejected_count(), 1);
        assert_eq!(report.errors().count(), 1);
        // Chain skips the rejected schedule
        let seq = graph.get_edges_by_kind(EdgeKind::Sequence);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].source_id.as_ref(), "A-0");
        assert_eq!(seq[0].target_id.as_ref(), "C-2");
    }

    #[test]
    fn test_root_collision_rejected() {
        // Schedule 0 emits member "A-0-1"; schedule 1 named "A-0" has root "A-0-1"
        let first = ScheduleDescriptor::new("A").with_system("1", "app::one");
        let second = ScheduleDescriptor::new("A-0").with_system("x", "app::x");
        let third = ScheduleDescriptor::new("C").with_system("z", "app::z");
        let schedules = vec![first, second, third];

        let (graph, report) = GraphBuilder::new().build_with_report(&schedules, &ScheduleFilter::All);

        assert_eq!(report.rejected_count(), 1);
        assert!(matches!(
            report.schedules[1].status,
            ScheduleStatus::Rejected { .. }
        ));
        assert!(graph.get_node("A-0-1-x").is_none());
        assert_eq!(graph.get_node("A-0-1").unwrap().kind, NodeKind::System);
        let seq = graph.get_edges_by_kind(EdgeKind::Sequence);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].id.as_ref(), "A-0->C-2");
        assert_eq!(graph.verify(), Ok(()));
    }

    #[test]
    fn test_rejected_schedule_reports_only_rejection() {
        let first = ScheduleDescriptor::new("A").with_system("1", "app::one");
        let second = ScheduleDescriptor::new("A-0")
            .with_system("x", "app::x")
            .with_hierarchy("x", Vec::<String>::new(), ["ghost"]);

        let (_, report) =
            GraphBuilder::new().build_with_report(&[first, second], &ScheduleFilter::All);

        let findings: Vec<_> = report
            .diagnostics
            .iter()
            .filter(|d| d.schedule() == "A-0")
            .collect();
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0], Diagnostic::ScheduleRejected { .. }));
    }

    #[test]
    fn test_configured_build_uses_config_filter() {
        let config = BuildConfig::default().with_schedules(ScheduleFilter::only(["Startup"]));
        let builder = GraphBuilder::with_config(config);
        let (graph, report) = builder.build_configured(&[schedule("Startup"), schedule("Update")]);

        assert!(graph.get_node("Startup-0").is_some());
        assert_eq!(report.schedules[1].status, ScheduleStatus::NotSelected);
    }
}

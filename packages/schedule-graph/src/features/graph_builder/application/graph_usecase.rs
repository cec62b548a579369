//! Graph Builder UseCase

use crate::config::BuildConfig;
use crate::features::graph_builder::domain::{BuildReport, ScheduleGraph};
use crate::features::graph_builder::infrastructure::GraphBuilder;
use crate::features::schedule_ingest::ScheduleDescriptor;

/// Graph Builder UseCase Trait
pub trait GraphBuilderUseCase: Send + Sync {
    /// Build with the use case's configured schedule selection
    fn build_graph(&self, schedules: &[ScheduleDescriptor]) -> GraphBuildResult;
}

#[derive(Debug, Clone, Default)]
pub struct GraphBuildResult {
    pub graph: ScheduleGraph,
    pub report: BuildReport,
}

impl GraphBuildResult {
    /// True when at least one schedule was rejected
    pub fn has_errors(&self) -> bool {
        self.report.errors().next().is_some()
    }
}

/// Graph Builder UseCase Implementation
#[derive(Debug, Default)]
pub struct GraphBuilderUseCaseImpl {
    builder: GraphBuilder,
}

impl GraphBuilderUseCaseImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            builder: GraphBuilder::with_config(config),
        }
    }
}

impl GraphBuilderUseCase for GraphBuilderUseCaseImpl {
    fn build_graph(&self, schedules: &[ScheduleDescriptor]) -> GraphBuildResult {
        let (graph, report) = self.builder.build_configured(schedules);
        GraphBuildResult { graph, report }
    }
}

// Schedule Indexer - Raw Descriptor → Lookup Tables
//
// Pure function of one descriptor. Structural problems (missing name tables,
// empty name) fail the schedule; dangling ids only produce diagnostics.

use ahash::AHashSet;
use tracing::debug;

use crate::features::schedule_ingest::domain::{
    IngestError, IngestResult, ScheduleDescriptor, ScheduleIndex,
};
use crate::shared::{Diagnostic, RelationSite};

#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduleIndexer;

impl ScheduleIndexer {
    pub fn new() -> Self {
        Self
    }

    pub fn index(&self, descriptor: &ScheduleDescriptor) -> IngestResult<ScheduleIndex> {
        if descriptor.name.is_empty() {
            return Err(IngestError::EmptyName);
        }
        let systems = descriptor
            .systems
            .as_ref()
            .ok_or_else(|| IngestError::MissingField {
                schedule: descriptor.name.clone(),
                field: "systems",
            })?;
        let sets = descriptor
            .sets
            .as_ref()
            .ok_or_else(|| IngestError::MissingField {
                schedule: descriptor.name.clone(),
                field: "sets",
            })?;

        let mut index = ScheduleIndex {
            name: descriptor.name.clone(),
            ..ScheduleIndex::default()
        };

        // Name tables: first occurrence of an id wins
        for system in systems {
            if !index.system_names.contains_key(&system.id) {
                index.system_order.push(system.id.clone());
                index
                    .system_names
                    .insert(system.id.clone(), system.name.clone());
            }
        }
        for set in sets {
            if !index.set_names.contains_key(&set.id) {
                index.set_order.push(set.id.clone());
                index.set_names.insert(set.id.clone(), set.name.clone());
            }
        }

        // Hierarchy: repeated entries for one id are merged
        for relation in &descriptor.hierarchy {
            if !index.hierarchy.contains_key(&relation.id) {
                index.hierarchy_order.push(relation.id.clone());
            }
            let entry = index.hierarchy.entry(relation.id.clone()).or_default();
            extend_unique(&mut entry.children, &relation.children);
            extend_unique(&mut entry.parents, &relation.parents);
        }

        index.dependencies = descriptor.dependencies.clone();
        index.diagnostics = self.check_references(&index);

        debug!(
            "indexed schedule '{}': {} systems, {} sets, {} hierarchy entries, {} dependencies",
            index.name,
            index.system_order.len(),
            index.set_order.len(),
            index.hierarchy_order.len(),
            index.dependencies.len()
        );

        Ok(index)
    }

    /// Report every relation id that is neither a system nor a set
    fn check_references(&self, index: &ScheduleIndex) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut reported = AHashSet::new();

        for id in &index.hierarchy_order {
            report_unknown(index, &mut reported, id, RelationSite::HierarchyNode, &mut diagnostics);
            if let Some(entry) = index.hierarchy.get(id) {
                for child in &entry.children {
                    report_unknown(index, &mut reported, child, RelationSite::HierarchyChild, &mut diagnostics);
                }
                for parent in &entry.parents {
                    report_unknown(index, &mut reported, parent, RelationSite::HierarchyParent, &mut diagnostics);
                }
            }
        }
        for dep in &index.dependencies {
            report_unknown(index, &mut reported, &dep.source, RelationSite::DependencySource, &mut diagnostics);
            report_unknown(index, &mut reported, &dep.target, RelationSite::DependencyTarget, &mut diagnostics);
        }

        diagnostics
    }
}

fn report_unknown<'a>(
    index: &ScheduleIndex,
    reported: &mut AHashSet<(&'a str, RelationSite)>,
    id: &'a str,
    site: RelationSite,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if index.is_known(id) || !reported.insert((id, site)) {
        return;
    }
    diagnostics.push(Diagnostic::UnknownReference {
        schedule: index.name.clone(),
        id: id.to_string(),
        site,
    });
}

/// Index one descriptor with the default indexer
pub fn index_schedule(descriptor: &ScheduleDescriptor) -> IngestResult<ScheduleIndex> {
    ScheduleIndexer::new().index(descriptor)
}

fn extend_unique(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

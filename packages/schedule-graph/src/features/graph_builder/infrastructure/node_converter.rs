// Node Converter - Schedule Index → Graph Nodes
//
// Collects one schedule's nodes into a flat arena, then wires parents and
// children so the result is a tree rooted at the schedule node.
//
// # Algorithm
// 1. Collect raw ids from three work-lists (hierarchy keys, systems, sets),
//    skipping ids already visited
// 2. Resolve kind and label per collected id
// 3. Resolve parent: first listed parent that is a collected set, else root
// 4. Break parent cycles by re-attaching the closing node to the root
// 5. Derive child lists from the resolved parent pointers

use ahash::{AHashMap, AHashSet};
use tracing::debug;

use super::namespace::{label_from_qualified_name, node_id, resolve_kind};
use crate::config::BuildConfig;
use crate::features::graph_builder::domain::GraphNode;
use crate::features::schedule_ingest::ScheduleIndex;
use crate::shared::{Diagnostic, InternedString, NodeKind};

/// Nodes of one schedule, not yet merged into the output graph
#[derive(Debug, Clone)]
pub struct CollectedSchedule {
    pub root: GraphNode,
    /// Members in collection order
    pub members: Vec<GraphNode>,
    /// Namespaced ids of every collected member
    pub visited: AHashSet<InternedString>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectedSchedule {
    /// Root id followed by member ids
    pub fn ids(&self) -> impl Iterator<Item = &InternedString> {
        std::iter::once(&self.root.id).chain(self.members.iter().map(|n| &n.id))
    }

    pub fn node_count(&self) -> usize {
        self.members.len() + 1
    }
}

/// Arena slot for one collected raw id
struct Slot<'a> {
    raw: &'a str,
    id: InternedString,
    kind: NodeKind,
    label: String,
    raw_children: &'a [String],
    /// Resolved parent slot; None means the schedule root
    parent: Option<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Grounded,
}

pub struct NodeConverter<'c> {
    config: &'c BuildConfig,
}

impl<'c> NodeConverter<'c> {
    pub fn new(config: &'c BuildConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, index: &ScheduleIndex, schedule_id: &InternedString) -> CollectedSchedule {
        let mut diagnostics = Vec::new();
        let mut visited = AHashSet::new();

        // Phase 1: work-lists
        let mut collected: Vec<&str> = Vec::new();
        let worklist = index
            .hierarchy_ids()
            .chain(index.system_ids())
            .chain(index.set_ids());
        for raw in worklist {
            collect(raw, schedule_id, &mut visited, &mut collected);
        }

        let raw_to_slot: AHashMap<&str, usize> = collected
            .iter()
            .enumerate()
            .map(|(slot, raw)| (*raw, slot))
            .collect();

        // Phase 2: kind + label
        let mut slots: Vec<Slot<'_>> = collected
            .iter()
            .map(|&raw| self.make_slot(index, schedule_id, raw, &mut diagnostics))
            .collect();

        // Phase 3: parents
        for slot in 0..slots.len() {
            let parent = self.resolve_parent(index, &slots, &raw_to_slot, slot, &mut diagnostics);
            slots[slot].parent = parent;
        }

        // Phase 4: cycles
        break_parent_cycles(index, &mut slots, &mut diagnostics);

        // Phase 5: children
        let (root_children, children) = derive_children(&slots, &raw_to_slot);

        let root = GraphNode {
            id: schedule_id.clone(),
            kind: NodeKind::Schedule,
            label: index.name().to_string(),
            child_ids: root_children.iter().map(|&s| slots[s].id.clone()).collect(),
            parent_id: None,
        };

        let members: Vec<GraphNode> = slots
            .iter()
            .zip(children)
            .map(|(slot, child_slots)| GraphNode {
                id: slot.id.clone(),
                kind: slot.kind,
                label: slot.label.clone(),
                child_ids: child_slots.iter().map(|&c| slots[c].id.clone()).collect(),
                parent_id: Some(match slot.parent {
                    Some(p) => slots[p].id.clone(),
                    None => schedule_id.clone(),
                }),
            })
            .collect();

        debug!(
            "collected schedule '{}': {} nodes, {} top-level",
            schedule_id,
            members.len(),
            root.child_ids.len()
        );

        CollectedSchedule {
            root,
            members,
            visited,
            diagnostics,
        }
    }

    fn make_slot<'a>(
        &self,
        index: &'a ScheduleIndex,
        schedule_id: &str,
        raw: &'a str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Slot<'a> {
        let kind = resolve_kind(index, raw, &self.config.set_id_prefix);
        let qualified = match kind {
            NodeKind::Set => index.set_name(raw).or_else(|| index.system_name(raw)),
            _ => index.system_name(raw).or_else(|| index.set_name(raw)),
        };
        let label = match qualified {
            Some(name) => label_from_qualified_name(name, &self.config.label_separator).to_string(),
            None => {
                diagnostics.push(Diagnostic::UnresolvedName {
                    schedule: index.name().to_string(),
                    node_id: raw.to_string(),
                });
                self.config.unknown_label.clone()
            }
        };
        let raw_children = index
            .hierarchy_entry(raw)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[]);

        Slot {
            raw,
            id: node_id(schedule_id, raw),
            kind,
            label,
            raw_children,
            parent: None,
        }
    }

    /// First listed parent that was collected as a set
    fn resolve_parent(
        &self,
        index: &ScheduleIndex,
        slots: &[Slot<'_>],
        raw_to_slot: &AHashMap<&str, usize>,
        slot: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<usize> {
        let raw = slots[slot].raw;
        let parents = match index.hierarchy_entry(raw) {
            Some(entry) if !entry.is_top_level() => &entry.parents,
            _ => return None,
        };

        let chosen = parents.iter().find_map(|p| {
            raw_to_slot
                .get(p.as_str())
                .copied()
                .filter(|&s| slots[s].kind == NodeKind::Set)
        });

        match chosen {
            Some(parent) => {
                if parents.len() > 1 {
                    diagnostics.push(Diagnostic::MultipleParents {
                        schedule: index.name().to_string(),
                        node_id: raw.to_string(),
                        parents: parents.clone(),
                        chosen: slots[parent].raw.to_string(),
                    });
                }
                Some(parent)
            }
            None => {
                diagnostics.push(Diagnostic::DetachedParent {
                    schedule: index.name().to_string(),
                    node_id: raw.to_string(),
                    parents: parents.clone(),
                });
                None
            }
        }
    }
}

/// Mark `raw` visited; no-op when already collected
fn collect<'a>(
    raw: &'a str,
    schedule_id: &str,
    visited: &mut AHashSet<InternedString>,
    collected: &mut Vec<&'a str>,
) {
    if visited.insert(node_id(schedule_id, raw)) {
        collected.push(raw);
    }
}

/// Walk each parent chain; a chain that re-enters itself is cut at the node
/// whose pointer closes the loop.
fn break_parent_cycles(
    index: &ScheduleIndex,
    slots: &mut [Slot<'_>],
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut marks = vec![Mark::Unvisited; slots.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..slots.len() {
        path.clear();
        let mut current = start;
        loop {
            match marks[current] {
                Mark::Grounded => break,
                Mark::OnPath => {
                    if let Some(&closer) = path.last() {
                        slots[closer].parent = None;
                        diagnostics.push(Diagnostic::ParentCycle {
                            schedule: index.name().to_string(),
                            node_id: slots[closer].raw.to_string(),
                        });
                    }
                    break;
                }
                Mark::Unvisited => {
                    marks[current] = Mark::OnPath;
                    path.push(current);
                    match slots[current].parent {
                        Some(parent) => current = parent,
                        None => break,
                    }
                }
            }
        }
        for &slot in &path {
            marks[slot] = Mark::Grounded;
        }
    }
}

/// Children per slot plus the root's children. Listed children keep their
/// listed order; remaining resolved children follow in collection order.
fn derive_children(
    slots: &[Slot<'_>],
    raw_to_slot: &AHashMap<&str, usize>,
) -> (Vec<usize>, Vec<Vec<usize>>) {
    let mut root_children = Vec::new();
    let mut resolved: Vec<Vec<usize>> = vec![Vec::new(); slots.len()];
    for (slot, data) in slots.iter().enumerate() {
        match data.parent {
            Some(parent) => resolved[parent].push(slot),
            None => root_children.push(slot),
        }
    }

    let children = slots
        .iter()
        .enumerate()
        .map(|(slot, data)| {
            let own = &resolved[slot];
            if own.is_empty() {
                return Vec::new();
            }
            let mut ordered = Vec::with_capacity(own.len());
            let mut seen = AHashSet::with_capacity(own.len());
            for raw_child in data.raw_children {
                if let Some(&child) = raw_to_slot.get(raw_child.as_str()) {
                    if slots[child].parent == Some(slot) && seen.insert(child) {
                        ordered.push(child);
                    }
                }
            }
            for &child in own {
                if seen.insert(child) {
                    ordered.push(child);
                }
            }
            ordered
        })
        .collect();

    (root_children, children)
}

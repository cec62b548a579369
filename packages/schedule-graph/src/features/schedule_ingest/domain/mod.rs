// Schedule Ingestion Domain Models
//
// Raw relational description of one schedule, as decoded from a snapshot,
// and the indexed lookup form the graph builder consumes.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::Diagnostic;

// ============================================================
// Raw Descriptor
// ============================================================

/// Leaf unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub id: String,
    /// Fully qualified name, `::` separated
    pub name: String,
}

/// Named grouping of systems and sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetInfo {
    pub id: String,
    pub name: String,
}

/// Containment entry: `id` sits inside every set in `parents`
/// and contains everything in `children`.
///
/// On the wire this is the triple `[id, children, parents]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(String, Vec<String>, Vec<String>)",
    into = "(String, Vec<String>, Vec<String>)"
)]
pub struct HierarchyRelation {
    pub id: String,
    pub children: Vec<String>,
    pub parents: Vec<String>,
}

impl From<(String, Vec<String>, Vec<String>)> for HierarchyRelation {
    fn from((id, children, parents): (String, Vec<String>, Vec<String>)) -> Self {
        Self {
            id,
            children,
            parents,
        }
    }
}

impl From<HierarchyRelation> for (String, Vec<String>, Vec<String>) {
    fn from(rel: HierarchyRelation) -> Self {
        (rel.id, rel.children, rel.parents)
    }
}

/// `target` must run after `source`. On the wire: `[source, target]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct DependencyRelation {
    pub source: String,
    pub target: String,
}

impl From<(String, String)> for DependencyRelation {
    fn from((source, target): (String, String)) -> Self {
        Self { source, target }
    }
}

impl From<DependencyRelation> for (String, String) {
    fn from(rel: DependencyRelation) -> Self {
        (rel.source, rel.target)
    }
}

/// One schedule as received from the inspected application.
///
/// `systems` and `sets` are optional only so that a payload missing them can
/// still be decoded and then rejected by ingestion for this schedule alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDescriptor {
    pub name: String,
    #[serde(default)]
    pub systems: Option<Vec<SystemInfo>>,
    #[serde(default)]
    pub sets: Option<Vec<SetInfo>>,
    #[serde(default)]
    pub hierarchy: Vec<HierarchyRelation>,
    #[serde(default)]
    pub dependencies: Vec<DependencyRelation>,
}

impl ScheduleDescriptor {
    /// Empty schedule with both name tables present
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            systems: Some(Vec::new()),
            sets: Some(Vec::new()),
            hierarchy: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_system(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.systems.get_or_insert_with(Vec::new).push(SystemInfo {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn with_set(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.sets.get_or_insert_with(Vec::new).push(SetInfo {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn with_hierarchy<C, P>(mut self, id: impl Into<String>, children: C, parents: P) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        self.hierarchy.push(HierarchyRelation {
            id: id.into(),
            children: children.into_iter().map(Into::into).collect(),
            parents: parents.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_dependency(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.dependencies.push(DependencyRelation {
            source: source.into(),
            target: target.into(),
        });
        self
    }
}

// ============================================================
// Indexed Form
// ============================================================

/// Children and parents of one hierarchy member, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyEntry {
    pub children: Vec<String>,
    pub parents: Vec<String>,
}

impl HierarchyEntry {
    /// No listed parents: a direct member of the schedule
    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Lookup tables for one schedule.
///
/// Iteration orders mirror the descriptor: hierarchy entries by first
/// appearance, systems and sets by list position.
#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    pub(crate) name: String,
    pub(crate) hierarchy_order: Vec<String>,
    pub(crate) hierarchy: AHashMap<String, HierarchyEntry>,
    pub(crate) system_order: Vec<String>,
    pub(crate) system_names: AHashMap<String, String>,
    pub(crate) set_order: Vec<String>,
    pub(crate) set_names: AHashMap<String, String>,
    pub(crate) dependencies: Vec<DependencyRelation>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl ScheduleIndex {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hierarchy member ids in first-appearance order
    pub fn hierarchy_ids(&self) -> impl Iterator<Item = &str> {
        self.hierarchy_order.iter().map(String::as_str)
    }

    pub fn hierarchy_entry(&self, id: &str) -> Option<&HierarchyEntry> {
        self.hierarchy.get(id)
    }

    pub fn system_ids(&self) -> impl Iterator<Item = &str> {
        self.system_order.iter().map(String::as_str)
    }

    pub fn set_ids(&self) -> impl Iterator<Item = &str> {
        self.set_order.iter().map(String::as_str)
    }

    pub fn system_name(&self, id: &str) -> Option<&str> {
        self.system_names.get(id).map(String::as_str)
    }

    pub fn set_name(&self, id: &str) -> Option<&str> {
        self.set_names.get(id).map(String::as_str)
    }

    pub fn is_system(&self, id: &str) -> bool {
        self.system_names.contains_key(id)
    }

    pub fn is_set(&self, id: &str) -> bool {
        self.set_names.contains_key(id)
    }

    /// Listed as a system or a set
    pub fn is_known(&self, id: &str) -> bool {
        self.is_system(id) || self.is_set(id)
    }

    /// Will be emitted as a node by the graph builder
    pub fn is_member(&self, id: &str) -> bool {
        self.hierarchy.contains_key(id) || self.is_known(id)
    }

    pub fn dependencies(&self) -> &[DependencyRelation] {
        &self.dependencies
    }

    /// Data-quality findings raised while indexing
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

// ============================================================
// Errors
// ============================================================

/// Structural violation that makes one schedule unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("schedule '{schedule}' is missing its '{field}' list")]
    MissingField {
        schedule: String,
        field: &'static str,
    },

    #[error("schedule name is empty")]
    EmptyName,
}

pub type IngestResult<T> = Result<T, IngestError>;

//! Non-fatal findings raised while ingesting schedules and building the graph
//!
//! Findings are buffered per schedule and logged through `tracing` when the
//! builder merges them into the build report, so log and report agree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How bad a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Where inside a schedule a dangling id was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationSite {
    HierarchyNode,
    HierarchyChild,
    HierarchyParent,
    DependencySource,
    DependencyTarget,
}

impl RelationSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationSite::HierarchyNode => "hierarchy node",
            RelationSite::HierarchyChild => "hierarchy child",
            RelationSite::HierarchyParent => "hierarchy parent",
            RelationSite::DependencySource => "dependency source",
            RelationSite::DependencyTarget => "dependency target",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A relation names an id found in neither the systems nor the sets list
    UnknownReference {
        schedule: String,
        id: String,
        site: RelationSite,
    },

    /// Node emitted with the unknown-label marker
    UnresolvedName { schedule: String, node_id: String },

    /// Node lists several parents; the first usable one was kept
    MultipleParents {
        schedule: String,
        node_id: String,
        parents: Vec<String>,
        chosen: String,
    },

    /// None of the listed parents is part of the graph; node hangs off the root
    DetachedParent {
        schedule: String,
        node_id: String,
        parents: Vec<String>,
    },

    /// Parent pointers looped; node re-attached to the schedule root
    ParentCycle { schedule: String, node_id: String },

    /// Schedule left out of the graph entirely
    ScheduleRejected { schedule: String, reason: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::ScheduleRejected { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Name of the schedule the diagnostic belongs to
    pub fn schedule(&self) -> &str {
        match self {
            Diagnostic::UnknownReference { schedule, .. }
            | Diagnostic::UnresolvedName { schedule, .. }
            | Diagnostic::MultipleParents { schedule, .. }
            | Diagnostic::DetachedParent { schedule, .. }
            | Diagnostic::ParentCycle { schedule, .. }
            | Diagnostic::ScheduleRejected { schedule, .. } => schedule,
        }
    }

    /// Log through `tracing` at the level matching the severity
    pub fn emit(&self) {
        match self.severity() {
            Severity::Warning => tracing::warn!(schedule = self.schedule(), "{}", self),
            Severity::Error => tracing::error!(schedule = self.schedule(), "{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownReference { id, site, .. } => write!(
                f,
                "{} '{}' is neither a known system nor a known set",
                site.as_str(),
                id
            ),
            Diagnostic::UnresolvedName { node_id, .. } => {
                write!(f, "no qualified name for node '{}'", node_id)
            }
            Diagnostic::MultipleParents {
                node_id,
                parents,
                chosen,
                ..
            } => write!(
                f,
                "node '{}' has {} parents [{}], using '{}'",
                node_id,
                parents.len(),
                parents.join(", "),
                chosen
            ),
            Diagnostic::DetachedParent {
                node_id, parents, ..
            } => write!(
                f,
                "node '{}' lists parents [{}] but none are in the graph, attaching to schedule root",
                node_id,
                parents.join(", ")
            ),
            Diagnostic::ParentCycle { node_id, .. } => write!(
                f,
                "parent chain of node '{}' loops back on itself, attaching to schedule root",
                node_id
            ),
            Diagnostic::ScheduleRejected { reason, .. } => {
                write!(f, "schedule skipped: {}", reason)
            }
        }
    }
}

//! Core graph vocabulary shared by every feature
//!
//! Ids are interned `Arc<str>` so node ids, parent pointers and child lists
//! share one allocation per id.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

// ============================================================
// String Interning
// ============================================================

/// Interned string; clones share the same allocation
pub type InternedString = Arc<str>;

/// Helper to create interned strings
#[inline]
pub fn intern(s: impl AsRef<str>) -> InternedString {
    Arc::from(s.as_ref())
}

// ============================================================
// Custom Serde for Arc<str>
// ============================================================

/// Serialize Arc<str> as a regular string
pub fn serialize_arc_str<S>(arc_str: &Arc<str>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(arc_str.as_ref())
}

/// Deserialize string into Arc<str>
pub fn deserialize_arc_str<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Arc::from(s.as_str()))
}

/// Serialize Option<Arc<str>>
pub fn serialize_option_arc_str<S>(opt: &Option<Arc<str>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match opt {
        Some(arc_str) => serializer.serialize_some(arc_str.as_ref()),
        None => serializer.serialize_none(),
    }
}

/// Deserialize Option<Arc<str>>
pub fn deserialize_option_arc_str<'de, D>(deserializer: D) -> Result<Option<Arc<str>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.map(|s| Arc::from(s.as_str())))
}

/// Serialize Vec<Arc<str>>
#[allow(clippy::ptr_arg)]
pub fn serialize_vec_arc_str<S>(vec: &Vec<Arc<str>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let string_vec: Vec<&str> = vec.iter().map(|s| s.as_ref()).collect();
    string_vec.serialize(serializer)
}

/// Deserialize Vec<Arc<str>>
pub fn deserialize_vec_arc_str<'de, D>(deserializer: D) -> Result<Vec<Arc<str>>, D::Error>
where
    D: Deserializer<'de>,
{
    let string_vec = Vec::<String>::deserialize(deserializer)?;
    Ok(string_vec
        .into_iter()
        .map(|s| Arc::from(s.as_str()))
        .collect())
}

// ============================================================
// Node / Edge Kinds
// ============================================================

/// What a graph node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of one schedule; never has a parent
    Schedule,
    /// Named grouping of systems and sets
    Set,
    /// Leaf unit of work
    System,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Schedule => "schedule",
            NodeKind::Set => "set",
            NodeKind::System => "system",
        }
    }

    /// Whether nodes of this kind may contain other nodes
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Schedule | NodeKind::Set)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of an ordering edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// "target runs after source" inside one schedule
    Dependency,
    /// Run order between two consecutive included schedules
    Sequence,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Dependency => "dependency",
            EdgeKind::Sequence => "sequence",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

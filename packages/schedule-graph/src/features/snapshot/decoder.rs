// Snapshot Decoder - JSON Payload → Schedule Descriptors
//
// Accepted shapes:
// - bare array of schedules
// - message object `{"kind": "schedules", "schedules": [...]}`
//
// Per schedule, both the descriptor field names (`hierarchy`, `dependencies`)
// and the inspected application's names (`hierarchy_nodes`,
// `dependancy_edges`, `dependancy_nodes`) are understood. When both spellings
// are present the descriptor names win. `hierarchy_edges` is redundant with
// the hierarchy triples and ignored.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::features::schedule_ingest::{
    DependencyRelation, HierarchyRelation, ScheduleDescriptor, SetInfo, SystemInfo,
};

const SCHEDULES_KIND: &str = "schedules";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected message kind '{0}'")]
    UnexpectedMessage(String),
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// `(id, outgoing, incoming)` as sent for dependency graph nodes
type DependencyNode = (String, Vec<String>, Vec<String>);

#[derive(Debug, Deserialize)]
struct WireSchedule {
    name: String,
    #[serde(default)]
    systems: Option<Vec<SystemInfo>>,
    #[serde(default)]
    sets: Option<Vec<SetInfo>>,
    #[serde(default)]
    hierarchy: Option<Vec<HierarchyRelation>>,
    #[serde(default)]
    hierarchy_nodes: Option<Vec<HierarchyRelation>>,
    #[serde(default)]
    dependencies: Option<Vec<DependencyRelation>>,
    #[serde(default)]
    dependancy_edges: Option<Vec<DependencyRelation>>,
    #[serde(default)]
    dependancy_nodes: Vec<DependencyNode>,
}

impl From<WireSchedule> for ScheduleDescriptor {
    fn from(wire: WireSchedule) -> Self {
        // Descriptor names win when a payload carries both spellings
        let hierarchy = wire.hierarchy.or(wire.hierarchy_nodes).unwrap_or_default();
        let dependencies = match wire.dependencies.or(wire.dependancy_edges) {
            Some(pairs) => pairs,
            None => wire
                .dependancy_nodes
                .into_iter()
                .flat_map(|(source, outgoing, _incoming)| {
                    outgoing.into_iter().map(move |target| DependencyRelation {
                        source: source.clone(),
                        target,
                    })
                })
                .collect(),
        };

        ScheduleDescriptor {
            name: wire.name,
            systems: wire.systems,
            sets: wire.sets,
            hierarchy,
            dependencies,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SchedulesMessage {
    schedules: Vec<WireSchedule>,
}

/// Decode a schedule-list payload
pub fn decode_schedules(payload: &str) -> DecodeResult<Vec<ScheduleDescriptor>> {
    let value: Value = serde_json::from_str(payload)?;
    decode_schedules_value(value)
}

/// Decode an already parsed payload
pub fn decode_schedules_value(value: Value) -> DecodeResult<Vec<ScheduleDescriptor>> {
    let wire: Vec<WireSchedule> = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        Value::Object(ref fields) => {
            let kind = fields.get("kind").and_then(Value::as_str).unwrap_or_default();
            if kind != SCHEDULES_KIND {
                return Err(DecodeError::UnexpectedMessage(kind.to_string()));
            }
            serde_json::from_value::<SchedulesMessage>(value)?.schedules
        }
        other => {
            return Err(DecodeError::UnexpectedMessage(json_type(&other).to_string()));
        }
    };

    debug!("decoded snapshot with {} schedules", wire.len());
    Ok(wire.into_iter().map(ScheduleDescriptor::from).collect())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

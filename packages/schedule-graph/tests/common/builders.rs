//! Test data builders

use schedule_graph::ScheduleDescriptor;
use serde_json::{json, Value};

/// Builds snapshot payloads in the inspected application's wire format
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    schedules: Vec<ScheduleDescriptor>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(mut self, schedule: ScheduleDescriptor) -> Self {
        self.schedules.push(schedule);
        self
    }

    pub fn with_schedules(mut self, schedules: impl IntoIterator<Item = ScheduleDescriptor>) -> Self {
        self.schedules.extend(schedules);
        self
    }

    pub fn descriptors(&self) -> Vec<ScheduleDescriptor> {
        self.schedules.clone()
    }

    /// `{"kind": "schedules", "schedules": [...]}` with `hierarchy_nodes`,
    /// `hierarchy_edges`, `dependancy_nodes` and `dependancy_edges`
    pub fn to_message(&self) -> Value {
        let schedules: Vec<Value> = self.schedules.iter().map(wire_schedule).collect();
        json!({ "kind": "schedules", "schedules": schedules })
    }

    pub fn to_payload(&self) -> String {
        self.to_message().to_string()
    }
}

fn wire_schedule(desc: &ScheduleDescriptor) -> Value {
    let hierarchy_edges: Vec<Value> = desc
        .hierarchy
        .iter()
        .flat_map(|rel| rel.children.iter().map(move |c| json!([rel.id, c])))
        .collect();

    // (id, outgoing, incoming) per endpoint, first appearance order
    let mut dependency_nodes: Vec<(String, Vec<String>, Vec<String>)> = Vec::new();
    for dep in &desc.dependencies {
        for id in [&dep.source, &dep.target] {
            if !dependency_nodes.iter().any(|(n, _, _)| n == id) {
                dependency_nodes.push((id.clone(), Vec::new(), Vec::new()));
            }
        }
        for node in dependency_nodes.iter_mut() {
            if node.0 == dep.source {
                node.1.push(dep.target.clone());
            }
            if node.0 == dep.target {
                node.2.push(dep.source.clone());
            }
        }
    }

    json!({
        "name": desc.name,
        "systems": desc.systems,
        "sets": desc.sets,
        "hierarchy_nodes": desc.hierarchy,
        "hierarchy_edges": hierarchy_edges,
        "dependancy_nodes": dependency_nodes,
        "dependancy_edges": desc.dependencies,
    })
}

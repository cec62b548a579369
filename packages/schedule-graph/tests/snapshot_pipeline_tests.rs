//! Snapshot → graph → layout pipeline tests
//!
//! Drives the crate the way an inspector front end does: decode a pushed
//! payload, publish the rebuilt graph, hand it to the layout engine, read
//! positions back.

mod common;

use std::sync::Arc;

use common::*;
use pretty_assertions::assert_eq;
use schedule_graph::features::layout::{
    flatten_positions, to_layout_graph, LayoutAdapter, LayoutGraph, LayoutOptions, NodeSize,
};
use schedule_graph::{
    decode_schedules, BuildConfig, GraphBuilder, GraphBuilderUseCase, GraphBuilderUseCaseImpl,
    GraphNode, GraphStore, NodeKind, ScheduleDescriptor, ScheduleFilter, ScheduleGraphError,
};
use serde_json::json;

const INSPECTOR_CONFIG: &str = r#"
schedules:
  mode: except
  names: [Startup]
unknown_label: "(unnamed)"
"#;

fn inspector_builder() -> GraphBuilder {
    GraphBuilder::with_config(BuildConfig::from_yaml_str(INSPECTOR_CONFIG).unwrap())
}

fn snapshot() -> SnapshotBuilder {
    SnapshotBuilder::new().with_schedules([
        ScheduleDescriptor::new("Startup").with_system("System(0)", "app::setup"),
        fixture_update_schedule(),
        fixture_schedule_b(),
    ])
}

#[test]
fn test_wire_payload_matches_direct_build() {
    let snapshot = snapshot();
    let decoded = decode_schedules(&snapshot.to_payload()).unwrap();
    assert_eq!(decoded, snapshot.descriptors());

    let builder = inspector_builder();
    let (from_wire, _) = builder.build_configured(&decoded);
    let (direct, _) = builder.build_configured(&snapshot.descriptors());
    assert_eq!(from_wire, direct);
}

#[test]
fn test_store_publishes_decoded_snapshot() {
    let store = GraphStore::new();
    let builder = inspector_builder();

    let generation = store.apply_payload(&builder, &snapshot().to_payload()).unwrap();
    assert_eq!(generation, 1);

    let graph = store.current();
    let roots: Vec<&str> = graph.roots().map(|r| r.id.as_ref()).collect();
    assert_eq!(roots, vec!["Update-1", "B-2"]);
    assert_graph_valid(&graph);

    let published = store.snapshot();
    assert_eq!(published.report.built_count(), 2);
    assert!(Arc::ptr_eq(&published.graph, &graph));
}

#[test]
fn test_unexpected_message_leaves_store_untouched() {
    let store = GraphStore::new();
    let builder = inspector_builder();
    store.apply_payload(&builder, &snapshot().to_payload()).unwrap();

    let entities = json!({"kind": "entities", "entities": []}).to_string();
    let err: ScheduleGraphError = store.apply_payload(&builder, &entities).unwrap_err().into();
    assert!(err.to_string().contains("entities"));
    assert_eq!(store.generation(), 1);
}

#[test]
fn test_usecase_over_decoded_payload() {
    let decoded = decode_schedules(&snapshot().to_payload()).unwrap();
    let usecase = GraphBuilderUseCaseImpl::with_config(BuildConfig::default());
    let result = usecase.build_graph(&decoded);

    // Default selection: Update only
    assert_eq!(result.graph.roots().count(), 1);
    assert_eq!(result.report.built_count(), 1);
}

#[test]
fn test_layout_round_trip() {
    let builder = inspector_builder();
    let (graph, _) = builder.build_configured(&snapshot().descriptors());

    let measure = |node: &GraphNode| -> Option<NodeSize> {
        match node.kind {
            NodeKind::System => Some(NodeSize::new(150.0, 36.0)),
            _ => None,
        }
    };
    let layout = to_layout_graph(&graph, &measure);

    // Every node appears exactly once in the nested tree
    let mut placed = flatten_positions(&layout)
        .into_iter()
        .map(|p| p.id)
        .collect::<Vec<_>>();
    placed.sort();
    let mut expected: Vec<String> = graph.nodes.iter().map(|n| n.id.to_string()).collect();
    expected.sort();
    assert_eq!(placed, expected);
    assert_eq!(layout.edges.len(), graph.edges.len());

    // Pretend the engine laid it out: positions come back on the same ids
    let mut laid_out: LayoutGraph =
        serde_json::from_value(serde_json::to_value(&layout).unwrap()).unwrap();
    for (i, child) in laid_out.children.iter_mut().enumerate() {
        child.x = Some(0.0);
        child.y = Some(i as f64 * 400.0);
    }
    let positions = flatten_positions(&laid_out);
    assert_eq!(positions[0].id, "Update-1");
    let b_root = positions.iter().find(|p| p.id == "B-2").unwrap();
    assert_eq!((b_root.x, b_root.y), (0.0, 400.0));
    let nested = positions.iter().find(|p| p.id == "B-2-sys2").unwrap();
    assert_eq!((nested.x, nested.y), (0.0, 0.0));
}

#[test]
fn test_layout_options_from_caller() {
    let (graph, _) = GraphBuilder::with_config(
        BuildConfig::default().with_schedules(ScheduleFilter::All),
    )
    .build_configured(&[fixture_schedule_b()]);

    let mut options = LayoutOptions::new();
    options.insert("elk.direction".to_string(), "RIGHT".to_string());
    let unmeasured = |_: &GraphNode| -> Option<NodeSize> { None };
    let layout = LayoutAdapter::new(&unmeasured)
        .with_options(options)
        .to_layout_graph(&graph);

    let value = serde_json::to_value(&layout).unwrap();
    assert_eq!(value["id"], "root");
    assert_eq!(value["layoutOptions"]["elk.direction"], "RIGHT");
    assert_eq!(value["layoutOptions"]["elk.algorithm"], "layered");
    assert_eq!(value["children"][0]["layoutOptions"], json!({"elk.direction": "RIGHT"}));
    assert_eq!(value["children"][0]["children"][0]["id"], "B-0-set1");
}

#[test]
fn test_config_file_round_trip() {
    let config = BuildConfig::from_yaml_str(INSPECTOR_CONFIG).unwrap();
    let path = std::env::temp_dir().join(format!(
        "schedule-graph-config-{}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, config.to_yaml().unwrap()).unwrap();

    let loaded = BuildConfig::from_yaml_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, config);
    assert_eq!(loaded.schedules, ScheduleFilter::except(["Startup"]));
}

#[test]
fn test_invalid_config_rejected() {
    let err: ScheduleGraphError = BuildConfig::from_yaml_str("label_separator: \"\"")
        .unwrap_err()
        .into();
    assert!(err.to_string().contains("label_separator"));

    assert!(BuildConfig::from_yaml_str("colour: blue").is_err());
}

//! Integration tests for the complete Storygraph pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - JSON snapshot -> Dataset (validation + indexing)
//! - Dataset -> full/ego projection
//! - Graph serialization handed to renderers
//!
//! Run with: cargo test --test integration_tests

use std::collections::HashSet;

use storygraph_model::{Dataset, ModelError};
use storygraph_projection::{project, Graph, ProjectError, Projection};

const SNAPSHOT: &str = r#"{
    "persons": [
        {"person_id": 1, "name": "George Leslie Mackay", "birth_year": 1844, "death_year": 1901,
         "occupation": "missionary", "contribution": "founded Oxford College and Tamsui's first hospital",
         "wiki_link": "https://en.wikipedia.org/wiki/George_Leslie_Mackay"},
        {"person_id": 2, "name": "Tiun Tshong-bing", "occupation": "pastor"},
        {"person_id": 3, "name": "Lin Maosheng", "occupation": "merchant"}
    ],
    "events": [
        {"event_id": 1, "event_name": "Battle of Tamsui", "event_year": 1884, "site": "Huwei fort"}
    ],
    "eras": [
        {"era_id": 1, "era_name": "Qing rule", "description": "Taiwan under the Qing dynasty"}
    ],
    "locations": [
        {"location_id": 1, "location_name": "Fort San Domingo", "location_type": "fortress", "district": "Tamsui"}
    ],
    "objects": [
        {"object_id": 1, "object_name": "Oxford College", "object_type": "building"}
    ],
    "person_person": [
        {"person_id_1": 1, "person_id_2": 2, "relationship_type": "mentor"}
    ],
    "person_event": [
        {"person_id": 1, "event_id": 1, "role": "witness"}
    ],
    "person_era": [
        {"person_id": 1, "era_id": 1}
    ],
    "person_location": [
        {"person_id": 3, "location_id": 1},
        {"person_id": 3, "location_id": 99}
    ],
    "person_object": [
        {"person_id": 1, "object_id": 1, "relation_type": "founded"}
    ]
}"#;

fn node_ids(graph: &Graph) -> HashSet<String> {
    graph.nodes.iter().map(|n| n.id.clone()).collect()
}

#[test]
fn full_projection_covers_every_entity_row() {
    let data = Dataset::from_json_str(SNAPSHOT).expect("dataset");
    let graph = project(&data, Projection::Full).expect("project");

    // 3 persons + 1 event + 1 era + 1 location + 1 object.
    assert_eq!(graph.nodes.len(), 7);
    // 5 valid relation rows; the person_location row for location 99 dangles.
    assert_eq!(graph.edges.len(), 5);
    assert!(!graph.contains_node("location:99"));

    let ids = node_ids(&graph);
    for edge in &graph.edges {
        assert!(ids.contains(&edge.source) && ids.contains(&edge.target));
    }
}

#[test]
fn ego_projection_is_scoped_to_the_seed() {
    let data = Dataset::from_json_str(SNAPSHOT).expect("dataset");
    let graph = project(&data, Projection::Ego(1)).expect("project");

    assert_eq!(
        node_ids(&graph),
        HashSet::from([
            "person:1".to_string(),
            "person:2".to_string(),
            "event:1".to_string(),
            "era:1".to_string(),
            "object:1".to_string(),
        ])
    );
    for edge in &graph.edges {
        assert!(edge.source == "person:1" || edge.target == "person:1");
    }

    // Person 2 only appears on the receiving side of the mentor row; ego
    // lookup still surfaces it, with the stored direction preserved.
    let graph = project(&data, Projection::Ego(2)).expect("project");
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, "person:1");
    assert_eq!(graph.edges[0].target, "person:2");
}

#[test]
fn attribute_resolution_flows_into_the_output() {
    let data = Dataset::from_json_str(SNAPSHOT).expect("dataset");
    let graph = project(&data, Projection::Full).expect("project");

    let mackay = graph.nodes.iter().find(|n| n.id == "person:1").expect("node");
    assert_eq!(mackay.tooltip, "founded Oxford College and Tamsui's first hospital");
    assert!(mackay.link.as_deref().unwrap_or("").contains("wikipedia"));

    let pastor = graph.nodes.iter().find(|n| n.id == "person:2").expect("node");
    assert_eq!(pastor.tooltip, "pastor");
    assert!(pastor.link.is_none());

    // Unlabeled person_era row falls back to the kind default.
    let era_edge = graph.edges.iter().find(|e| e.target == "era:1").expect("edge");
    assert_eq!(era_edge.label, "active-during");
}

#[test]
fn graph_serializes_for_custom_frontends() {
    let data = Dataset::from_json_str(SNAPSHOT).expect("dataset");
    let graph = project(&data, Projection::Full).expect("project");
    let json = serde_json::to_string(&graph).expect("serialize");
    let parsed: Graph = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed.nodes.len(), graph.nodes.len());
    assert_eq!(parsed.edges.len(), graph.edges.len());
}

#[test]
fn error_taxonomy_is_observable_from_the_outside() {
    let err = Dataset::from_json_str(r#"{"persons": [{"name": "nameless"}]}"#)
        .expect_err("invalid row");
    assert!(matches!(err, ModelError::InvalidRow { table: "persons", index: 0 }));

    let data = Dataset::from_json_str(SNAPSHOT).expect("dataset");
    let err = project(&data, Projection::Ego(404)).expect_err("missing seed");
    assert!(matches!(err, ProjectError::SeedNotFound(404)));
}

#[test]
fn snapshot_loads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tamsui.json");
    std::fs::write(&path, SNAPSHOT).expect("write");
    let data = Dataset::from_path(&path).expect("load");
    assert_eq!(data.persons().len(), 3);
}

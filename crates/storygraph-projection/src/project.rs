//! The two projection modes.
//!
//! - [`Projection::Full`]: every entity row becomes a node, then every
//!   relation row becomes an edge (dangling rows skipped).
//! - [`Projection::Ego`]: the selected person plus everything directly
//!   connected. Only relation rows incident to the seed are visited, via the
//!   dataset's per-person indexes; person-person rows are looked up in both
//!   directions but keep their stored direction on the edge.

use storygraph_model::{Dataset, EntityKind, RawId, RelationKind, RelationRow};

use crate::attrs::{
    entity_node, era_node, event_node, location_node, object_node, person_node,
};
use crate::graph::{node_id, Graph, GraphBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// The whole dataset.
    Full,
    /// Neighborhood of one person.
    Ego(RawId),
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("ego seed person {0} not found in the dataset")]
    SeedNotFound(RawId),
}

/// Project the dataset under the selected mode. Pure: same data and mode,
/// same graph.
pub fn project(data: &Dataset, mode: Projection) -> Result<Graph, ProjectError> {
    match mode {
        Projection::Full => Ok(project_full(data)),
        Projection::Ego(seed) => project_ego(data, seed),
    }
}

/// Row label if non-blank, else the kind's default.
fn edge_label(kind: RelationKind, row: &RelationRow) -> String {
    row.label
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| kind.default_label().to_string())
}

fn edge_directed(kind: RelationKind) -> bool {
    // Person-person relations are semantically directed (a mentors b);
    // the other four record a source/target pair by construction only.
    matches!(kind, RelationKind::PersonPerson)
}

fn project_full(data: &Dataset) -> Graph {
    let mut b = GraphBuilder::new();

    for row in data.persons() {
        b.add_node(person_node(row));
    }
    for row in data.events() {
        b.add_node(event_node(row));
    }
    for row in data.eras() {
        b.add_node(era_node(row));
    }
    for row in data.locations() {
        b.add_node(location_node(row));
    }
    for row in data.objects() {
        b.add_node(object_node(row));
    }

    for kind in RelationKind::ALL {
        for row in data.relations(kind) {
            let source = node_id(EntityKind::Person, row.person_id);
            let target = node_id(kind.target_kind(), row.target_id);
            if !b.has_node(&source) || !b.has_node(&target) {
                skip_dangling(kind, row);
                continue;
            }
            b.add_edge(source, target, edge_label(kind, row), edge_directed(kind));
        }
    }

    let graph = b.finish();
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "full projection complete"
    );
    graph
}

fn project_ego(data: &Dataset, seed: RawId) -> Result<Graph, ProjectError> {
    let seed_row = data.person(seed).ok_or(ProjectError::SeedNotFound(seed))?;
    let seed_node_id = node_id(EntityKind::Person, seed);

    let mut b = GraphBuilder::new();
    b.add_node(person_node(seed_row));

    // Person-to-X tables: only rows whose person side is the seed.
    for kind in [
        RelationKind::PersonEvent,
        RelationKind::PersonEra,
        RelationKind::PersonLocation,
        RelationKind::PersonObject,
    ] {
        for row in data.relations_of(kind, seed) {
            let Some(target) = entity_node(data, kind.target_kind(), row.target_id) else {
                skip_dangling(kind, row);
                continue;
            };
            let target_id = target.id.clone();
            b.add_node(target);
            b.add_edge(
                seed_node_id.clone(),
                target_id,
                edge_label(kind, row),
                edge_directed(kind),
            );
        }
    }

    // Person-person: surface both directions, stored direction preserved.
    for row in data.relations_of(RelationKind::PersonPerson, seed) {
        let Some(other) = data.person(row.target_id) else {
            skip_dangling(RelationKind::PersonPerson, row);
            continue;
        };
        b.add_node(person_node(other));
        b.add_edge(
            seed_node_id.clone(),
            node_id(EntityKind::Person, row.target_id),
            edge_label(RelationKind::PersonPerson, row),
            true,
        );
    }
    for row in data.person_relations_with(seed) {
        let Some(other) = data.person(row.person_id) else {
            skip_dangling(RelationKind::PersonPerson, row);
            continue;
        };
        b.add_node(person_node(other));
        b.add_edge(
            node_id(EntityKind::Person, row.person_id),
            seed_node_id.clone(),
            edge_label(RelationKind::PersonPerson, row),
            true,
        );
    }

    let graph = b.finish();
    tracing::debug!(
        seed,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "ego projection complete"
    );
    Ok(graph)
}

fn skip_dangling(kind: RelationKind, row: &RelationRow) {
    tracing::warn!(
        table = kind.table(),
        person = row.person_id,
        target = row.target_id,
        "skipping relation row with dangling reference"
    );
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// 3 persons (A, B, C), 1 event (E1) linked to A, one A -> B mentorship.
    fn fixture() -> Dataset {
        Dataset::from_json_str(
            r#"{
                "persons": [
                    {"person_id": 1, "name": "A", "occupation": "teacher"},
                    {"person_id": 2, "name": "B"},
                    {"person_id": 3, "name": "C"}
                ],
                "events": [{"event_id": 1, "event_name": "E1", "event_year": 1895}],
                "eras": [{"era_id": 1, "era_name": "Qing rule"}],
                "person_event": [{"person_id": 1, "event_id": 1, "role": "founder"}],
                "person_person": [{"person_id_1": 1, "person_id_2": 2, "relationship_type": "mentor"}]
            }"#,
        )
        .expect("fixture")
    }

    fn ids(graph: &Graph) -> HashSet<String> {
        graph.nodes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn full_projection_end_to_end() {
        let g = project(&fixture(), Projection::Full).expect("project");
        assert_eq!(g.nodes.len(), 5);
        assert_eq!(g.edges.len(), 2);
        let edge = g.edges.iter().find(|e| e.target == "person:2").expect("edge");
        assert_eq!(edge.source, "person:1");
        assert_eq!(edge.label, "mentor");
        assert!(edge.directed);
    }

    #[test]
    fn ego_of_connected_person() {
        let g = project(&fixture(), Projection::Ego(1)).expect("project");
        assert_eq!(ids(&g), HashSet::from(["person:1".to_string(), "person:2".to_string(), "event:1".to_string()]));
        assert_eq!(g.edges.len(), 2);
        // Every edge touches the seed.
        for e in &g.edges {
            assert!(e.source == "person:1" || e.target == "person:1");
        }
    }

    #[test]
    fn ego_of_isolated_person() {
        let g = project(&fixture(), Projection::Ego(3)).expect("project");
        assert_eq!(g.nodes.len(), 1);
        assert!(g.edges.is_empty());
    }

    #[test]
    fn ego_surfaces_incoming_person_person_rows() {
        // B never appears as a source; the A -> B row must still show up for
        // EGO(B), with the stored direction preserved.
        let g = project(&fixture(), Projection::Ego(2)).expect("project");
        assert_eq!(ids(&g), HashSet::from(["person:2".to_string(), "person:1".to_string()]));
        assert_eq!(g.edges.len(), 1);
        assert_eq!(g.edges[0].source, "person:1");
        assert_eq!(g.edges[0].target, "person:2");
    }

    #[test]
    fn ego_seed_not_found_is_an_error() {
        let err = project(&fixture(), Projection::Ego(42)).expect_err("missing seed");
        assert!(matches!(err, ProjectError::SeedNotFound(42)));
    }

    #[test]
    fn ego_never_visits_other_persons_relations() {
        // A person-event row for person 2 must not leak into EGO(1)'s output.
        let data = Dataset::from_json_str(
            r#"{
                "persons": [{"person_id": 1, "name": "A"}, {"person_id": 2, "name": "B"}],
                "events": [{"event_id": 7, "event_name": "E"}],
                "person_event": [{"person_id": 2, "event_id": 7}]
            }"#,
        )
        .expect("data");
        let g = project(&data, Projection::Ego(1)).expect("project");
        assert_eq!(g.nodes.len(), 1);
        assert!(g.edges.is_empty());
    }

    #[test]
    fn dangling_references_are_skipped_silently() {
        let data = Dataset::from_json_str(
            r#"{
                "persons": [{"person_id": 1, "name": "A"}],
                "person_location": [{"person_id": 1, "location_id": 99}],
                "person_event": [{"person_id": 77, "event_id": 1}]
            }"#,
        )
        .expect("data");
        let g = project(&data, Projection::Full).expect("project");
        assert!(g.edges.is_empty());
        assert!(!g.contains_node("location:99"));

        let g = project(&data, Projection::Ego(1)).expect("project");
        assert_eq!(g.nodes.len(), 1);
        assert!(g.edges.is_empty());
    }

    #[test]
    fn duplicate_target_references_yield_one_node() {
        // Two person-event rows hit the same event; the node is inserted once
        // and keeps its first attributes.
        let data = Dataset::from_json_str(
            r#"{
                "persons": [{"person_id": 1, "name": "A"}, {"person_id": 2, "name": "B"}],
                "events": [{"event_id": 7, "event_name": "E7"}],
                "person_event": [
                    {"person_id": 1, "event_id": 7},
                    {"person_id": 2, "event_id": 7}
                ]
            }"#,
        )
        .expect("data");
        let g = project(&data, Projection::Full).expect("project");
        assert_eq!(
            g.nodes.iter().filter(|n| n.id == "event:7").count(),
            1
        );
        assert_eq!(g.edges.len(), 2);
    }

    #[test]
    fn missing_relation_label_uses_kind_default() {
        let data = Dataset::from_json_str(
            r#"{
                "persons": [{"person_id": 1, "name": "A"}],
                "eras": [{"era_id": 1, "era_name": "Japanese colonial period"}],
                "person_era": [{"person_id": 1, "era_id": 1, "note": "  "}]
            }"#,
        )
        .expect("data");
        let g = project(&data, Projection::Full).expect("project");
        assert_eq!(g.edges[0].label, "active-during");
        assert!(!g.edges[0].directed);
    }

    #[test]
    fn full_is_a_superset_of_any_ego() {
        let data = fixture();
        let full = project(&data, Projection::Full).expect("full");
        let full_ids = ids(&full);
        for seed in [1, 2, 3] {
            let ego = project(&data, Projection::Ego(seed)).expect("ego");
            assert!(ids(&ego).is_subset(&full_ids), "seed {seed}");
        }
    }
}

//! Attribute resolution: row -> label / tooltip / link.
//!
//! These never fail and never emit a blank value. Labels use the entity's
//! name field, falling back to `kind#id` when the name is blank; tooltips try
//! a per-kind chain of descriptive fields before falling back to the label
//! itself.

use storygraph_model::{
    Dataset, EntityKind, EraRow, EventRow, LocationRow, ObjectRow, PersonRow, RawId,
};

use crate::graph::{node_id, GraphNode};

/// External link, only if present and non-blank after trimming.
pub fn resolve_link(link: Option<&str>) -> Option<String> {
    link.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn display_label(name: &str, kind: EntityKind, id: RawId) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("{}#{}", kind.tag(), id)
    } else {
        name.to_string()
    }
}

/// First non-blank tier, else the label.
fn resolve_tooltip<I>(tiers: I, label: &str) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    tiers
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| label.to_string())
}

pub fn person_node(row: &PersonRow) -> GraphNode {
    let label = display_label(&row.name, EntityKind::Person, row.person_id);
    let tooltip = resolve_tooltip(
        [row.contribution.clone(), row.occupation.clone()],
        &label,
    );
    GraphNode {
        id: node_id(EntityKind::Person, row.person_id),
        label,
        tooltip,
        kind: EntityKind::Person,
        link: resolve_link(row.wiki_link.as_deref()),
    }
}

pub fn event_node(row: &EventRow) -> GraphNode {
    let label = display_label(&row.name, EntityKind::Event, row.event_id);
    let tooltip = resolve_tooltip(
        [row.site.clone(), row.year.map(|y| y.to_string())],
        &label,
    );
    GraphNode {
        id: node_id(EntityKind::Event, row.event_id),
        label,
        tooltip,
        kind: EntityKind::Event,
        link: resolve_link(row.wiki_link.as_deref()),
    }
}

pub fn era_node(row: &EraRow) -> GraphNode {
    let label = display_label(&row.name, EntityKind::Era, row.era_id);
    let tooltip = resolve_tooltip([row.description.clone()], &label);
    GraphNode {
        id: node_id(EntityKind::Era, row.era_id),
        label,
        tooltip,
        kind: EntityKind::Era,
        link: resolve_link(row.wiki_link.as_deref()),
    }
}

pub fn location_node(row: &LocationRow) -> GraphNode {
    let label = display_label(&row.name, EntityKind::Location, row.location_id);
    let tooltip = resolve_tooltip(
        [row.location_type.clone(), row.district.clone()],
        &label,
    );
    GraphNode {
        id: node_id(EntityKind::Location, row.location_id),
        label,
        tooltip,
        kind: EntityKind::Location,
        link: resolve_link(row.wiki_link.as_deref()),
    }
}

pub fn object_node(row: &ObjectRow) -> GraphNode {
    let label = display_label(&row.name, EntityKind::Object, row.object_id);
    let tooltip = resolve_tooltip(
        [row.description.clone(), row.object_type.clone()],
        &label,
    );
    GraphNode {
        id: node_id(EntityKind::Object, row.object_id),
        label,
        tooltip,
        kind: EntityKind::Object,
        link: resolve_link(row.wiki_link.as_deref()),
    }
}

/// Build the node for one entity by (kind, id), or `None` when the id is not
/// in the loaded set (a dangling reference for the caller to skip).
pub fn entity_node(data: &Dataset, kind: EntityKind, id: RawId) -> Option<GraphNode> {
    match kind {
        EntityKind::Person => data.person(id).map(person_node),
        EntityKind::Event => data.event(id).map(event_node),
        EntityKind::Era => data.era(id).map(era_node),
        EntityKind::Location => data.location(id).map(location_node),
        EntityKind::Object => data.object(id).map(object_node),
    }
}

// ============================================================================
// Tests
// ============================================================================

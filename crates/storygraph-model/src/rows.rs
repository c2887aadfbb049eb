//! Typed rows for the entity and relation tables.
//!
//! Field names follow the source snapshot columns. Every row is a fixed-shape
//! record with named, possibly-optional fields; there is no runtime fallback
//! probing anywhere downstream of this module.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw table-local identifier. Only unique *within* one entity table;
/// cross-table uniqueness is the projection engine's job.
pub type RawId = u64;

// ============================================================================
// Entity kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Event,
    Era,
    Location,
    Object,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Person,
        EntityKind::Event,
        EntityKind::Era,
        EntityKind::Location,
        EntityKind::Object,
    ];

    /// Stable lowercase tag, used as the node-id namespace prefix.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::Event => "event",
            EntityKind::Era => "era",
            EntityKind::Location => "location",
            EntityKind::Object => "object",
        }
    }

    pub fn from_tag(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "person" | "persons" => Some(EntityKind::Person),
            "event" | "events" => Some(EntityKind::Event),
            "era" | "eras" => Some(EntityKind::Era),
            "location" | "locations" => Some(EntityKind::Location),
            "object" | "objects" => Some(EntityKind::Object),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ============================================================================
// Relation kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    PersonPerson,
    PersonEvent,
    PersonEra,
    PersonLocation,
    PersonObject,
}

impl RelationKind {
    pub const ALL: [RelationKind; 5] = [
        RelationKind::PersonPerson,
        RelationKind::PersonEvent,
        RelationKind::PersonEra,
        RelationKind::PersonLocation,
        RelationKind::PersonObject,
    ];

    /// Entity kind on the target side of a relation row.
    pub fn target_kind(&self) -> EntityKind {
        match self {
            RelationKind::PersonPerson => EntityKind::Person,
            RelationKind::PersonEvent => EntityKind::Event,
            RelationKind::PersonEra => EntityKind::Era,
            RelationKind::PersonLocation => EntityKind::Location,
            RelationKind::PersonObject => EntityKind::Object,
        }
    }

    /// Fallback edge label when a relation row carries none.
    pub fn default_label(&self) -> &'static str {
        match self {
            RelationKind::PersonPerson => "related-to",
            RelationKind::PersonEvent => "participated-in",
            RelationKind::PersonEra => "active-during",
            RelationKind::PersonLocation => "tied-to-place",
            RelationKind::PersonObject => "tied-to-object",
        }
    }

    /// Source table name, for diagnostics.
    pub fn table(&self) -> &'static str {
        match self {
            RelationKind::PersonPerson => "person_person",
            RelationKind::PersonEvent => "person_event",
            RelationKind::PersonEra => "person_era",
            RelationKind::PersonLocation => "person_location",
            RelationKind::PersonObject => "person_object",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            RelationKind::PersonPerson => 0,
            RelationKind::PersonEvent => 1,
            RelationKind::PersonEra => 2,
            RelationKind::PersonLocation => 3,
            RelationKind::PersonObject => 4,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

// ============================================================================
// Entity rows
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRow {
    pub person_id: RawId,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub occupation: Option<String>,
    pub contribution: Option<String>,
    pub wiki_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRow {
    pub event_id: RawId,
    pub name: String,
    pub year: Option<i32>,
    pub site: Option<String>,
    pub wiki_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EraRow {
    pub era_id: RawId,
    pub name: String,
    pub description: Option<String>,
    pub wiki_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRow {
    pub location_id: RawId,
    pub name: String,
    pub location_type: Option<String>,
    pub district: Option<String>,
    pub wiki_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRow {
    pub object_id: RawId,
    pub name: String,
    pub object_type: Option<String>,
    pub description: Option<String>,
    pub wiki_link: Option<String>,
}

// ============================================================================
// Relation rows
// ============================================================================

/// One relation-table row, normalized across the five tables.
///
/// `person_id` is always the person side (for person-person, the stored
/// source, i.e. `person_id_1`); `target_id` is the referenced entity in the
/// table named by the row's [`RelationKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationRow {
    pub person_id: RawId,
    pub target_id: RawId,
    pub label: Option<String>,
}

//! JSON snapshot loading and validation.
//!
//! A snapshot document carries one array per table, with the column names of
//! the source database (`person_id_1`, `relationship_type`, `role`, ...).
//! Raw rows deserialize with every field optional; this module is the
//! boundary that decides what "well-formed" means. A row missing its required
//! id fails the *whole* load with [`ModelError::InvalidRow`] — a malformed row
//! is a contract violation of the data layer, not expected sparsity. Missing
//! labels/links/years are expected sparsity and pass through as `None`.

use serde::Deserialize;
use std::path::Path;

use crate::rows::{
    EraRow, EventRow, LocationRow, ObjectRow, PersonRow, RawId, RelationRow,
};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("{table} row {index}: missing required id field")]
    InvalidRow { table: &'static str, index: usize },
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validated snapshot: typed rows, required ids guaranteed present.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub persons: Vec<PersonRow>,
    pub events: Vec<EventRow>,
    pub eras: Vec<EraRow>,
    pub locations: Vec<LocationRow>,
    pub objects: Vec<ObjectRow>,
    pub person_person: Vec<RelationRow>,
    pub person_event: Vec<RelationRow>,
    pub person_era: Vec<RelationRow>,
    pub person_location: Vec<RelationRow>,
    pub person_object: Vec<RelationRow>,
}

impl Snapshot {
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        raw.validate()
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

// ============================================================================
// Raw (untrusted) rows
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSnapshot {
    #[serde(default)]
    persons: Vec<RawPersonRow>,
    #[serde(default)]
    events: Vec<RawEventRow>,
    #[serde(default)]
    eras: Vec<RawEraRow>,
    #[serde(default)]
    locations: Vec<RawLocationRow>,
    #[serde(default)]
    objects: Vec<RawObjectRow>,
    #[serde(default)]
    person_person: Vec<RawPersonPersonRow>,
    #[serde(default)]
    person_event: Vec<RawPersonEventRow>,
    #[serde(default)]
    person_era: Vec<RawPersonEraRow>,
    #[serde(default)]
    person_location: Vec<RawPersonLocationRow>,
    #[serde(default)]
    person_object: Vec<RawPersonObjectRow>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPersonRow {
    person_id: Option<RawId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    birth_year: Option<i32>,
    #[serde(default)]
    death_year: Option<i32>,
    #[serde(default)]
    occupation: Option<String>,
    #[serde(default)]
    contribution: Option<String>,
    #[serde(default)]
    wiki_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEventRow {
    event_id: Option<RawId>,
    #[serde(default, alias = "event_name")]
    name: Option<String>,
    #[serde(default, alias = "event_year")]
    year: Option<i32>,
    #[serde(default)]
    site: Option<String>,
    #[serde(default)]
    wiki_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEraRow {
    era_id: Option<RawId>,
    #[serde(default, alias = "era_name")]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    wiki_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLocationRow {
    location_id: Option<RawId>,
    #[serde(default, alias = "location_name")]
    name: Option<String>,
    #[serde(default)]
    location_type: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    wiki_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawObjectRow {
    object_id: Option<RawId>,
    #[serde(default, alias = "object_name")]
    name: Option<String>,
    #[serde(default)]
    object_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    wiki_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPersonPersonRow {
    person_id_1: Option<RawId>,
    person_id_2: Option<RawId>,
    #[serde(default, alias = "relationship_type")]
    label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPersonEventRow {
    person_id: Option<RawId>,
    event_id: Option<RawId>,
    #[serde(default, alias = "role")]
    label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPersonEraRow {
    person_id: Option<RawId>,
    era_id: Option<RawId>,
    #[serde(default, alias = "note")]
    label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPersonLocationRow {
    person_id: Option<RawId>,
    location_id: Option<RawId>,
    #[serde(default, alias = "relation_type")]
    label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPersonObjectRow {
    person_id: Option<RawId>,
    object_id: Option<RawId>,
    #[serde(default, alias = "relation_type")]
    label: Option<String>,
}

// ============================================================================
// Validation
// ============================================================================

fn require(id: Option<RawId>, table: &'static str, index: usize) -> Result<RawId, ModelError> {
    id.ok_or(ModelError::InvalidRow { table, index })
}

fn relation_rows(
    table: &'static str,
    rows: Vec<(Option<RawId>, Option<RawId>, Option<String>)>,
) -> Result<Vec<RelationRow>, ModelError> {
    rows.into_iter()
        .enumerate()
        .map(|(i, (person, target, label))| {
            Ok(RelationRow {
                person_id: require(person, table, i)?,
                target_id: require(target, table, i)?,
                label,
            })
        })
        .collect()
}

impl RawSnapshot {
    pub(crate) fn validate(self) -> Result<Snapshot, ModelError> {
        let persons = self
            .persons
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                Ok(PersonRow {
                    person_id: require(r.person_id, "persons", i)?,
                    name: r.name.unwrap_or_default(),
                    birth_year: r.birth_year,
                    death_year: r.death_year,
                    occupation: r.occupation,
                    contribution: r.contribution,
                    wiki_link: r.wiki_link,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let events = self
            .events
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                Ok(EventRow {
                    event_id: require(r.event_id, "events", i)?,
                    name: r.name.unwrap_or_default(),
                    year: r.year,
                    site: r.site,
                    wiki_link: r.wiki_link,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let eras = self
            .eras
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                Ok(EraRow {
                    era_id: require(r.era_id, "eras", i)?,
                    name: r.name.unwrap_or_default(),
                    description: r.description,
                    wiki_link: r.wiki_link,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let locations = self
            .locations
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                Ok(LocationRow {
                    location_id: require(r.location_id, "locations", i)?,
                    name: r.name.unwrap_or_default(),
                    location_type: r.location_type,
                    district: r.district,
                    wiki_link: r.wiki_link,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let objects = self
            .objects
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                Ok(ObjectRow {
                    object_id: require(r.object_id, "objects", i)?,
                    name: r.name.unwrap_or_default(),
                    object_type: r.object_type,
                    description: r.description,
                    wiki_link: r.wiki_link,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        Ok(Snapshot {
            persons,
            events,
            eras,
            locations,
            objects,
            person_person: relation_rows(
                "person_person",
                self.person_person
                    .into_iter()
                    .map(|r| (r.person_id_1, r.person_id_2, r.label))
                    .collect(),
            )?,
            person_event: relation_rows(
                "person_event",
                self.person_event
                    .into_iter()
                    .map(|r| (r.person_id, r.event_id, r.label))
                    .collect(),
            )?,
            person_era: relation_rows(
                "person_era",
                self.person_era
                    .into_iter()
                    .map(|r| (r.person_id, r.era_id, r.label))
                    .collect(),
            )?,
            person_location: relation_rows(
                "person_location",
                self.person_location
                    .into_iter()
                    .map(|r| (r.person_id, r.location_id, r.label))
                    .collect(),
            )?,
            person_object: relation_rows(
                "person_object",
                self.person_object
                    .into_iter()
                    .map(|r| (r.person_id, r.object_id, r.label))
                    .collect(),
            )?,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

//! The read-only dataset handle.
//!
//! [`Dataset`] wraps a validated [`Snapshot`] and prebuilds the point/range
//! indexes the projection engine needs:
//! - entity id -> row, per entity table,
//! - person id -> incident relation rows, per relation table (and the reverse
//!   direction for person-person, so ego lookups can surface both sides).
//!
//! All lookups are O(1)-ish on the index; ego projections never scan a full
//! relation table.

use std::collections::HashMap;
use std::path::Path;

use crate::rows::{
    EntityKind, EraRow, EventRow, LocationRow, ObjectRow, PersonRow, RawId, RelationKind,
    RelationRow,
};
use crate::snapshot::{ModelError, Snapshot};

#[derive(Debug, Clone)]
pub struct Dataset {
    snapshot: Snapshot,

    person_index: HashMap<RawId, usize>,
    event_index: HashMap<RawId, usize>,
    era_index: HashMap<RawId, usize>,
    location_index: HashMap<RawId, usize>,
    object_index: HashMap<RawId, usize>,

    /// Per relation table: person-side id -> row offsets.
    outgoing: [HashMap<RawId, Vec<usize>>; 5],
    /// person_person only: target-side id -> row offsets.
    incoming_person_person: HashMap<RawId, Vec<usize>>,
}

impl Dataset {
    pub fn new(snapshot: Snapshot) -> Self {
        let person_index = snapshot
            .persons
            .iter()
            .enumerate()
            .map(|(i, r)| (r.person_id, i))
            .collect();
        let event_index = snapshot
            .events
            .iter()
            .enumerate()
            .map(|(i, r)| (r.event_id, i))
            .collect();
        let era_index = snapshot
            .eras
            .iter()
            .enumerate()
            .map(|(i, r)| (r.era_id, i))
            .collect();
        let location_index = snapshot
            .locations
            .iter()
            .enumerate()
            .map(|(i, r)| (r.location_id, i))
            .collect();
        let object_index = snapshot
            .objects
            .iter()
            .enumerate()
            .map(|(i, r)| (r.object_id, i))
            .collect();

        let mut outgoing: [HashMap<RawId, Vec<usize>>; 5] = Default::default();
        for kind in RelationKind::ALL {
            let rows = relation_table(&snapshot, kind);
            let index = &mut outgoing[kind.index()];
            for (i, row) in rows.iter().enumerate() {
                index.entry(row.person_id).or_default().push(i);
            }
        }

        let mut incoming_person_person: HashMap<RawId, Vec<usize>> = HashMap::new();
        for (i, row) in snapshot.person_person.iter().enumerate() {
            incoming_person_person
                .entry(row.target_id)
                .or_default()
                .push(i);
        }

        tracing::debug!(
            persons = snapshot.persons.len(),
            relations = RelationKind::ALL
                .iter()
                .map(|k| relation_table(&snapshot, *k).len())
                .sum::<usize>(),
            "dataset indexed"
        );

        Self {
            snapshot,
            person_index,
            event_index,
            era_index,
            location_index,
            object_index,
            outgoing,
            incoming_person_person,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Ok(Self::new(Snapshot::from_json_str(json)?))
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        Ok(Self::new(Snapshot::from_path(path)?))
    }

    // ========================================================================
    // Entity tables
    // ========================================================================

    pub fn persons(&self) -> &[PersonRow] {
        &self.snapshot.persons
    }

    pub fn events(&self) -> &[EventRow] {
        &self.snapshot.events
    }

    pub fn eras(&self) -> &[EraRow] {
        &self.snapshot.eras
    }

    pub fn locations(&self) -> &[LocationRow] {
        &self.snapshot.locations
    }

    pub fn objects(&self) -> &[ObjectRow] {
        &self.snapshot.objects
    }

    pub fn person(&self, id: RawId) -> Option<&PersonRow> {
        self.person_index.get(&id).map(|&i| &self.snapshot.persons[i])
    }

    pub fn event(&self, id: RawId) -> Option<&EventRow> {
        self.event_index.get(&id).map(|&i| &self.snapshot.events[i])
    }

    pub fn era(&self, id: RawId) -> Option<&EraRow> {
        self.era_index.get(&id).map(|&i| &self.snapshot.eras[i])
    }

    pub fn location(&self, id: RawId) -> Option<&LocationRow> {
        self.location_index
            .get(&id)
            .map(|&i| &self.snapshot.locations[i])
    }

    pub fn object(&self, id: RawId) -> Option<&ObjectRow> {
        self.object_index
            .get(&id)
            .map(|&i| &self.snapshot.objects[i])
    }

    pub fn contains(&self, kind: EntityKind, id: RawId) -> bool {
        match kind {
            EntityKind::Person => self.person_index.contains_key(&id),
            EntityKind::Event => self.event_index.contains_key(&id),
            EntityKind::Era => self.era_index.contains_key(&id),
            EntityKind::Location => self.location_index.contains_key(&id),
            EntityKind::Object => self.object_index.contains_key(&id),
        }
    }

    pub fn entity_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Person => self.snapshot.persons.len(),
            EntityKind::Event => self.snapshot.events.len(),
            EntityKind::Era => self.snapshot.eras.len(),
            EntityKind::Location => self.snapshot.locations.len(),
            EntityKind::Object => self.snapshot.objects.len(),
        }
    }

    // ========================================================================
    // Relation tables
    // ========================================================================

    /// All rows of one relation table, in snapshot order.
    pub fn relations(&self, kind: RelationKind) -> &[RelationRow] {
        relation_table(&self.snapshot, kind)
    }

    /// Indexed lookup: rows of `kind` whose person side equals `person_id`.
    /// For person-person this is the *outgoing* direction only.
    pub fn relations_of(
        &self,
        kind: RelationKind,
        person_id: RawId,
    ) -> impl Iterator<Item = &RelationRow> + '_ {
        let rows = relation_table(&self.snapshot, kind);
        self.outgoing[kind.index()]
            .get(&person_id)
            .into_iter()
            .flatten()
            .map(move |&i| &rows[i])
    }

    /// Indexed lookup: person-person rows where `person_id` is the *target*
    /// side. Self-loops are excluded; the outgoing direction already covers
    /// them.
    pub fn person_relations_with(
        &self,
        person_id: RawId,
    ) -> impl Iterator<Item = &RelationRow> + '_ {
        self.incoming_person_person
            .get(&person_id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.snapshot.person_person[i])
            .filter(move |row| row.person_id != person_id)
    }
}

fn relation_table(snapshot: &Snapshot, kind: RelationKind) -> &[RelationRow] {
    match kind {
        RelationKind::PersonPerson => &snapshot.person_person,
        RelationKind::PersonEvent => &snapshot.person_event,
        RelationKind::PersonEra => &snapshot.person_era,
        RelationKind::PersonLocation => &snapshot.person_location,
        RelationKind::PersonObject => &snapshot.person_object,
    }
}

// ============================================================================
// Tests
// ============================================================================

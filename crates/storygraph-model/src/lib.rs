//! Storygraph data access layer
//!
//! This crate owns the tabular side of the pipeline:
//! - typed rows for the five entity tables and five relation tables,
//! - JSON snapshot loading + validation (the only place where "is this row
//!   well-formed?" is decided),
//! - the read-only [`Dataset`] handle the projection engine consumes.
//!
//! The dataset is immutable after construction and exposes only indexed
//! point/range lookups, so concurrent readers need no locking.

pub mod dataset;
pub mod rows;
pub mod snapshot;

pub use dataset::Dataset;
pub use rows::{
    EntityKind, EraRow, EventRow, LocationRow, ObjectRow, PersonRow, RawId, RelationKind,
    RelationRow,
};
pub use snapshot::{ModelError, Snapshot};

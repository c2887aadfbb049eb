//! Storygraph projection engine
//!
//! Transforms the tabular dataset into a typed node/edge graph for a
//! renderer. One synchronous pass, no I/O, no retained state:
//!
//! ```text
//! Dataset ──► project(data, mode) ──► Graph { nodes, edges } ──► renderer
//! ```
//!
//! The engine guarantees:
//! - node ids are unique across all five entity tables (kind-prefixed),
//! - node insertion is first-write-wins (re-processing an entity reached via
//!   several relation rows never duplicates or mutates it),
//! - no edge in the output references a node absent from the output
//!   (dangling foreign keys are skipped, not errors),
//! - ego projections touch only relation rows incident to the seed.
//!
//! Cosmetic concerns (color, shape, layout) stay out of this crate: nodes
//! expose their [`EntityKind`](storygraph_model::EntityKind) and the renderer
//! owns the visual mapping.

pub mod attrs;
pub mod graph;
pub mod project;

pub use attrs::{entity_node, resolve_link};
pub use graph::{node_id, Graph, GraphBuilder, GraphEdge, GraphNode};
pub use project::{project, ProjectError, Projection};

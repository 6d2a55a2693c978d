//! Topology-only structure detection for unstructured quad meshes.
//!
//! This crate treats a mesh purely as a graph of node adjacency: it never
//! looks at coordinates while searching for structure, only while
//! reordering them afterward. The pipeline is, in order: [`seeding`] grows
//! maximal [`region::NodeRegion`]s from random seeds, [`cell_inducer`] and
//! [`edge_inducer`] derive the cell and edge strips each node region
//! implies, and [`renumber`] turns the detected regions into a bijective
//! renumbering of the whole mesh.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell_inducer;
pub mod edge_inducer;
pub mod error;
pub mod node_detector;
pub mod region;
pub mod relations;
pub mod renumber;
pub mod seeding;

pub use cell_inducer::induce_cell_region;
pub use edge_inducer::{build_border_pair_set, build_edge_lookup, induce_edge_region};
pub use error::StructureFailure;
pub use node_detector::detect_region_from;
pub use region::{CellRegion, EdgeRegion, NodeRegion};
pub use relations::{Adjacency, MeshRelations};
pub use renumber::{apply_renumbering, cell_renumbering, edge_renumbering, node_renumbering, Renumbering};
pub use seeding::{detect_node_regions, SeedingOutcome, SeedingParams};

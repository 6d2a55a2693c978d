//! Fatal error taxonomy shared across the workspace.
//!
//! [`MeshError`] covers the two fatal categories that are not local to a
//! single region-growth attempt: input invariant violations (the mesh
//! itself is malformed) and renumbering inconsistencies (detection
//! produced output that cannot be a valid bijection). Structure failures
//! during region growth are a separate, recoverable type owned by
//! `meshstruct-topo`, since they never escape the detector's seed loop.

use std::error::Error;
use std::fmt;

use crate::id::NodeId;

/// A fatal error: either the input mesh violates a basic structural
/// invariant, or detection produced output inconsistent with a valid
/// renumbering. Both terminate the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// Node adjacency is not symmetric: `b` is listed as a neighbour of
    /// `a` but `a` is not listed as a neighbour of `b`.
    AsymmetricAdjacency {
        /// The node whose neighbour list was missing the back-reference.
        node: NodeId,
        /// The neighbour that should have referenced `node` back.
        neighbour: NodeId,
    },
    /// A cell's node tuple does not have exactly four distinct nodes.
    MalformedCell {
        /// Number of distinct nodes found.
        node_count: usize,
    },
    /// An internal edge does not reference exactly two incident cells.
    MalformedEdge {
        /// Number of incident cells found.
        cell_count: usize,
    },
    /// A renumbering map is not a bijection: some id was mapped more than
    /// once, or some id in the domain was never mapped.
    NonBijectiveRenumbering {
        /// Human-readable description of which id collided or was missing.
        detail: String,
    },
    /// A detected region's row or column claims the same id twice.
    DuplicateIdInRegion {
        /// The id that appeared more than once.
        id: u32,
    },
    /// Two detected regions of the same entity kind overlap.
    OverlappingRegions {
        /// The id shared by both regions.
        id: u32,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AsymmetricAdjacency { node, neighbour } => {
                write!(
                    f,
                    "node {node} lists {neighbour} as a neighbour, but {neighbour} does not list {node} back"
                )
            }
            Self::MalformedCell { node_count } => {
                write!(f, "cell has {node_count} distinct nodes, expected 4")
            }
            Self::MalformedEdge { cell_count } => {
                write!(
                    f,
                    "internal edge has {cell_count} incident cells, expected 2"
                )
            }
            Self::NonBijectiveRenumbering { detail } => {
                write!(f, "renumbering is not a bijection: {detail}")
            }
            Self::DuplicateIdInRegion { id } => {
                write!(f, "id {id} appears more than once across detected regions")
            }
            Self::OverlappingRegions { id } => {
                write!(f, "id {id} is claimed by more than one detected region")
            }
        }
    }
}

impl Error for MeshError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_both_node_ids() {
        let e = MeshError::AsymmetricAdjacency {
            node: NodeId(3),
            neighbour: NodeId(7),
        };
        let msg = e.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('7'));
    }
}

//! Recoverable failures raised while growing or inducing a structured
//! region.
//!
//! Every variant here is caught at the boundary of a single seed attempt
//! (`detect_region_from`, `induce_cell_region`, `induce_edge_region`); none
//! of them escape the multi-region seeding loop.

use std::error::Error;
use std::fmt;

use meshstruct_core::NodeId;

/// A recoverable failure: the logical-grid hypothesis does not hold at
/// the current frontier, or an ambiguity could not be resolved. The
/// calling seed loop rolls back whatever partial region was being built
/// and tries a different seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructureFailure {
    /// A node consulted during growth does not have exactly four
    /// neighbours.
    DegenerateNode {
        /// The node with the wrong degree.
        node: NodeId,
        /// The degree actually found.
        degree: usize,
    },
    /// The seed's four neighbours could not be classified into a
    /// corner-forming pair (every pairing was colinear, or the seed's
    /// neighbourhood does not locally look like a quad grid).
    DegenerateSeed {
        /// The seed node.
        seed: NodeId,
    },
    /// Extending a row or column found zero, or more than one, candidate
    /// where exactly one was required.
    AmbiguousExtension {
        /// Human-readable description of which step failed.
        detail: String,
    },
    /// The first row could only be grown to two or fewer columns.
    TooFewColumns {
        /// Columns actually achieved.
        cols: usize,
    },
    /// A 2x2 node window has more than one common incident cell — the
    /// wraparound case the cell inducer does not support.
    Wraparound {
        /// Nodes of the ambiguous window.
        window: [NodeId; 4],
    },
    /// A structured edge disagreed with the node- or cell-compass fixed
    /// by the first edge in its strip.
    CompassInconsistent {
        /// Human-readable description of the disagreement.
        detail: String,
    },
    /// Region growth produced a node already claimed by another region.
    NodeAlreadyClaimed {
        /// The conflicting node.
        node: NodeId,
    },
    /// A newly placed node's adjacency, intersected with everything
    /// already placed (in this region or any other), is not exactly its
    /// already-placed logical neighbours — an edge reaches into visited
    /// territory the logical grid does not account for.
    BoundaryUnsafe {
        /// The node whose placement violated the invariant.
        node: NodeId,
    },
}

impl fmt::Display for StructureFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateNode { node, degree } => {
                write!(f, "node {node} has {degree} neighbours, expected 4")
            }
            Self::DegenerateSeed { seed } => {
                write!(f, "seed {seed} has no valid corner-forming neighbour pair")
            }
            Self::AmbiguousExtension { detail } => write!(f, "ambiguous extension: {detail}"),
            Self::TooFewColumns { cols } => {
                write!(f, "first row only reached {cols} columns, need at least 3")
            }
            Self::Wraparound { window } => {
                write!(
                    f,
                    "node window {window:?} has more than one common incident cell (wraparound)"
                )
            }
            Self::CompassInconsistent { detail } => write!(f, "compass inconsistent: {detail}"),
            Self::NodeAlreadyClaimed { node } => {
                write!(f, "node {node} already belongs to another region")
            }
            Self::BoundaryUnsafe { node } => {
                write!(f, "node {node} has an edge into already-visited territory outside its expected logical neighbours")
            }
        }
    }
}

impl Error for StructureFailure {}

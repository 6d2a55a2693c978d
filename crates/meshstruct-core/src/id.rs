//! Strongly-typed identifiers and the [`NodeSeq`] coordinate alias.

use smallvec::SmallVec;
use std::fmt;

/// Identifies a node in the mesh.
///
/// Node ids are assigned by the input archive and remapped by the
/// renumbering engine; a `NodeId` never carries information about which
/// numbering scheme (original or renumbered) it belongs to, so callers
/// must track that separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a quadrilateral cell in the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CellId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an edge in the mesh (internal or border).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EdgeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A short run of node ids, e.g. a cell's ordered corner tuple or a region
/// row being built up incrementally.
///
/// Uses `SmallVec<[NodeId; 4]>` because every fixed-size unit this crate
/// handles (a quad cell's corners, an edge's endpoints padded out, a
/// region row under construction) is small and known up front; spilling
/// to the heap is only ever needed for a region row longer than four
/// columns.
pub type NodeSeq = SmallVec<[NodeId; 4]>;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn node_id_display_round_trips_through_u32(v in any::<u32>()) {
            let id = NodeId(v);
            prop_assert_eq!(id.to_string().parse::<u32>().unwrap(), v);
        }

        #[test]
        fn id_from_u32_preserves_the_value(v in any::<u32>()) {
            prop_assert_eq!(NodeId::from(v).0, v);
            prop_assert_eq!(CellId::from(v).0, v);
            prop_assert_eq!(EdgeId::from(v).0, v);
        }
    }
}

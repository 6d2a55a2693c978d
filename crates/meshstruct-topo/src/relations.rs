//! The mesh relations store: read-only adjacency and incidence data the
//! detectors consult. Built once from the input archive, never mutated
//! during detection.

use indexmap::IndexMap;
use meshstruct_core::{CellId, EdgeId, MeshError, NodeId};

/// Node-to-node adjacency, keyed by node id.
///
/// Interior nodes of a quad mesh have exactly four neighbours; boundary
/// nodes may have fewer. Detection only ever grows a region from nodes
/// with exactly four neighbours, but the store itself places no
/// such restriction on its contents.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    neighbours: IndexMap<NodeId, Vec<NodeId>>,
}

impl Adjacency {
    /// Build an adjacency store from an explicit neighbour-list map.
    pub fn new(neighbours: IndexMap<NodeId, Vec<NodeId>>) -> Self {
        Self { neighbours }
    }

    /// Number of nodes with at least one recorded neighbour entry.
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Whether the store has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// The neighbours of `node`, in the order they were recorded.
    ///
    /// Returns an empty slice for a node with no recorded entry, rather
    /// than an error — callers that require a specific degree check it
    /// explicitly via [`Adjacency::interior_neighbours`].
    pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
        self.neighbours.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All node ids with a recorded entry, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbours.keys().copied()
    }

    /// Whether `b` is a recorded neighbour of `a`.
    pub fn is_neighbour(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbours(a).contains(&b)
    }

    /// The four neighbours of `node`, or an error if it does not have
    /// exactly four.
    ///
    /// Every interior step of region growth needs exactly four neighbours
    /// to classify a node's position in the logical grid; a lower degree
    /// means the node is on (or adjacent to) the mesh boundary and cannot
    /// anchor further growth in that direction.
    pub fn interior_neighbours(&self, node: NodeId) -> Result<[NodeId; 4], crate::error::StructureFailure> {
        let ns = self.neighbours(node);
        if ns.len() != 4 {
            return Err(crate::error::StructureFailure::DegenerateNode {
                node,
                degree: ns.len(),
            });
        }
        Ok([ns[0], ns[1], ns[2], ns[3]])
    }

    /// Verify the store's symmetry invariant: every edge is recorded in
    /// both directions. Returns the first violation found, if any.
    pub fn check_symmetric(&self) -> Result<(), MeshError> {
        for (&node, ns) in &self.neighbours {
            for &neighbour in ns {
                if !self.is_neighbour(neighbour, node) {
                    return Err(MeshError::AsymmetricAdjacency { node, neighbour });
                }
            }
        }
        Ok(())
    }
}

/// The full set of relations read from (or about to be written to) a mesh
/// archive.
#[derive(Clone, Debug, Default)]
pub struct MeshRelations {
    /// Node-to-node adjacency.
    pub node_to_node: Adjacency,
    /// Each cell's four nodes, in the cell's own stored slot order.
    pub cell_to_ord_nodes: Vec<[NodeId; 4]>,
    /// Each internal edge's two endpoint nodes.
    pub inedge_to_nodes: Vec<(NodeId, NodeId)>,
    /// Each internal edge's two incident cells.
    pub inedge_to_cells: Vec<(CellId, CellId)>,
    /// Each border edge's two endpoint nodes.
    pub borderedge_to_nodes: Vec<(NodeId, NodeId)>,
    /// Each border edge's single incident cell.
    pub borderedge_to_cell: Vec<CellId>,
    /// Each node's `(x, y)` coordinate. Never consulted during detection;
    /// only reordered alongside the node renumbering.
    pub coord_data: Vec<(f64, f64)>,
}

impl MeshRelations {
    /// Number of distinct nodes referenced by `node_to_node`.
    pub fn num_nodes(&self) -> usize {
        self.node_to_node.len()
    }

    /// Number of cells.
    pub fn num_cells(&self) -> usize {
        self.cell_to_ord_nodes.len()
    }

    /// Number of internal edges.
    pub fn num_internal_edges(&self) -> usize {
        self.inedge_to_nodes.len()
    }

    /// Number of border edges.
    pub fn num_border_edges(&self) -> usize {
        self.borderedge_to_nodes.len()
    }

    /// Build the inverse of `cell_to_ord_nodes`: for each node, the (at
    /// most four) cells incident to it, indexed by the slot the node
    /// occupies inside that cell's tuple.
    ///
    /// `node_to_ord_cells[node][slot] = Some(cell)` when `cell`'s node
    /// tuple has `node` at position `slot`. A node is commonly the corner
    /// of several cells at different slots; that's expected, not an error.
    pub fn node_to_ord_cells(&self) -> IndexMap<NodeId, [Option<CellId>; 4]> {
        let mut map: IndexMap<NodeId, [Option<CellId>; 4]> = IndexMap::new();
        for (idx, nodes) in self.cell_to_ord_nodes.iter().enumerate() {
            let cell = CellId(idx as u32);
            for (slot, &node) in nodes.iter().enumerate() {
                let entry = map.entry(node).or_insert([None; 4]);
                entry[slot] = Some(cell);
            }
        }
        map
    }

    /// Build the inverse of `inedge_to_nodes`/`inedge_to_cells`: for each
    /// node, the internal edges incident to it, bucketed by which slot
    /// (0 or 1) the node occupies in the edge's stored pair.
    pub fn node_to_ord_inedges(&self) -> IndexMap<NodeId, [Vec<EdgeId>; 2]> {
        let mut map: IndexMap<NodeId, [Vec<EdgeId>; 2]> = IndexMap::new();
        for (idx, &(a, b)) in self.inedge_to_nodes.iter().enumerate() {
            let edge = EdgeId(idx as u32);
            map.entry(a).or_insert_with(|| [Vec::new(), Vec::new()])[0].push(edge);
            map.entry(b).or_insert_with(|| [Vec::new(), Vec::new()])[1].push(edge);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency_of(pairs: &[(u32, &[u32])]) -> Adjacency {
        let mut m = IndexMap::new();
        for &(n, ns) in pairs {
            m.insert(NodeId(n), ns.iter().map(|&x| NodeId(x)).collect());
        }
        Adjacency::new(m)
    }

    #[test]
    fn symmetric_adjacency_passes() {
        let adj = adjacency_of(&[(0, &[1]), (1, &[0])]);
        assert!(adj.check_symmetric().is_ok());
    }

    #[test]
    fn asymmetric_adjacency_detected() {
        let adj = adjacency_of(&[(0, &[1]), (1, &[])]);
        assert_eq!(
            adj.check_symmetric(),
            Err(MeshError::AsymmetricAdjacency {
                node: NodeId(0),
                neighbour: NodeId(1)
            })
        );
    }

    #[test]
    fn interior_neighbours_requires_degree_four() {
        let adj = adjacency_of(&[(0, &[1, 2, 3])]);
        assert!(adj.interior_neighbours(NodeId(0)).is_err());
    }

    #[test]
    fn node_to_ord_cells_indexes_by_slot() {
        let relations = MeshRelations {
            cell_to_ord_nodes: vec![[NodeId(0), NodeId(1), NodeId(2), NodeId(3)]],
            ..Default::default()
        };
        let inv = relations.node_to_ord_cells();
        assert_eq!(inv[&NodeId(0)][0], Some(CellId(0)));
        assert_eq!(inv[&NodeId(2)][2], Some(CellId(0)));
        assert_eq!(inv[&NodeId(0)][1], None);
    }
}

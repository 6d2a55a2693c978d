//! The renumbering engine: builds the `old <-> new` bijections for
//! nodes, cells, and internal edges, and applies them to produce the
//! augmented mesh.

use indexmap::IndexMap;
use meshstruct_core::{CellId, MeshError, NodeId};

use crate::region::{CellRegion, EdgeRegion, NodeRegion};
use crate::relations::{Adjacency, MeshRelations};

/// A bijection between an entity kind's original ids and its renumbered
/// ids, with structured entities forming a prefix.
#[derive(Clone, Debug)]
pub struct Renumbering {
    /// `old_to_new[old_id] == new_id`.
    pub old_to_new: Vec<u32>,
    /// `new_to_old[new_id] == old_id`.
    pub new_to_old: Vec<u32>,
}

impl Renumbering {
    /// Build a renumbering from the ordered list of old ids that should
    /// receive the structured (low) new ids, in that exact order. Every
    /// old id in `0..total` not present in `structured_order` is
    /// appended afterward in ascending order.
    pub fn build(total: usize, structured_order: Vec<u32>) -> Self {
        let mut new_to_old = structured_order;
        let structured: std::collections::HashSet<u32> = new_to_old.iter().copied().collect();
        let mut remainder: Vec<u32> = (0..total as u32).filter(|id| !structured.contains(id)).collect();
        remainder.sort_unstable();
        new_to_old.extend(remainder);

        let mut old_to_new = vec![0u32; total];
        for (new_id, &old_id) in new_to_old.iter().enumerate() {
            old_to_new[old_id as usize] = new_id as u32;
        }
        Self {
            old_to_new,
            new_to_old,
        }
    }

    /// Number of ids covered by this renumbering.
    pub fn len(&self) -> usize {
        self.new_to_old.len()
    }

    /// Whether this renumbering covers zero ids.
    pub fn is_empty(&self) -> bool {
        self.new_to_old.is_empty()
    }

    /// Confirm this is a genuine bijection: every id in `0..len()`
    /// appears in `new_to_old` exactly once.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.old_to_new.len() != self.new_to_old.len() {
            return Err(MeshError::NonBijectiveRenumbering {
                detail: format!(
                    "old_to_new has {} entries, new_to_old has {}",
                    self.old_to_new.len(),
                    self.new_to_old.len()
                ),
            });
        }
        let mut seen = vec![false; self.new_to_old.len()];
        for &old_id in &self.new_to_old {
            let idx = old_id as usize;
            if idx >= seen.len() || seen[idx] {
                return Err(MeshError::NonBijectiveRenumbering {
                    detail: format!("old id {old_id} mapped more than once, or out of range"),
                });
            }
            seen[idx] = true;
        }
        Ok(())
    }
}

/// Build the node renumbering: each detected region is flattened
/// row-major, in detection order; the rest follow in ascending old id.
pub fn node_renumbering(regions: &[NodeRegion], num_nodes: usize) -> Renumbering {
    let structured: Vec<u32> = regions
        .iter()
        .flat_map(|r| r.nodes_row_major().iter().map(|n| n.0))
        .collect();
    Renumbering::build(num_nodes, structured)
}

/// Build the cell renumbering, recording each region's `cells_offset`
/// as it goes.
pub fn cell_renumbering(regions: &mut [CellRegion], num_cells: usize) -> Renumbering {
    let mut structured = Vec::new();
    for region in regions.iter_mut() {
        region.cells_offset = structured.len();
        structured.extend(region.cells.iter().map(|c| c.0));
    }
    Renumbering::build(num_cells, structured)
}

/// Build the internal-edge renumbering, recording each region's
/// `edges_offset` as it goes. Border edges are a disjoint id space and
/// are never reordered — only the node/cell ids *inside* their records
/// are remapped by [`apply_renumbering`].
pub fn edge_renumbering(regions: &mut [EdgeRegion], num_internal_edges: usize) -> Renumbering {
    let mut structured = Vec::new();
    for region in regions.iter_mut() {
        region.edges_offset = structured.len();
        structured.extend(region.edges.iter().map(|e| e.0));
    }
    Renumbering::build(num_internal_edges, structured)
}

/// Apply the three renumberings to produce the augmented mesh relations.
pub fn apply_renumbering(
    relations: &MeshRelations,
    nodes: &Renumbering,
    cells: &Renumbering,
    edges: &Renumbering,
) -> MeshRelations {
    let remap_node = |n: NodeId| NodeId(nodes.old_to_new[n.0 as usize]);
    let remap_cell = |c: CellId| CellId(cells.old_to_new[c.0 as usize]);

    let mut new_adjacency: IndexMap<NodeId, Vec<NodeId>> = IndexMap::new();
    for &old_id in &nodes.new_to_old {
        let old_node = NodeId(old_id);
        let mut remapped: Vec<NodeId> = relations
            .node_to_node
            .neighbours(old_node)
            .iter()
            .map(|&n| remap_node(n))
            .collect();
        remapped.sort_unstable();
        new_adjacency.insert(remap_node(old_node), remapped);
    }

    let cell_to_ord_nodes: Vec<[NodeId; 4]> = cells
        .new_to_old
        .iter()
        .map(|&old_id| {
            let old_nodes = relations.cell_to_ord_nodes[old_id as usize];
            [
                remap_node(old_nodes[0]),
                remap_node(old_nodes[1]),
                remap_node(old_nodes[2]),
                remap_node(old_nodes[3]),
            ]
        })
        .collect();

    let inedge_to_nodes: Vec<(NodeId, NodeId)> = edges
        .new_to_old
        .iter()
        .map(|&old_id| {
            let (a, b) = relations.inedge_to_nodes[old_id as usize];
            (remap_node(a), remap_node(b))
        })
        .collect();

    let inedge_to_cells: Vec<(CellId, CellId)> = edges
        .new_to_old
        .iter()
        .map(|&old_id| {
            let (a, b) = relations.inedge_to_cells[old_id as usize];
            (remap_cell(a), remap_cell(b))
        })
        .collect();

    let borderedge_to_nodes: Vec<(NodeId, NodeId)> = relations
        .borderedge_to_nodes
        .iter()
        .map(|&(a, b)| (remap_node(a), remap_node(b)))
        .collect();

    let borderedge_to_cell: Vec<CellId> = relations
        .borderedge_to_cell
        .iter()
        .map(|&c| remap_cell(c))
        .collect();

    let coord_data: Vec<(f64, f64)> = if relations.coord_data.is_empty() {
        Vec::new()
    } else {
        nodes
            .new_to_old
            .iter()
            .map(|&old_id| relations.coord_data[old_id as usize])
            .collect()
    };

    MeshRelations {
        node_to_node: Adjacency::new(new_adjacency),
        cell_to_ord_nodes,
        inedge_to_nodes,
        inedge_to_cells,
        borderedge_to_nodes,
        borderedge_to_cell,
        coord_data,
    }
}

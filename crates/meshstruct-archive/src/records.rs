//! Section name constants for the archive format.

/// Node-to-node adjacency: one line per node, `node_id neighbour_id...`.
pub const NODE_TO_NODE: &str = "node_to_node";
/// Each cell's four nodes: one line per cell, `n0 n1 n2 n3`.
pub const CELL_TO_ORD_NODES: &str = "cell_to_ord_nodes";
/// Each internal edge's two endpoint nodes: one line per edge, `a b`.
pub const INEDGE_TO_NODES: &str = "inedge_to_nodes";
/// Each internal edge's two incident cells: one line per edge, `c0 c1`.
pub const INEDGE_TO_CELLS: &str = "inedge_to_cells";
/// Each border edge's two endpoint nodes: one line per edge, `a b`.
pub const BORDEREDGE_TO_NODES: &str = "borderedge_to_nodes";
/// Each border edge's single incident cell: one line per edge, `c`.
pub const BORDEREDGE_TO_CELL: &str = "borderedge_to_cell";
/// Each node's `(x, y)` coordinate: one line per node, `x y` (floats).
pub const COORD_DATA: &str = "coord_data";

/// All seven required input sections, in the order a reader should expect them.
pub const INPUT_SECTIONS: [&str; 7] = [
    NODE_TO_NODE,
    CELL_TO_ORD_NODES,
    INEDGE_TO_NODES,
    INEDGE_TO_CELLS,
    BORDEREDGE_TO_NODES,
    BORDEREDGE_TO_CELL,
    COORD_DATA,
];

/// Detected node regions: count, then per-region header + row-major ids.
pub const STRUCTURED_NODE_REGIONS: &str = "structured_node_regions";
/// Detected cell regions: per-region `(cells_offset, row_start, row_finish,
/// col_start, col_finish, compass[4])`.
pub const STRUCTURED_CELL_REGIONS: &str = "structured_cell_regions";
/// `(num_unstructured_cells, unstructured_cells_offset)`.
pub const UNSTRUCTURED_CELL_REGIONS: &str = "unstructured_cell_regions";
/// Cells renumbered, in the new cell ordering.
pub const NEW_CELL_TO_ORD_NODES: &str = "new_cell_to_ord_nodes";
/// Internal edges renumbered, in the new edge ordering.
pub const NEW_INEDGE_TO_NODES: &str = "new_inedge_to_nodes";
/// Internal edge incident cells renumbered.
pub const NEW_INEDGE_TO_CELLS: &str = "new_inedge_to_cells";
/// Border edges with their node references renumbered (order unchanged).
pub const NEW_BORDEREDGE_TO_NODES: &str = "new_borderedge_to_nodes";
/// Border edges with their cell reference renumbered (order unchanged).
pub const NEW_BORDEREDGE_TO_CELL: &str = "new_borderedge_to_cell";
/// Node coordinates reordered to match the new node numbering.
pub const NEW_COORD_DATA: &str = "new_coord_data";
/// Container section wrapping the H/V edge-strip sub-sections and the
/// unstructured-edges offset.
pub const STRUCTURED_EDGE_REGIONS: &str = "structured_edge_regions";
/// Detected horizontal edge strips: per-region `(edges_offset, bounds[4],
/// node_compass[2], cell_compass[2])`.
pub const STRUCTURED_H_EDGE_REGIONS: &str = "structured_h_edge_regions";
/// Detected vertical edge strips, same shape as the horizontal section.
pub const STRUCTURED_V_EDGE_REGIONS: &str = "structured_v_edge_regions";
/// Single-value section: the prefix offset where unstructured edges begin.
pub const UNSTRUCTURED_EDGES_OFFSET: &str = "unstructured_edges_offset";
/// `old new` pairs, one per line, for the node renumbering.
pub const OLDNODE_TO_NEWNODE: &str = "oldnode_to_newnode";
/// `old new` pairs, one per line, for the cell renumbering.
pub const OLDCELL_TO_NEWCELL: &str = "oldcell_to_newcell";
/// `new old` pairs, one per line, for the edge renumbering.
pub const NEWEDGE_TO_OLDEDGE: &str = "newedge_to_oldedge";

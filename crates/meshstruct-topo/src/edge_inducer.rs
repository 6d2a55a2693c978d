//! Edge structure induction: from a node region and its cell region,
//! derive the horizontal and vertical strips of internal edges, each
//! excluding any edge that touches the mesh boundary.

use std::collections::{HashMap, HashSet};

use meshstruct_core::{Compass2, EdgeDirection, EdgeId, NodeId};

use crate::error::StructureFailure;
use crate::relations::MeshRelations;
use crate::region::{CellRegion, EdgeRegion, NodeRegion};

fn sorted_pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a.0 <= b.0 {
        (a, b)
    } else {
        (b, a)
    }
}

/// Build a lookup from unordered node pair to internal edge id.
pub fn build_edge_lookup(relations: &MeshRelations) -> HashMap<(NodeId, NodeId), EdgeId> {
    relations
        .inedge_to_nodes
        .iter()
        .enumerate()
        .map(|(i, &(a, b))| (sorted_pair(a, b), EdgeId(i as u32)))
        .collect()
}

/// Build the set of node pairs that are border edges.
pub fn build_border_pair_set(relations: &MeshRelations) -> HashSet<(NodeId, NodeId)> {
    relations
        .borderedge_to_nodes
        .iter()
        .map(|&(a, b)| sorted_pair(a, b))
        .collect()
}

fn touches_border(border_pairs: &HashSet<(NodeId, NodeId)>, a: NodeId, b: NodeId) -> bool {
    border_pairs.contains(&sorted_pair(a, b))
}

/// Shrink a node-index rectangle inward until none of the *horizontal*
/// strip's four boundary edge-lines (first/last edge-row, first/last
/// edge-col) touches a border edge.
///
/// Row bounds are shrunk before column bounds in every iteration: the
/// left/right checks scan across the current row range, so they would
/// spuriously see a border edge in an as-yet-unshrunk border row (every
/// horizontal edge in a border row is, trivially, a border edge) if
/// evaluated first. Shrinking rows first means the left/right checks
/// only ever see rows this strip will actually keep.
fn shrink_horizontal_bounds(
    border_pairs: &HashSet<(NodeId, NodeId)>,
    node_region: &NodeRegion,
    mut row_start: usize,
    mut row_finish: usize,
    mut col_start: usize,
    mut col_finish: usize,
) -> (usize, usize, usize, usize) {
    loop {
        if row_finish <= row_start || col_finish <= col_start + 1 {
            break;
        }
        let mut changed = false;

        if (col_start..col_finish - 1).any(|c| {
            touches_border(border_pairs, node_region.get(row_start, c), node_region.get(row_start, c + 1))
        }) {
            row_start += 1;
            changed = true;
        }

        if row_finish > row_start
            && (col_start..col_finish - 1).any(|c| {
                touches_border(
                    border_pairs,
                    node_region.get(row_finish - 1, c),
                    node_region.get(row_finish - 1, c + 1),
                )
            })
        {
            row_finish -= 1;
            changed = true;
        }

        if col_finish > col_start + 1
            && (row_start..row_finish).any(|r| {
                touches_border(border_pairs, node_region.get(r, col_start), node_region.get(r, col_start + 1))
            })
        {
            col_start += 1;
            changed = true;
        }

        if col_finish > col_start + 1
            && (row_start..row_finish).any(|r| {
                touches_border(
                    border_pairs,
                    node_region.get(r, col_finish - 2),
                    node_region.get(r, col_finish - 1),
                )
            })
        {
            col_finish -= 1;
            changed = true;
        }

        if !changed {
            break;
        }
    }
    (row_start, row_finish, col_start, col_finish)
}

/// Shrink a node-index rectangle inward until none of the *vertical*
/// strip's four boundary edge-lines touches a border edge.
///
/// The mirror image of [`shrink_horizontal_bounds`]: here the top/bottom
/// checks scan across the current column range, so columns are shrunk
/// first in every iteration to avoid the same spurious-border-row
/// problem (a border column makes every vertical edge along it a border
/// edge, regardless of which row pair is being tested).
fn shrink_vertical_bounds(
    border_pairs: &HashSet<(NodeId, NodeId)>,
    node_region: &NodeRegion,
    mut row_start: usize,
    mut row_finish: usize,
    mut col_start: usize,
    mut col_finish: usize,
) -> (usize, usize, usize, usize) {
    loop {
        if row_finish <= row_start + 1 || col_finish <= col_start {
            break;
        }
        let mut changed = false;

        if (row_start..row_finish - 1).any(|r| {
            touches_border(border_pairs, node_region.get(r, col_start), node_region.get(r + 1, col_start))
        }) {
            col_start += 1;
            changed = true;
        }

        if col_finish > col_start
            && (row_start..row_finish - 1).any(|r| {
                touches_border(
                    border_pairs,
                    node_region.get(r, col_finish - 1),
                    node_region.get(r + 1, col_finish - 1),
                )
            })
        {
            col_finish -= 1;
            changed = true;
        }

        if col_finish > col_start
            && (col_start..col_finish).any(|c| {
                touches_border(border_pairs, node_region.get(row_start, c), node_region.get(row_start + 1, c))
            })
        {
            row_start += 1;
            changed = true;
        }

        if row_finish > row_start + 1
            && col_finish > col_start
            && (col_start..col_finish).any(|c| {
                touches_border(
                    border_pairs,
                    node_region.get(row_finish - 2, c),
                    node_region.get(row_finish - 1, c),
                )
            })
        {
            row_finish -= 1;
            changed = true;
        }

        if !changed {
            break;
        }
    }
    (row_start, row_finish, col_start, col_finish)
}

/// Induce one directional edge strip (horizontal or vertical) for a
/// detected cell region.
pub fn induce_edge_region(
    direction: EdgeDirection,
    node_region: &NodeRegion,
    cell_region: &CellRegion,
    relations: &MeshRelations,
    border_pairs: &HashSet<(NodeId, NodeId)>,
    edge_lookup: &HashMap<(NodeId, NodeId), EdgeId>,
) -> Result<EdgeRegion, StructureFailure> {
    let (row_start, row_finish, col_start, col_finish) = match direction {
        EdgeDirection::Horizontal => shrink_horizontal_bounds(
            border_pairs,
            node_region,
            cell_region.row_start,
            cell_region.row_finish,
            cell_region.col_start,
            cell_region.col_finish,
        ),
        EdgeDirection::Vertical => shrink_vertical_bounds(
            border_pairs,
            node_region,
            cell_region.row_start,
            cell_region.row_finish,
            cell_region.col_start,
            cell_region.col_finish,
        ),
    };

    let (rows, cols) = match direction {
        EdgeDirection::Horizontal => (row_finish - row_start, col_finish.saturating_sub(col_start + 1)),
        EdgeDirection::Vertical => (row_finish.saturating_sub(row_start + 1), col_finish - col_start),
    };

    if rows == 0 || cols == 0 {
        return Ok(EdgeRegion {
            direction,
            row_start,
            row_finish,
            col_start,
            col_finish,
            node_compass: Compass2::IDENTITY,
            cell_compass: Compass2::IDENTITY,
            edges: Vec::new(),
            edges_offset: 0,
        });
    }

    let endpoints = |r: usize, c: usize| -> (NodeId, NodeId) {
        match direction {
            EdgeDirection::Horizontal => (node_region.get(r, c), node_region.get(r, c + 1)),
            EdgeDirection::Vertical => (node_region.get(r, c), node_region.get(r + 1, c)),
        }
    };

    let mut node_compass: Option<Compass2> = None;
    let mut cell_compass: Option<Compass2> = None;
    let mut edges = Vec::with_capacity(rows * cols);

    for ri in 0..rows {
        for ci in 0..cols {
            let (logical_first, logical_second) = endpoints(row_start + ri, col_start + ci);
            let key = sorted_pair(logical_first, logical_second);
            let edge = *edge_lookup
                .get(&key)
                .ok_or_else(|| StructureFailure::CompassInconsistent {
                    detail: format!("no internal edge between {logical_first} and {logical_second}"),
                })?;

            let (stored_a, stored_b) = relations.inedge_to_nodes[edge.0 as usize];
            let this_node_compass = if stored_a == logical_first && stored_b == logical_second {
                Compass2::IDENTITY
            } else if stored_a == logical_second && stored_b == logical_first {
                Compass2::SWAPPED
            } else {
                return Err(StructureFailure::CompassInconsistent {
                    detail: "stored edge endpoints do not match either logical ordering".to_string(),
                });
            };
            match node_compass {
                None => node_compass = Some(this_node_compass),
                Some(established) if established == this_node_compass => {}
                Some(_) => {
                    return Err(StructureFailure::CompassInconsistent {
                        detail: "node compass disagreement within strip".to_string(),
                    })
                }
            }

            let (cell_a, cell_b) = relations.inedge_to_cells[edge.0 as usize];
            let this_cell_compass = if cell_a.0 < cell_b.0 {
                Compass2::IDENTITY
            } else {
                Compass2::SWAPPED
            };
            match cell_compass {
                None => cell_compass = Some(this_cell_compass),
                Some(established) if established == this_cell_compass => {}
                Some(_) => {
                    return Err(StructureFailure::CompassInconsistent {
                        detail: "cell compass disagreement within strip".to_string(),
                    })
                }
            }

            edges.push(edge);
        }
    }

    Ok(EdgeRegion {
        direction,
        row_start,
        row_finish,
        col_start,
        col_finish,
        node_compass: node_compass.expect("rows*cols > 0 guarantees at least one edge was visited"),
        cell_compass: cell_compass.expect("rows*cols > 0 guarantees at least one edge was visited"),
        edges,
        edges_offset: 0,
    })
}

//! Node structure detection: grows a maximal logical grid from a seed
//! node using only topological adjacency.
//!
//! Every phase below is transactional: failure at any point never leaves
//! a partially-built row or region visible to the caller. This is
//! achieved structurally rather than with an explicit
//! undo log — each phase accumulates its candidate nodes into a local
//! `Vec`/`HashSet` and only folds them into the region's committed state
//! once the phase has fully succeeded, so an early return simply drops
//! the local scratch state.

use std::collections::HashSet;

use meshstruct_core::NodeId;

use crate::error::StructureFailure;
use crate::relations::Adjacency;
use crate::region::NodeRegion;

fn common_neighbours(adjacency: &Adjacency, a: NodeId, b: NodeId) -> Vec<NodeId> {
    let nb = adjacency.neighbours(b);
    adjacency
        .neighbours(a)
        .iter()
        .copied()
        .filter(|n| nb.contains(n))
        .collect()
}

/// The boundary-safety invariant: the intersection of a just-placed
/// node's adjacency with everything already placed (in this region or
/// any other) must equal exactly its already-placed logical neighbours.
/// A node with an extra edge into visited territory is evidence the quad
/// hypothesis is wrong here, not a node that can be silently accepted.
fn boundary_safe(
    adjacency: &Adjacency,
    committed: &HashSet<NodeId>,
    members: &HashSet<NodeId>,
    node: NodeId,
    expected_placed_neighbours: &[NodeId],
) -> bool {
    let visited_neighbours: HashSet<NodeId> = adjacency
        .neighbours(node)
        .iter()
        .copied()
        .filter(|n| committed.contains(n) || members.contains(n))
        .collect();
    let expected: HashSet<NodeId> = expected_placed_neighbours.iter().copied().collect();
    visited_neighbours == expected
}

/// Grow a maximal node region from `seed`.
///
/// `committed` holds every node already claimed by a previously detected
/// region; growth may never reclaim one of these. Returns the grown
/// region, or the [`StructureFailure`] that made growth impossible from
/// this seed.
pub fn detect_region_from(
    adjacency: &Adjacency,
    committed: &HashSet<NodeId>,
    seed: NodeId,
    max_rows: usize,
    max_cols: usize,
) -> Result<NodeRegion, StructureFailure> {
    if committed.contains(&seed) {
        return Err(StructureFailure::NodeAlreadyClaimed { node: seed });
    }

    // Phase A: classify the seed's four neighbours into a corner-forming
    // pair (a, b) plus their shared diagonal node x, giving the seed 2x2
    // block  [a, x]
    //        [seed, b]
    let seed_ns = adjacency.interior_neighbours(seed)?;
    let mut corner = None;
    for &other in &seed_ns[1..] {
        let common = common_neighbours(adjacency, seed_ns[0], other);
        if common.len() == 2 {
            if let Some(&x) = common.iter().find(|&&n| n != seed) {
                corner = Some((seed_ns[0], other, x));
                break;
            }
        }
    }
    let (a, b, x) = corner.ok_or(StructureFailure::DegenerateSeed { seed })?;

    let mut members: HashSet<NodeId> = HashSet::new();
    for &n in &[seed, a, b, x] {
        if committed.contains(&n) || !members.insert(n) {
            return Err(StructureFailure::NodeAlreadyClaimed { node: n });
        }
    }

    // Boundary safety: the 2x2 block [a, x / seed, b] must be completely
    // self-contained — none of its four corners may reach into already-
    // visited territory beyond its two logical neighbours in the block.
    for &(node, expected) in &[
        (a, &[x, seed][..]),
        (x, &[a, b][..]),
        (seed, &[a, b][..]),
        (b, &[x, seed][..]),
    ] {
        if !boundary_safe(adjacency, committed, &members, node, expected) {
            return Err(StructureFailure::BoundaryUnsafe { node });
        }
    }

    let mut row0 = vec![a, x];
    let mut row1 = vec![seed, b];

    // Phase B: extend the first row forward (rightward).
    while row0.len() < max_cols {
        match try_extend_row_forward(adjacency, committed, &members, &row0, &row1) {
            Some((alpha, gamma)) => {
                members.insert(alpha);
                members.insert(gamma);
                row0.push(alpha);
                row1.push(gamma);
            }
            None => break,
        }
    }

    // Phase C: extend the first row backward (leftward).
    while row0.len() < max_cols {
        match try_extend_row_backward(adjacency, committed, &members, &row0, &row1) {
            Some((alpha, gamma)) => {
                members.insert(alpha);
                members.insert(gamma);
                row0.insert(0, alpha);
                row1.insert(0, gamma);
            }
            None => break,
        }
    }

    let cols = row0.len();
    if cols <= 2 {
        return Err(StructureFailure::TooFewColumns { cols });
    }

    let mut rows: Vec<Vec<NodeId>> = vec![row0, row1];

    // Phase D: extend subsequent rows (downward), one full row at a time.
    while rows.len() < max_rows {
        let prev_prev = rows[rows.len() - 2].clone();
        let prev = rows[rows.len() - 1].clone();
        match build_next_row(adjacency, committed, &members, &prev_prev, &prev) {
            Some(new_row) => {
                members.extend(new_row.iter().copied());
                rows.push(new_row);
            }
            None => break,
        }
    }

    // Phase E: extend previous rows (upward), symmetric to D.
    while rows.len() < max_rows {
        let next_next = rows[1].clone();
        let next = rows[0].clone();
        match build_next_row(adjacency, committed, &members, &next_next, &next) {
            Some(new_row) => {
                members.extend(new_row.iter().copied());
                rows.insert(0, new_row);
            }
            None => break,
        }
    }

    let total_rows = rows.len();
    let flat: Vec<NodeId> = rows.into_iter().flatten().collect();
    Ok(NodeRegion::new(total_rows, cols, flat))
}

fn is_free(committed: &HashSet<NodeId>, members: &HashSet<NodeId>, n: NodeId) -> bool {
    !committed.contains(&n) && !members.contains(&n)
}

fn try_extend_row_forward(
    adjacency: &Adjacency,
    committed: &HashSet<NodeId>,
    members: &HashSet<NodeId>,
    row0: &[NodeId],
    row1: &[NodeId],
) -> Option<(NodeId, NodeId)> {
    let last = row0.len() - 1;
    let (r1_last, r1_prev) = (row0[last], row0[last - 1]);
    let (r2_last, r2_prev) = (row1[last], row1[last - 1]);

    let a_set: Vec<NodeId> = adjacency
        .neighbours(r1_last)
        .iter()
        .copied()
        .filter(|&n| n != r1_prev && n != r2_last)
        .collect();
    let c_set: Vec<NodeId> = adjacency
        .neighbours(r2_last)
        .iter()
        .copied()
        .filter(|&n| n != r2_prev && n != r1_last)
        .collect();

    let (alpha, gamma) = pick_unique_adjacent_pair(adjacency, &a_set, &c_set).filter(|&(alpha, gamma)| {
        alpha != gamma && is_free(committed, members, alpha) && is_free(committed, members, gamma)
    })?;

    let mut extended = members.clone();
    extended.insert(alpha);
    extended.insert(gamma);
    if !boundary_safe(adjacency, committed, &extended, alpha, &[r1_last, gamma])
        || !boundary_safe(adjacency, committed, &extended, gamma, &[r2_last, alpha])
    {
        return None;
    }

    Some((alpha, gamma))
}

fn try_extend_row_backward(
    adjacency: &Adjacency,
    committed: &HashSet<NodeId>,
    members: &HashSet<NodeId>,
    row0: &[NodeId],
    row1: &[NodeId],
) -> Option<(NodeId, NodeId)> {
    let (r1_first, r1_next) = (row0[0], row0[1]);
    let (r2_first, r2_next) = (row1[0], row1[1]);

    let a_set: Vec<NodeId> = adjacency
        .neighbours(r1_first)
        .iter()
        .copied()
        .filter(|&n| n != r1_next && n != r2_first)
        .collect();
    let c_set: Vec<NodeId> = adjacency
        .neighbours(r2_first)
        .iter()
        .copied()
        .filter(|&n| n != r2_next && n != r1_first)
        .collect();

    let (alpha, gamma) = pick_unique_adjacent_pair(adjacency, &a_set, &c_set).filter(|&(alpha, gamma)| {
        alpha != gamma && is_free(committed, members, alpha) && is_free(committed, members, gamma)
    })?;

    let mut extended = members.clone();
    extended.insert(alpha);
    extended.insert(gamma);
    if !boundary_safe(adjacency, committed, &extended, alpha, &[r1_first, gamma])
        || !boundary_safe(adjacency, committed, &extended, gamma, &[r2_first, alpha])
    {
        return None;
    }

    Some((alpha, gamma))
}

/// From two small candidate sets, find the single `(alpha, gamma)` pair
/// with `alpha ∈ a_set`, `gamma ∈ c_set`, `alpha` adjacent to `gamma`.
/// Returns `None` unless there is exactly one such pair.
fn pick_unique_adjacent_pair(
    adjacency: &Adjacency,
    a_set: &[NodeId],
    c_set: &[NodeId],
) -> Option<(NodeId, NodeId)> {
    let mut found = None;
    for &alpha in a_set {
        for &gamma in c_set {
            if adjacency.is_neighbour(alpha, gamma) {
                if found.is_some() {
                    return None;
                }
                found = Some((alpha, gamma));
            }
        }
    }
    found
}

/// Build the row that continues `prev` away from `prev_prev`, column by
/// column. `prev_prev` and `prev` may be swapped by the caller to grow in
/// the opposite direction (Phase E), since the derivation is symmetric.
fn build_next_row(
    adjacency: &Adjacency,
    committed: &HashSet<NodeId>,
    members: &HashSet<NodeId>,
    prev_prev: &[NodeId],
    prev: &[NodeId],
) -> Option<Vec<NodeId>> {
    let cols = prev.len();
    let mut new_row: Vec<NodeId> = Vec::with_capacity(cols);
    let mut extended = members.clone();

    for k in 0..cols {
        let mut excluded = vec![prev_prev[k]];
        if k > 0 {
            excluded.push(prev[k - 1]);
        }
        if k + 1 < cols {
            excluded.push(prev[k + 1]);
        }

        let mut candidates: Vec<NodeId> = adjacency
            .neighbours(prev[k])
            .iter()
            .copied()
            .filter(|n| !excluded.contains(n))
            .filter(|&n| is_free(committed, &extended, n))
            .collect();

        if k > 0 {
            let left = new_row[k - 1];
            candidates.retain(|&n| adjacency.is_neighbour(n, left));
        }

        if candidates.len() != 1 {
            return None;
        }
        let candidate = candidates[0];

        let mut expected = vec![prev[k]];
        if k > 0 {
            expected.push(new_row[k - 1]);
        }
        extended.insert(candidate);
        if !boundary_safe(adjacency, committed, &extended, candidate, &expected) {
            return None;
        }

        new_row.push(candidate);
    }

    Some(new_row)
}

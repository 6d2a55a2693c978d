//! Cell structure induction: given a detected node region, find the
//! structured quad cells whose four corners all lie inside it, and
//! derive the region's compass.

use indexmap::IndexMap;
use meshstruct_core::{CellCorner, CellId, Compass4, NodeId};

use crate::error::StructureFailure;
use crate::region::{CellRegion, NodeRegion};

fn common_incident_cells(
    node_to_ord_cells: &IndexMap<NodeId, [Option<CellId>; 4]>,
    nodes: &[NodeId; 4],
) -> Vec<CellId> {
    let mut sets = nodes.iter().map(|n| {
        node_to_ord_cells
            .get(n)
            .map(|slots| slots.iter().filter_map(|c| *c).collect::<Vec<_>>())
            .unwrap_or_default()
    });
    let mut common = sets.next().unwrap_or_default();
    for s in sets {
        common.retain(|c| s.contains(c));
    }
    common.sort_unstable_by_key(|c| c.0);
    common.dedup();
    common
}

/// The single cell a 2x2 node window points to under `compass`, or
/// `None` if the corners disagree or any corner has no recorded cell at
/// the expected slot.
fn cell_for_window(
    node_to_ord_cells: &IndexMap<NodeId, [Option<CellId>; 4]>,
    node_region: &NodeRegion,
    compass: &Compass4,
    r: usize,
    c: usize,
) -> Option<CellId> {
    let corner_nodes = [
        (CellCorner::NorthWest, node_region.get(r, c)),
        (CellCorner::NorthEast, node_region.get(r, c + 1)),
        (CellCorner::SouthWest, node_region.get(r + 1, c)),
        (CellCorner::SouthEast, node_region.get(r + 1, c + 1)),
    ];
    let mut cell = None;
    for (corner, node) in corner_nodes {
        let entry = node_to_ord_cells.get(&node)?;
        let candidate = entry[compass.slot(corner) as usize]?;
        match cell {
            None => cell = Some(candidate),
            Some(existing) if existing == candidate => {}
            Some(_) => return None,
        }
    }
    cell
}

/// Induce the structured cell region covering (a sub-rectangle of) a
/// detected node region.
///
/// Returns [`StructureFailure::Wraparound`] if the first structured
/// window encountered (in row-major order) has more than one common
/// incident cell — the wraparound case this inducer does not support.
/// Returns [`StructureFailure::AmbiguousExtension`] if no window in the
/// node region has a single common incident cell at all.
pub fn induce_cell_region(
    node_region: &NodeRegion,
    node_to_ord_cells: &IndexMap<NodeId, [Option<CellId>; 4]>,
) -> Result<CellRegion, StructureFailure> {
    let rows = node_region.rows();
    let cols = node_region.cols();

    let mut start: Option<(usize, usize, CellId)> = None;
    'search: for r in 0..rows.saturating_sub(1) {
        for c in 0..cols.saturating_sub(1) {
            let window = [
                node_region.get(r, c),
                node_region.get(r, c + 1),
                node_region.get(r + 1, c),
                node_region.get(r + 1, c + 1),
            ];
            let common = common_incident_cells(node_to_ord_cells, &window);
            match common.len() {
                0 => continue,
                1 => {
                    start = Some((r, c, common[0]));
                    break 'search;
                }
                _ => return Err(StructureFailure::Wraparound { window }),
            }
        }
    }

    let (row_start, col_start, first_cell) = start.ok_or_else(|| StructureFailure::AmbiguousExtension {
        detail: "no 2x2 node window has a unique incident cell".to_string(),
    })?;

    let corner_nodes = [
        node_region.get(row_start, col_start),
        node_region.get(row_start, col_start + 1),
        node_region.get(row_start + 1, col_start),
        node_region.get(row_start + 1, col_start + 1),
    ];
    let mut slots = [0u8; 4];
    for (i, &node) in corner_nodes.iter().enumerate() {
        let entry = node_to_ord_cells
            .get(&node)
            .expect("node already confirmed to be incident to first_cell");
        let slot = entry
            .iter()
            .position(|c| *c == Some(first_cell))
            .expect("node already confirmed to be incident to first_cell");
        slots[i] = slot as u8;
    }
    let compass = Compass4::new(slots).ok_or_else(|| StructureFailure::CompassInconsistent {
        detail: "seed window's four corners do not occupy four distinct cell slots".to_string(),
    })?;

    // Propagate the first row rightward.
    let mut col_finish = col_start + 2;
    while col_finish < cols {
        let c = col_finish - 1;
        match cell_for_window(node_to_ord_cells, node_region, &compass, row_start, c) {
            Some(_) => col_finish += 1,
            None => break,
        }
    }

    // Propagate subsequent rows downward, one full row at a time.
    let mut row_finish = row_start + 2;
    'rows: while row_finish < rows {
        let r = row_finish - 1;
        for c in col_start..col_finish - 1 {
            if cell_for_window(node_to_ord_cells, node_region, &compass, r, c).is_none() {
                break 'rows;
            }
        }
        row_finish += 1;
    }

    let mut cells = Vec::with_capacity((row_finish - row_start - 1) * (col_finish - col_start - 1));
    for r in row_start..row_finish - 1 {
        for c in col_start..col_finish - 1 {
            cells.push(
                cell_for_window(node_to_ord_cells, node_region, &compass, r, c)
                    .expect("validated by the growth loop above"),
            );
        }
    }

    Ok(CellRegion {
        row_start,
        row_finish,
        col_start,
        col_finish,
        compass,
        cells,
        cells_offset: 0,
    })
}

//! Archive writer: appends the output sections produced by detection,
//! induction, and renumbering to a mesh archive.
//!
//! Generic over `W: Write` the same way `ReplayWriter` in the teacher
//! codebase is, so callers can write straight to a file or buffer
//! everything in memory for a test.

use std::io::Write;

use meshstruct_core::{CellId, NodeId};
use meshstruct_topo::{CellRegion, EdgeRegion, NodeRegion};

use crate::codec::{format_float_pair, format_int_record};
use crate::error::ArchiveError;
use crate::records;

/// Writes a mesh archive's output sections to any `Write` sink.
pub struct ArchiveWriter<W: Write> {
    sink: W,
}

impl<W: Write> ArchiveWriter<W> {
    /// Wrap a sink for writing.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    fn section_header(&mut self, name: &str) -> Result<(), ArchiveError> {
        writeln!(self.sink, "== {name} ==")?;
        Ok(())
    }

    fn record(&mut self, fields: &[i64]) -> Result<(), ArchiveError> {
        writeln!(self.sink, "{}", format_int_record(fields))?;
        Ok(())
    }

    /// Write the `structured_node_regions` section: count then, per
    /// region, a `(region_number, num_rows, num_cols)` header followed by
    /// the region's node ids in row-major order.
    pub fn write_structured_node_regions(&mut self, regions: &[NodeRegion]) -> Result<(), ArchiveError> {
        self.section_header(records::STRUCTURED_NODE_REGIONS)?;
        self.record(&[regions.len() as i64])?;
        for (region_number, region) in regions.iter().enumerate() {
            self.record(&[region_number as i64, region.rows() as i64, region.cols() as i64])?;
            for &node in region.nodes_row_major() {
                self.record(&[node.0 as i64])?;
            }
        }
        Ok(())
    }

    /// Write the `structured_cell_regions` and `unstructured_cell_regions`
    /// sections.
    pub fn write_structured_cell_regions(
        &mut self,
        regions: &[CellRegion],
        num_unstructured_cells: usize,
        unstructured_cells_offset: usize,
    ) -> Result<(), ArchiveError> {
        self.section_header(records::STRUCTURED_CELL_REGIONS)?;
        self.record(&[regions.len() as i64])?;
        for region in regions {
            self.record(&[
                region.cells_offset as i64,
                region.row_start as i64,
                region.row_finish as i64,
                region.col_start as i64,
                region.col_finish as i64,
                region.compass.slots()[0] as i64,
                region.compass.slots()[1] as i64,
                region.compass.slots()[2] as i64,
                region.compass.slots()[3] as i64,
            ])?;
        }

        self.section_header(records::UNSTRUCTURED_CELL_REGIONS)?;
        self.record(&[num_unstructured_cells as i64, unstructured_cells_offset as i64])?;
        Ok(())
    }

    /// Write the `structured_edge_regions` section, containing the
    /// horizontal and vertical strip sub-sections plus the unstructured
    /// offset.
    pub fn write_structured_edge_regions(
        &mut self,
        h_regions: &[EdgeRegion],
        v_regions: &[EdgeRegion],
        unstructured_edges_offset: usize,
    ) -> Result<(), ArchiveError> {
        self.section_header(records::STRUCTURED_EDGE_REGIONS)?;

        writeln!(self.sink, "{}", records::STRUCTURED_H_EDGE_REGIONS)?;
        self.record(&[h_regions.len() as i64])?;
        self.write_edge_region_rows(h_regions)?;

        writeln!(self.sink, "{}", records::STRUCTURED_V_EDGE_REGIONS)?;
        self.record(&[v_regions.len() as i64])?;
        self.write_edge_region_rows(v_regions)?;

        writeln!(self.sink, "{}", records::UNSTRUCTURED_EDGES_OFFSET)?;
        self.record(&[unstructured_edges_offset as i64])?;
        Ok(())
    }

    fn write_edge_region_rows(&mut self, regions: &[EdgeRegion]) -> Result<(), ArchiveError> {
        for region in regions {
            self.record(&[
                region.edges_offset as i64,
                region.row_start as i64,
                region.row_finish as i64,
                region.col_start as i64,
                region.col_finish as i64,
                region.node_compass.first_slot() as i64,
                region.node_compass.second_slot() as i64,
                region.cell_compass.first_slot() as i64,
                region.cell_compass.second_slot() as i64,
            ])?;
        }
        Ok(())
    }

    /// Write a renumbered `cell_to_ord_nodes`-shaped relation.
    pub fn write_new_cell_to_ord_nodes(&mut self, cells: &[[NodeId; 4]]) -> Result<(), ArchiveError> {
        self.section_header(records::NEW_CELL_TO_ORD_NODES)?;
        for nodes in cells {
            self.record(&[
                nodes[0].0 as i64,
                nodes[1].0 as i64,
                nodes[2].0 as i64,
                nodes[3].0 as i64,
            ])?;
        }
        Ok(())
    }

    /// Write a renumbered node-pair relation (`new_inedge_to_nodes` or
    /// `new_borderedge_to_nodes`).
    pub fn write_node_pairs(&mut self, section: &str, pairs: &[(NodeId, NodeId)]) -> Result<(), ArchiveError> {
        self.section_header(section)?;
        for &(a, b) in pairs {
            self.record(&[a.0 as i64, b.0 as i64])?;
        }
        Ok(())
    }

    /// Write a renumbered cell-pair relation (`new_inedge_to_cells`).
    pub fn write_cell_pairs(&mut self, section: &str, pairs: &[(CellId, CellId)]) -> Result<(), ArchiveError> {
        self.section_header(section)?;
        for &(a, b) in pairs {
            self.record(&[a.0 as i64, b.0 as i64])?;
        }
        Ok(())
    }

    /// Write a renumbered single-cell relation (`new_borderedge_to_cell`).
    pub fn write_cells(&mut self, section: &str, cells: &[CellId]) -> Result<(), ArchiveError> {
        self.section_header(section)?;
        for &c in cells {
            self.record(&[c.0 as i64])?;
        }
        Ok(())
    }

    /// Write the `new_coord_data` section.
    pub fn write_new_coord_data(&mut self, coords: &[(f64, f64)]) -> Result<(), ArchiveError> {
        self.section_header(records::NEW_COORD_DATA)?;
        for &(x, y) in coords {
            writeln!(self.sink, "{}", format_float_pair(x, y))?;
        }
        Ok(())
    }

    /// Write an `old new` (or `new old`) pair map, one per line.
    pub fn write_id_map(&mut self, section: &str, pairs: impl Iterator<Item = (u32, u32)>) -> Result<(), ArchiveError> {
        self.section_header(section)?;
        for (a, b) in pairs {
            self.record(&[a as i64, b as i64])?;
        }
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<(), ArchiveError> {
        self.sink.flush()?;
        Ok(())
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Write an `EdgeId`-valued renumbering map as `old new` pairs. Shared by
/// `oldnode_to_newnode`/`oldcell_to_newcell` (old-keyed) and
/// `newedge_to_oldedge` (new-keyed) — both are plain index-to-value lists.
pub fn write_int_map<W: Write>(
    writer: &mut ArchiveWriter<W>,
    section: &str,
    values: &[u32],
) -> Result<(), ArchiveError> {
    writer.write_id_map(section, values.iter().enumerate().map(|(i, &v)| (i as u32, v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshstruct_core::{Compass2, Compass4, EdgeId};

    #[test]
    fn writes_structured_node_regions_header_and_rows() {
        let region = NodeRegion::new(2, 2, vec![NodeId(3), NodeId(1), NodeId(4), NodeId(2)]);
        let mut buf = Vec::new();
        {
            let mut writer = ArchiveWriter::new(&mut buf);
            writer.write_structured_node_regions(&[region]).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("== structured_node_regions ==\n1\n0 2 2\n3\n1\n4\n2\n"));
    }

    #[test]
    fn writes_cell_region_compass_slots() {
        let region = CellRegion {
            row_start: 0,
            row_finish: 3,
            col_start: 0,
            col_finish: 3,
            compass: Compass4::new([0, 1, 2, 3]).unwrap(),
            cells: vec![CellId(0), CellId(1), CellId(2), CellId(3)],
            cells_offset: 0,
        };
        let mut buf = Vec::new();
        {
            let mut writer = ArchiveWriter::new(&mut buf);
            writer.write_structured_cell_regions(&[region], 0, 4).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("0 0 3 0 3 0 1 2 3"));
        assert!(text.contains("== unstructured_cell_regions ==\n0 4\n"));
    }

    #[test]
    fn writes_id_map_as_old_new_pairs() {
        let mut buf = Vec::new();
        {
            let mut writer = ArchiveWriter::new(&mut buf);
            write_int_map(&mut writer, records::OLDNODE_TO_NEWNODE, &[2, 0, 1]).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "== oldnode_to_newnode ==\n0 2\n1 0\n2 1\n");
    }

    #[test]
    fn edge_compass_round_trips_through_record() {
        let region = EdgeRegion {
            direction: meshstruct_core::EdgeDirection::Horizontal,
            row_start: 1,
            row_finish: 2,
            col_start: 0,
            col_finish: 3,
            node_compass: Compass2::SWAPPED,
            cell_compass: Compass2::IDENTITY,
            edges: vec![EdgeId(0), EdgeId(1)],
            edges_offset: 0,
        };
        let mut buf = Vec::new();
        {
            let mut writer = ArchiveWriter::new(&mut buf);
            writer.write_structured_edge_regions(&[region], &[], 2).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("0 1 2 0 3 1 0 0 1"));
    }
}

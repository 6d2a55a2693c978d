//! Archive reader: parses the sectioned textual container into its
//! constituent records.

use std::io::{BufRead, BufReader, Read};

use indexmap::IndexMap;
use meshstruct_core::{CellId, NodeId};
use meshstruct_topo::{Adjacency, MeshRelations};

use crate::codec::{parse_float_pair, parse_int_record_exact};
use crate::error::ArchiveError;
use crate::records;

/// A parsed archive: section name to its raw (non-empty) record lines, in
/// file order.
///
/// Generic over `R: Read` only at construction time — once parsed, the
/// archive holds its sections in memory and no longer borrows the source.
pub struct ArchiveReader {
    sections: IndexMap<String, Vec<String>>,
}

fn section_header(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix("==")?.strip_suffix("==")?;
    Some(inner.trim())
}

impl ArchiveReader {
    /// Read and parse an entire archive from a byte stream.
    pub fn read_from<R: Read>(source: R) -> Result<Self, ArchiveError> {
        let mut sections: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut current: Option<String> = None;

        for line in BufReader::new(source).lines() {
            let line = line?;
            if let Some(name) = section_header(&line) {
                current = Some(name.to_string());
                sections.entry(name.to_string()).or_default();
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            match &current {
                Some(name) => sections.get_mut(name).expect("inserted above").push(line),
                None => continue,
            }
        }

        Ok(Self { sections })
    }

    /// The raw record lines of a section, or an error if the section is
    /// absent.
    pub fn section(&self, name: &str) -> Result<&[String], ArchiveError> {
        self.sections
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ArchiveError::MissingSection {
                name: name.to_string(),
            })
    }

    /// Whether a section is present (even if empty).
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Parse the `node_to_node` section into an [`Adjacency`] store.
    pub fn read_node_to_node(&self) -> Result<Adjacency, ArchiveError> {
        let mut map = IndexMap::new();
        for (i, line) in self.section(records::NODE_TO_NODE)?.iter().enumerate() {
            let fields = crate::codec::parse_int_record(records::NODE_TO_NODE, i, line)?;
            let (node_id, neighbours) = fields.split_first().ok_or_else(|| ArchiveError::MalformedRecord {
                section: records::NODE_TO_NODE.to_string(),
                line: i,
                detail: "empty record, expected at least a node id".to_string(),
            })?;
            let neighbours = neighbours.iter().map(|&n| NodeId(n as u32)).collect();
            map.insert(NodeId(*node_id as u32), neighbours);
        }
        Ok(Adjacency::new(map))
    }

    /// Parse the `cell_to_ord_nodes` section.
    pub fn read_cell_to_ord_nodes(&self) -> Result<Vec<[NodeId; 4]>, ArchiveError> {
        self.section(records::CELL_TO_ORD_NODES)?
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let f = parse_int_record_exact(records::CELL_TO_ORD_NODES, i, line, 4)?;
                Ok([
                    NodeId(f[0] as u32),
                    NodeId(f[1] as u32),
                    NodeId(f[2] as u32),
                    NodeId(f[3] as u32),
                ])
            })
            .collect()
    }

    /// Parse a section of `(NodeId, NodeId)` pairs.
    fn read_node_pairs(&self, section: &str) -> Result<Vec<(NodeId, NodeId)>, ArchiveError> {
        self.section(section)?
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let f = parse_int_record_exact(section, i, line, 2)?;
                Ok((NodeId(f[0] as u32), NodeId(f[1] as u32)))
            })
            .collect()
    }

    /// Parse the `inedge_to_nodes` section.
    pub fn read_inedge_to_nodes(&self) -> Result<Vec<(NodeId, NodeId)>, ArchiveError> {
        self.read_node_pairs(records::INEDGE_TO_NODES)
    }

    /// Parse the `borderedge_to_nodes` section.
    pub fn read_borderedge_to_nodes(&self) -> Result<Vec<(NodeId, NodeId)>, ArchiveError> {
        self.read_node_pairs(records::BORDEREDGE_TO_NODES)
    }

    /// Parse the `inedge_to_cells` section.
    pub fn read_inedge_to_cells(&self) -> Result<Vec<(CellId, CellId)>, ArchiveError> {
        self.section(records::INEDGE_TO_CELLS)?
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let f = parse_int_record_exact(records::INEDGE_TO_CELLS, i, line, 2)?;
                Ok((CellId(f[0] as u32), CellId(f[1] as u32)))
            })
            .collect()
    }

    /// Parse the `borderedge_to_cell` section.
    pub fn read_borderedge_to_cell(&self) -> Result<Vec<CellId>, ArchiveError> {
        self.section(records::BORDEREDGE_TO_CELL)?
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let f = parse_int_record_exact(records::BORDEREDGE_TO_CELL, i, line, 1)?;
                Ok(CellId(f[0] as u32))
            })
            .collect()
    }

    /// Parse the `coord_data` section.
    pub fn read_coord_data(&self) -> Result<Vec<(f64, f64)>, ArchiveError> {
        self.section(records::COORD_DATA)?
            .iter()
            .enumerate()
            .map(|(i, line)| parse_float_pair(records::COORD_DATA, i, line))
            .collect()
    }

    /// Parse all seven required input sections into a [`MeshRelations`].
    pub fn read_relations(&self) -> Result<MeshRelations, ArchiveError> {
        Ok(MeshRelations {
            node_to_node: self.read_node_to_node()?,
            cell_to_ord_nodes: self.read_cell_to_ord_nodes()?,
            inedge_to_nodes: self.read_inedge_to_nodes()?,
            inedge_to_cells: self.read_inedge_to_cells()?,
            borderedge_to_nodes: self.read_borderedge_to_nodes()?,
            borderedge_to_cell: self.read_borderedge_to_cell()?,
            coord_data: self.read_coord_data()?,
        })
    }
}

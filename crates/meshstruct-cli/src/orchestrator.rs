//! The end-to-end orchestrator: reads a mesh archive, runs node
//! detection, cell/edge induction, and renumbering, and writes the
//! augmented archive.
//!
//! Grounded on `detect_and_append_structure.py`'s `main()`: the same
//! sequence of steps, the same progress narration (`log()`, here an
//! `eprintln!` helper rather than `print >> stderr`), just typed and
//! fallible instead of script-level and exception-driven.

use std::io::{Read, Write};

use meshstruct_archive::{records, ArchiveReader, ArchiveWriter};
use meshstruct_topo::{
    apply_renumbering, build_border_pair_set, build_edge_lookup, cell_renumbering,
    detect_node_regions, edge_renumbering, induce_cell_region, induce_edge_region,
    node_renumbering, CellRegion, EdgeRegion, MeshRelations, NodeRegion, Renumbering,
    SeedingParams,
};
use meshstruct_core::EdgeDirection;

use crate::config::DetectionConfig;
use crate::error::OrchestratorError;

/// Write a progress line to stderr, prefixed the way the original tool's
/// own `log()` helper did.
pub fn log(message: &str) {
    eprintln!(">> {message}");
}

/// Everything the pipeline produced, before it is serialized back out.
pub struct DetectionResult {
    /// Node regions, in detection order.
    pub node_regions: Vec<NodeRegion>,
    /// Cell regions, one per node region, same order.
    pub cell_regions: Vec<CellRegion>,
    /// Horizontal edge strips, one per node region, same order.
    pub h_edge_regions: Vec<EdgeRegion>,
    /// Vertical edge strips, one per node region, same order.
    pub v_edge_regions: Vec<EdgeRegion>,
    /// Node old-id/new-id bijection.
    pub node_renumbering: Renumbering,
    /// Cell old-id/new-id bijection.
    pub cell_renumbering: Renumbering,
    /// Internal-edge old-id/new-id bijection.
    pub edge_renumbering: Renumbering,
    /// The original relations with every renumbering applied.
    pub augmented: MeshRelations,
}

/// Run the full detection-and-renumbering pipeline over already-parsed
/// relations. Does not touch the archive layer; callers that also want
/// file I/O use [`run_on_archive`].
pub fn run(relations: &MeshRelations, config: &DetectionConfig) -> Result<DetectionResult, OrchestratorError> {
    relations.node_to_node.check_symmetric()?;
    config.validate(relations.num_nodes())?;

    log(&format!(
        "detecting structure over {} nodes, {} cells, {} internal edges",
        relations.num_nodes(),
        relations.num_cells(),
        relations.num_internal_edges()
    ));

    let seeding_params = SeedingParams {
        max_rows: config.max_rows,
        max_cols: config.max_cols,
        max_regions: config.max_regions,
        max_fail: config.max_fail,
        random_seed: config.random_seed,
        start_node: config.start_node,
    };
    let seeding = detect_node_regions(&relations.node_to_node, &seeding_params);
    log(&format!(
        "detected {} node region(s), {} node(s) left unstructured",
        seeding.regions.len(),
        seeding.unstructured.len()
    ));

    let node_to_ord_cells = relations.node_to_ord_cells();
    let mut cell_regions = Vec::with_capacity(seeding.regions.len());
    for (index, region) in seeding.regions.iter().enumerate() {
        let cell_region =
            induce_cell_region(region, &node_to_ord_cells).map_err(|source| OrchestratorError::Induction {
                region_index: index,
                source,
            })?;
        cell_regions.push(cell_region);
    }

    let edge_lookup = build_edge_lookup(relations);
    let border_pairs = build_border_pair_set(relations);
    let mut h_edge_regions = Vec::with_capacity(seeding.regions.len());
    let mut v_edge_regions = Vec::with_capacity(seeding.regions.len());
    for (index, (node_region, cell_region)) in seeding.regions.iter().zip(cell_regions.iter()).enumerate() {
        let h = induce_edge_region(
            EdgeDirection::Horizontal,
            node_region,
            cell_region,
            relations,
            &border_pairs,
            &edge_lookup,
        )
        .map_err(|source| OrchestratorError::Induction {
            region_index: index,
            source,
        })?;
        let v = induce_edge_region(
            EdgeDirection::Vertical,
            node_region,
            cell_region,
            relations,
            &border_pairs,
            &edge_lookup,
        )
        .map_err(|source| OrchestratorError::Induction {
            region_index: index,
            source,
        })?;
        h_edge_regions.push(h);
        v_edge_regions.push(v);
    }

    log("renumbering nodes, cells, and edges");
    let node_map = node_renumbering(&seeding.regions, relations.num_nodes());
    node_map.validate()?;

    let mut cell_regions_mut = cell_regions;
    let cell_map = cell_renumbering(&mut cell_regions_mut, relations.num_cells());
    cell_map.validate()?;

    // Edge regions are renumbered H-strip then V-strip per region, in
    // detection order: interleave them accordingly before handing
    // the combined list to `edge_renumbering`.
    let mut edge_regions_mut: Vec<EdgeRegion> = Vec::with_capacity(h_edge_regions.len() + v_edge_regions.len());
    for (h, v) in h_edge_regions.into_iter().zip(v_edge_regions.into_iter()) {
        edge_regions_mut.push(h);
        edge_regions_mut.push(v);
    }
    let edge_map = edge_renumbering(&mut edge_regions_mut, relations.num_internal_edges());
    edge_map.validate()?;

    let mut h_edge_regions = Vec::with_capacity(edge_regions_mut.len() / 2);
    let mut v_edge_regions = Vec::with_capacity(edge_regions_mut.len() / 2);
    for pair in edge_regions_mut.chunks(2) {
        h_edge_regions.push(pair[0].clone());
        v_edge_regions.push(pair[1].clone());
    }

    let augmented = apply_renumbering(relations, &node_map, &cell_map, &edge_map);

    Ok(DetectionResult {
        node_regions: seeding.regions,
        cell_regions: cell_regions_mut,
        h_edge_regions,
        v_edge_regions,
        node_renumbering: node_map,
        cell_renumbering: cell_map,
        edge_renumbering: edge_map,
        augmented,
    })
}

/// Read a mesh archive from `input`, run the full pipeline, and write
/// the original archive plus the augmented sections to `output`.
/// Never mutates `input`: the caller is responsible for copying the
/// infile to the outfile path beforehand, matching the original tool's
/// own copy-then-append behaviour.
pub fn run_on_archive<R: Read, W: Write>(
    input: R,
    output: W,
    config: &DetectionConfig,
) -> Result<DetectionResult, OrchestratorError> {
    log("reading input archive");
    let archive = ArchiveReader::read_from(input)?;
    let relations = archive.read_relations()?;

    let result = run(&relations, config)?;

    log("writing augmented archive sections");
    let mut writer = ArchiveWriter::new(output);
    writer.write_structured_node_regions(&result.node_regions)?;

    let num_unstructured_cells = result.augmented.num_cells()
        - result.cell_regions.iter().map(|r| r.cells.len()).sum::<usize>();
    let unstructured_cells_offset = result.cell_renumbering.len() - num_unstructured_cells;
    writer.write_structured_cell_regions(&result.cell_regions, num_unstructured_cells, unstructured_cells_offset)?;

    writer.write_new_cell_to_ord_nodes(&result.augmented.cell_to_ord_nodes)?;
    writer.write_node_pairs(records::NEW_INEDGE_TO_NODES, &result.augmented.inedge_to_nodes)?;
    writer.write_cell_pairs(records::NEW_INEDGE_TO_CELLS, &result.augmented.inedge_to_cells)?;
    writer.write_node_pairs(records::NEW_BORDEREDGE_TO_NODES, &result.augmented.borderedge_to_nodes)?;
    writer.write_cells(records::NEW_BORDEREDGE_TO_CELL, &result.augmented.borderedge_to_cell)?;
    writer.write_new_coord_data(&result.augmented.coord_data)?;

    let num_unstructured_edges = result.edge_renumbering.len()
        - result.h_edge_regions.iter().map(|r| r.edges.len()).sum::<usize>()
        - result.v_edge_regions.iter().map(|r| r.edges.len()).sum::<usize>();
    let unstructured_edges_offset = result.edge_renumbering.len() - num_unstructured_edges;
    writer.write_structured_edge_regions(&result.h_edge_regions, &result.v_edge_regions, unstructured_edges_offset)?;

    writer.write_id_map(
        records::OLDNODE_TO_NEWNODE,
        result.node_renumbering.old_to_new.iter().enumerate().map(|(a, &b)| (a as u32, b)),
    )?;
    writer.write_id_map(
        records::OLDCELL_TO_NEWCELL,
        result.cell_renumbering.old_to_new.iter().enumerate().map(|(a, &b)| (a as u32, b)),
    )?;
    writer.write_id_map(
        records::NEWEDGE_TO_OLDEDGE,
        result.edge_renumbering.new_to_old.iter().enumerate().map(|(a, &b)| (a as u32, b)),
    )?;
    writer.flush()?;

    log("done");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use meshstruct_core::NodeId;
    use meshstruct_topo::Adjacency;

    fn grid_relations(rows: usize, cols: usize) -> MeshRelations {
        let node_id = |r: usize, c: usize| NodeId((r * cols + c) as u32);
        let mut adjacency = IndexMap::new();
        for r in 0..rows {
            for c in 0..cols {
                let mut ns = Vec::new();
                if r > 0 {
                    ns.push(node_id(r - 1, c));
                }
                if r + 1 < rows {
                    ns.push(node_id(r + 1, c));
                }
                if c > 0 {
                    ns.push(node_id(r, c - 1));
                }
                if c + 1 < cols {
                    ns.push(node_id(r, c + 1));
                }
                adjacency.insert(node_id(r, c), ns);
            }
        }

        let cell_id = |r: usize, c: usize| meshstruct_core::CellId((r * (cols - 1) + c) as u32);
        let mut cell_to_ord_nodes = Vec::new();
        for r in 0..rows - 1 {
            for c in 0..cols - 1 {
                cell_to_ord_nodes.push([
                    node_id(r, c),
                    node_id(r, c + 1),
                    node_id(r + 1, c),
                    node_id(r + 1, c + 1),
                ]);
            }
        }

        let mut inedge_to_nodes = Vec::new();
        let mut inedge_to_cells = Vec::new();
        for r in 1..rows - 1 {
            for c in 0..cols - 1 {
                inedge_to_nodes.push((node_id(r, c), node_id(r, c + 1)));
                inedge_to_cells.push((cell_id(r - 1, c), cell_id(r, c)));
            }
        }
        for r in 0..rows - 1 {
            for c in 1..cols - 1 {
                inedge_to_nodes.push((node_id(r, c), node_id(r + 1, c)));
                inedge_to_cells.push((cell_id(r, c - 1), cell_id(r, c)));
            }
        }

        let mut borderedge_to_nodes = Vec::new();
        let mut borderedge_to_cell = Vec::new();
        for c in 0..cols - 1 {
            borderedge_to_nodes.push((node_id(0, c), node_id(0, c + 1)));
            borderedge_to_cell.push(cell_id(0, c));
            borderedge_to_nodes.push((node_id(rows - 1, c), node_id(rows - 1, c + 1)));
            borderedge_to_cell.push(cell_id(rows - 2, c));
        }
        for r in 0..rows - 1 {
            borderedge_to_nodes.push((node_id(r, 0), node_id(r + 1, 0)));
            borderedge_to_cell.push(cell_id(r, 0));
            borderedge_to_nodes.push((node_id(r, cols - 1), node_id(r + 1, cols - 1)));
            borderedge_to_cell.push(cell_id(r, cols - 2));
        }

        let coord_data: Vec<(f64, f64)> = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (c as f64, r as f64)))
            .collect();

        MeshRelations {
            node_to_node: Adjacency::new(adjacency),
            cell_to_ord_nodes,
            inedge_to_nodes,
            inedge_to_cells,
            borderedge_to_nodes,
            borderedge_to_cell,
            coord_data,
        }
    }

    #[test]
    fn full_grid_pipeline_leaves_no_unstructured_remainder() {
        let relations = grid_relations(3, 4);
        let config = DetectionConfig {
            start_node: Some(NodeId(5)),
            ..DetectionConfig::default()
        };
        let result = run(&relations, &config).unwrap();
        assert_eq!(result.node_regions.len(), 1);
        assert_eq!(result.node_regions[0].rows(), 3);
        assert_eq!(result.node_regions[0].cols(), 4);
        assert_eq!(result.cell_regions[0].rows(), 2);
        assert_eq!(result.cell_regions[0].cols(), 3);
        assert_eq!(result.h_edge_regions[0].rows(), 1);
        assert_eq!(result.h_edge_regions[0].cols(), 3);
        assert_eq!(result.v_edge_regions[0].rows(), 2);
        assert_eq!(result.v_edge_regions[0].cols(), 2);
    }

    #[test]
    fn invalid_config_is_rejected_before_detection() {
        let relations = grid_relations(3, 4);
        let config = DetectionConfig {
            max_regions: 0,
            ..DetectionConfig::default()
        };
        let err = run(&relations, &config).unwrap_err();
        assert!(matches!(err, OrchestratorError::Config(_)));
    }

    #[test]
    fn archive_round_trip_writes_every_output_section() {
        let relations = grid_relations(3, 4);
        let mut input_bytes = Vec::new();
        {
            use std::io::Write as _;
            writeln!(input_bytes, "== node_to_node ==").unwrap();
            for node in relations.node_to_node.node_ids() {
                let ns: Vec<String> = relations
                    .node_to_node
                    .neighbours(node)
                    .iter()
                    .map(|n| n.0.to_string())
                    .collect();
                writeln!(input_bytes, "{} {}", node.0, ns.join(" ")).unwrap();
            }
            writeln!(input_bytes, "== cell_to_ord_nodes ==").unwrap();
            for nodes in &relations.cell_to_ord_nodes {
                writeln!(input_bytes, "{} {} {} {}", nodes[0].0, nodes[1].0, nodes[2].0, nodes[3].0).unwrap();
            }
            writeln!(input_bytes, "== inedge_to_nodes ==").unwrap();
            for (a, b) in &relations.inedge_to_nodes {
                writeln!(input_bytes, "{} {}", a.0, b.0).unwrap();
            }
            writeln!(input_bytes, "== inedge_to_cells ==").unwrap();
            for (a, b) in &relations.inedge_to_cells {
                writeln!(input_bytes, "{} {}", a.0, b.0).unwrap();
            }
            writeln!(input_bytes, "== borderedge_to_nodes ==").unwrap();
            for (a, b) in &relations.borderedge_to_nodes {
                writeln!(input_bytes, "{} {}", a.0, b.0).unwrap();
            }
            writeln!(input_bytes, "== borderedge_to_cell ==").unwrap();
            for c in &relations.borderedge_to_cell {
                writeln!(input_bytes, "{}", c.0).unwrap();
            }
            writeln!(input_bytes, "== coord_data ==").unwrap();
            for (x, y) in &relations.coord_data {
                writeln!(input_bytes, "{x} {y}").unwrap();
            }
        }

        let config = DetectionConfig {
            start_node: Some(NodeId(5)),
            ..DetectionConfig::default()
        };
        let mut output_bytes = Vec::new();
        run_on_archive(input_bytes.as_slice(), &mut output_bytes, &config).unwrap();
        let text = String::from_utf8(output_bytes).unwrap();
        assert!(text.contains("== structured_node_regions =="));
        assert!(text.contains("== new_coord_data =="));
        assert!(text.contains("== oldnode_to_newnode =="));
        assert!(text.contains("== newedge_to_oldedge =="));
    }
}

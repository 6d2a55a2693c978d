//! End-to-end pipeline tests: node detection, cell/edge induction, and
//! renumbering wired together over a synthetic grid mesh, the way the
//! orchestrator crate wires them over a real archive.

use std::collections::HashSet;

use indexmap::IndexMap;
use meshstruct_core::{CellId, EdgeDirection, NodeId};
use meshstruct_topo::{
    apply_renumbering, build_border_pair_set, build_edge_lookup, cell_renumbering,
    detect_node_regions, edge_renumbering, induce_cell_region, induce_edge_region,
    node_renumbering, Adjacency, MeshRelations, SeedingParams,
};

/// Build the full relations of a no-wrap `rows x cols` structured grid
/// mesh: every node has up to four neighbours, every interior 2x2 node
/// window is a cell, every edge not on the outer ring is internal.
fn full_grid_mesh(rows: usize, cols: usize) -> MeshRelations {
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

    let cell_id = |r: usize, c: usize| CellId((r * (cols - 1) + c) as u32);
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
    // Horizontal edges on interior node-rows are shared by two cells.
    for r in 1..rows - 1 {
        for c in 0..cols - 1 {
            inedge_to_nodes.push((node_id(r, c), node_id(r, c + 1)));
            inedge_to_cells.push((cell_id(r - 1, c), cell_id(r, c)));
        }
    }
    // Vertical edges on interior node-columns are shared by two cells.
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
fn full_grid_detects_as_a_single_structured_region() {
    let relations = full_grid_mesh(4, 5);
    relations.node_to_node.check_symmetric().unwrap();

    let params = SeedingParams {
        start_node: Some(NodeId(6)),
        ..SeedingParams::default()
    };
    let seeding = detect_node_regions(&relations.node_to_node, &params);
    assert_eq!(seeding.regions.len(), 1);
    assert!(seeding.unstructured.is_empty());
    assert_eq!(seeding.regions[0].rows(), 4);
    assert_eq!(seeding.regions[0].cols(), 5);
}

#[test]
fn full_pipeline_round_trips_every_entity_through_renumbering() {
    let relations = full_grid_mesh(4, 5);

    let seeding = detect_node_regions(
        &relations.node_to_node,
        &SeedingParams {
            start_node: Some(NodeId(6)),
            ..SeedingParams::default()
        },
    );
    assert_eq!(seeding.regions.len(), 1);

    let node_to_ord_cells = relations.node_to_ord_cells();
    let mut cell_regions = vec![induce_cell_region(&seeding.regions[0], &node_to_ord_cells).unwrap()];
    assert_eq!(cell_regions[0].rows(), 3);
    assert_eq!(cell_regions[0].cols(), 4);

    let edge_lookup = build_edge_lookup(&relations);
    let border_pairs = build_border_pair_set(&relations);
    let h_strip = induce_edge_region(
        EdgeDirection::Horizontal,
        &seeding.regions[0],
        &cell_regions[0],
        &relations,
        &border_pairs,
        &edge_lookup,
    )
    .unwrap();
    let v_strip = induce_edge_region(
        EdgeDirection::Vertical,
        &seeding.regions[0],
        &cell_regions[0],
        &relations,
        &border_pairs,
        &edge_lookup,
    )
    .unwrap();
    let mut edge_regions = vec![h_strip, v_strip];

    let node_map = node_renumbering(&seeding.regions, relations.num_nodes());
    let cell_map = cell_renumbering(&mut cell_regions, relations.num_cells());
    let edge_map = edge_renumbering(&mut edge_regions, relations.num_internal_edges());

    node_map.validate().unwrap();
    cell_map.validate().unwrap();
    edge_map.validate().unwrap();

    // The whole mesh was one structured region: the renumbering is a pure
    // relabelling, no unstructured remainder exists, so every old id maps
    // to a distinct new id covering the full 0..n range with no gaps.
    let mut seen_new_nodes: Vec<u32> = node_map.old_to_new.clone();
    seen_new_nodes.sort_unstable();
    assert_eq!(seen_new_nodes, (0..relations.num_nodes() as u32).collect::<Vec<_>>());

    let augmented = apply_renumbering(&relations, &node_map, &cell_map, &edge_map);
    augmented.node_to_node.check_symmetric().unwrap();
    assert_eq!(augmented.num_nodes(), relations.num_nodes());
    assert_eq!(augmented.num_cells(), relations.num_cells());
    assert_eq!(augmented.num_internal_edges(), relations.num_internal_edges());

    // Node 0 in the new numbering is the region's row-major first node.
    let expected_first = seeding.regions[0].nodes_row_major()[0];
    assert_eq!(node_map.new_to_old[0], expected_first.0);
}

#[test]
fn unstructured_remainder_is_appended_after_the_structured_prefix() {
    // A 5x5 grid with one interior node removed leaves the rest of the
    // grid structured but forces that single node into the unstructured
    // remainder.
    let rows = 5;
    let cols = 5;
    let hole = NodeId(12); // (2, 2), dead center
    let base = full_grid_mesh(rows, cols);

    let mut adjacency = IndexMap::new();
    for (node, neighbours) in base
        .node_to_node
        .node_ids()
        .map(|n| (n, base.node_to_node.neighbours(n).to_vec()))
    {
        if node == hole {
            continue;
        }
        let filtered: Vec<NodeId> = neighbours.into_iter().filter(|&n| n != hole).collect();
        adjacency.insert(node, filtered);
    }
    let adjacency = Adjacency::new(adjacency);

    let seeding = detect_node_regions(
        &adjacency,
        &SeedingParams {
            random_seed: 3,
            max_fail: 100,
            ..SeedingParams::default()
        },
    );

    let mut committed: HashSet<NodeId> = HashSet::new();
    for region in &seeding.regions {
        committed.extend(region.nodes_row_major().iter().copied());
    }
    assert!(!committed.contains(&hole));
    assert!(seeding.unstructured.contains(&hole));

    let node_map = node_renumbering(&seeding.regions, rows * cols);
    node_map.validate().unwrap();

    let structured_count: usize = seeding.regions.iter().map(|r| r.len()).sum();
    // Every unstructured node (including the hole) receives a new id at
    // or past the structured prefix boundary.
    for &old_id in &seeding.unstructured {
        assert!(node_map.old_to_new[old_id.0 as usize] as usize >= structured_count);
    }
    assert!((node_map.old_to_new[hole.0 as usize] as usize) >= structured_count);
}

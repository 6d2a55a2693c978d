//! The multi-region seeding loop: repeatedly grows node regions from
//! randomly chosen seeds until the mesh is exhausted or the failure
//! budget is spent.

use std::collections::HashSet;

use meshstruct_core::NodeId;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::node_detector::detect_region_from;
use crate::relations::Adjacency;
use crate::region::NodeRegion;

/// Parameters governing the seeding loop.
#[derive(Clone, Debug)]
pub struct SeedingParams {
    /// Maximum rows a single region may grow to.
    pub max_rows: usize,
    /// Maximum columns a single region may grow to.
    pub max_cols: usize,
    /// Stop once this many regions have been detected.
    pub max_regions: usize,
    /// Stop after this many consecutive seed failures.
    pub max_fail: usize,
    /// RNG seed for deterministic seed selection.
    pub random_seed: u64,
    /// If given, tried as the very first seed before any random pick.
    pub start_node: Option<NodeId>,
}

impl Default for SeedingParams {
    fn default() -> Self {
        Self {
            max_rows: usize::MAX,
            max_cols: usize::MAX,
            max_regions: usize::MAX,
            max_fail: 50,
            random_seed: 0,
            start_node: None,
        }
    }
}

/// Result of the seeding loop.
pub struct SeedingOutcome {
    /// All successfully detected node regions, in detection order.
    pub regions: Vec<NodeRegion>,
    /// Nodes that never joined a region, in ascending id order.
    pub unstructured: Vec<NodeId>,
}

/// Run the multi-region seeding loop to exhaustion (or budget).
///
/// Mirrors the reference `DetectNodeStructure`/`detect_multiple` seed
/// loop: the explicit `start_node` (if any) is tried first; after that,
/// seeds are drawn uniformly at random (via a seeded `ChaCha8Rng`, for
/// reproducibility) from the nodes that are neither already claimed by a
/// region nor blacklisted by a prior failure. A run of `max_fail`
/// consecutive failures ends the loop.
pub fn detect_node_regions(adjacency: &Adjacency, params: &SeedingParams) -> SeedingOutcome {
    let mut rng = ChaCha8Rng::seed_from_u64(params.random_seed);
    let mut committed: HashSet<NodeId> = HashSet::new();
    let mut blacklist: HashSet<NodeId> = HashSet::new();
    let mut regions: Vec<NodeRegion> = Vec::new();
    let mut consecutive_fails = 0usize;
    let mut next_seed = params.start_node;

    while regions.len() < params.max_regions {
        let seed = match next_seed.take() {
            Some(s) if !committed.contains(&s) && !blacklist.contains(&s) => s,
            _ => {
                let candidate = adjacency
                    .node_ids()
                    .filter(|n| !committed.contains(n) && !blacklist.contains(n))
                    .choose(&mut rng);
                match candidate {
                    Some(s) => s,
                    None => break,
                }
            }
        };

        match detect_region_from(adjacency, &committed, seed, params.max_rows, params.max_cols) {
            Ok(region) => {
                committed.extend(region.nodes_row_major().iter().copied());
                regions.push(region);
                consecutive_fails = 0;
            }
            Err(_) => {
                blacklist.insert(seed);
                consecutive_fails += 1;
                if consecutive_fails > params.max_fail {
                    break;
                }
            }
        }
    }

    let mut unstructured: Vec<NodeId> = adjacency
        .node_ids()
        .filter(|n| !committed.contains(n))
        .collect();
    unstructured.sort_unstable();

    SeedingOutcome {
        regions,
        unstructured,
    }
}

//! Detection configuration, validation, and error type.
//!
//! [`DetectionConfig`] is the orchestrator's builder-input, mirroring the
//! `WorldConfig`/`ConfigError` split used elsewhere in this workspace:
//! plain data plus a `validate()` that checks structural invariants
//! before any detection work begins.

use std::error::Error;
use std::fmt;

use meshstruct_core::NodeId;

/// Default random seed used when `--random-seed` is omitted on the CLI.
///
/// A fixed constant rather than system entropy: random-seed plumbing is
/// explicitly a non-core external concern, and the only hard
/// requirement on it is that fixing the seed makes output deterministic.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// Parameters governing a single detection run.
#[derive(Clone, Debug)]
pub struct DetectionConfig {
    /// Maximum rows a single node region may grow to. Default: unbounded.
    pub max_rows: usize,
    /// Maximum columns a single node region may grow to. Default: unbounded.
    pub max_cols: usize,
    /// Stop once this many node regions have been detected. Default: unbounded.
    pub max_regions: usize,
    /// Stop after this many consecutive seed failures. Default: 50.
    pub max_fail: usize,
    /// RNG seed for deterministic seed selection. Default: [`DEFAULT_RANDOM_SEED`].
    pub random_seed: u64,
    /// If given, the first seed tried, before any random pick. Default: `None`.
    pub start_node: Option<NodeId>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_rows: usize::MAX,
            max_cols: usize::MAX,
            max_regions: usize::MAX,
            max_fail: 50,
            random_seed: DEFAULT_RANDOM_SEED,
            start_node: None,
        }
    }
}

impl DetectionConfig {
    /// Check this configuration's invariants against a mesh of
    /// `num_nodes` nodes. Must be called, and must succeed, before any
    /// detection work begins.
    pub fn validate(&self, num_nodes: usize) -> Result<(), ConfigError> {
        if self.max_regions == 0 {
            return Err(ConfigError::NoRegionsRequested);
        }
        if self.max_fail == 0 {
            return Err(ConfigError::ZeroFailBudget);
        }
        if self.max_rows == 0 {
            return Err(ConfigError::ZeroMaxDimension { which: "max_rows" });
        }
        if self.max_cols == 0 {
            return Err(ConfigError::ZeroMaxDimension { which: "max_cols" });
        }
        if let Some(node) = self.start_node {
            if node.0 as usize >= num_nodes {
                return Err(ConfigError::StartNodeOutOfRange {
                    node,
                    num_nodes,
                });
            }
        }
        Ok(())
    }
}

/// Errors detected during [`DetectionConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_regions` was zero: detection would never run.
    NoRegionsRequested,
    /// `max_fail` was zero: the very first seed failure would end
    /// detection before ever retrying.
    ZeroFailBudget,
    /// `max_rows` or `max_cols` was zero.
    ZeroMaxDimension {
        /// Which field was zero.
        which: &'static str,
    },
    /// `--start-node` named a node id outside the mesh's node count.
    StartNodeOutOfRange {
        /// The requested start node.
        node: NodeId,
        /// The number of nodes actually present.
        num_nodes: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRegionsRequested => write!(f, "max_regions must be at least 1"),
            Self::ZeroFailBudget => write!(f, "max_fail must be at least 1"),
            Self::ZeroMaxDimension { which } => write!(f, "{which} must be at least 1"),
            Self::StartNodeOutOfRange { node, num_nodes } => write!(
                f,
                "start_node {node} is out of range for a mesh with {num_nodes} nodes"
            ),
        }
    }
}

impl Error for ConfigError {}

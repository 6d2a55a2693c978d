//! The orchestrator's top-level error type: wraps every fatal error kind
//! that can surface while running the end-to-end pipeline.

use std::error::Error;
use std::fmt;

use meshstruct_archive::ArchiveError;
use meshstruct_core::MeshError;
use meshstruct_topo::StructureFailure;

use crate::config::ConfigError;

/// Any fatal error that can terminate a detection run.
///
/// Structure failures are recoverable during seeding and never reach
/// this type — except the one place a structure failure is *not*
/// recoverable: cell/edge induction over an already-committed node
/// region has no other seed to fall back to, so a failure there
/// indicates an inconsistency between the node detector and the
/// inducers, and is reported as [`OrchestratorError::Induction`].
#[derive(Debug)]
pub enum OrchestratorError {
    /// The detection configuration failed validation.
    Config(ConfigError),
    /// The input mesh violated a basic structural invariant, or
    /// detection produced an inconsistent renumbering.
    Mesh(MeshError),
    /// Cell or edge induction failed over a node region that node
    /// detection had already committed to.
    Induction {
        /// Which node region (by detection order) failed induction.
        region_index: usize,
        /// The underlying failure.
        source: StructureFailure,
    },
    /// Reading or writing the archive failed.
    Archive(ArchiveError),
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Mesh(e) => write!(f, "mesh invariant violated: {e}"),
            Self::Induction { region_index, source } => {
                write!(f, "region {region_index}: induction failed: {source}")
            }
            Self::Archive(e) => write!(f, "archive error: {e}"),
        }
    }
}

impl Error for OrchestratorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Mesh(e) => Some(e),
            Self::Induction { source, .. } => Some(source),
            Self::Archive(e) => Some(e),
        }
    }
}

impl From<ConfigError> for OrchestratorError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<MeshError> for OrchestratorError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

impl From<ArchiveError> for OrchestratorError {
    fn from(e: ArchiveError) -> Self {
        Self::Archive(e)
    }
}

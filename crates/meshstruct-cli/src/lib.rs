//! Orchestrator and CLI front end for the meshstruct structure-detection
//! pipeline.
//!
//! [`orchestrator`] wires the `meshstruct-topo` detection/induction/
//! renumbering stages to the `meshstruct-archive` I/O layer; [`config`]
//! holds the validated run parameters; [`error`] is the top-level error
//! type surfaced to the CLI binary (`src/main.rs`, not part of this
//! library).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod orchestrator;

pub use config::{ConfigError, DetectionConfig, DEFAULT_RANDOM_SEED};
pub use error::OrchestratorError;
pub use orchestrator::{log, run, run_on_archive, DetectionResult};

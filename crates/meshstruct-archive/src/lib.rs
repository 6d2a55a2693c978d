//! Textual sectioned archive format for meshstruct mesh files.
//!
//! A mesh archive is a sequence of `== section_name ==` headers, each
//! followed by its records (one per line, blank lines ignored). [`reader`]
//! parses the required input sections into a [`meshstruct_topo::MeshRelations`];
//! [`writer`] appends the output sections produced by detection,
//! induction, and renumbering.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod reader;
pub mod records;
pub mod writer;

pub use error::ArchiveError;
pub use reader::ArchiveReader;
pub use writer::{write_int_map, ArchiveWriter};

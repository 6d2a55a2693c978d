//! Error type for archive I/O.

use std::fmt;
use std::io;

/// Errors that can occur while reading or writing a mesh archive.
#[derive(Debug)]
pub enum ArchiveError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// A required section header was never found.
    MissingSection {
        /// The section name that was expected.
        name: String,
    },
    /// A record could not be parsed as the expected shape.
    MalformedRecord {
        /// The section the record belongs to.
        section: String,
        /// Zero-based line number within the section.
        line: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A record had the wrong number of fields.
    WrongFieldCount {
        /// The section the record belongs to.
        section: String,
        /// Zero-based line number within the section.
        line: usize,
        /// Number of fields expected.
        expected: usize,
        /// Number of fields actually found.
        found: usize,
    },
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingSection { name } => write!(f, "archive has no `{name}` section"),
            Self::MalformedRecord {
                section,
                line,
                detail,
            } => write!(f, "{section}:{line}: malformed record: {detail}"),
            Self::WrongFieldCount {
                section,
                line,
                expected,
                found,
            } => write!(
                f,
                "{section}:{line}: expected {expected} fields, found {found}"
            ),
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchiveError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

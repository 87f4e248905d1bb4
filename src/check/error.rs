use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// Error raised by an individual consistency check
#[derive(Debug, Error)]
pub enum CheckError {
    /// A required source file is absent.
    #[error("Missing source file: {}", path.display())]
    MissingSource { path: PathBuf },

    /// A source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is present but its version field is absent or malformed.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A version string is not a valid PEP 440 version.
    #[error("Invalid version '{value}' from {source_name}")]
    InvalidVersion { value: String, source_name: String },

    /// All sources parsed but their values disagree with the invariant.
    /// Both values are reported so the stale source can be identified.
    #[error("{message} (expected {expected}, found {actual})")]
    Mismatch {
        message: String,
        expected: String,
        actual: String,
    },
}

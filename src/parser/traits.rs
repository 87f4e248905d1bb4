//! Parser trait definition

use crate::parser::types::{DeclaredVersion, SourceType};

/// Trait for extracting a declared version from a source document
pub trait SourceParser {
    /// The version source this parser reads
    fn source_type(&self) -> SourceType;

    /// Parse the content and extract the declared version
    fn parse(&self, content: &str) -> Result<DeclaredVersion, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to parse the file structure
    #[error("Failed to parse file: {0}")]
    ParseFailed(String),

    /// The document parsed but the expected field is absent
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Tree-sitter related error
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

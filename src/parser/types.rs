//! Common types for parsers

use serde::Serialize;

/// The version source a value was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// `_version.json` (the source of truth)
    VersionJson,
    /// `recipe.yaml` `context.version` field
    Recipe,
    /// `__version__` attribute of the package
    Runtime,
}

impl SourceType {
    /// Returns the string representation of the source type
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::VersionJson => "version_json",
            SourceType::Recipe => "recipe",
            SourceType::Runtime => "runtime",
        }
    }
}

/// A version value extracted from a source document
///
/// For the recipe source the value is the raw templated expression, not a
/// resolved version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredVersion {
    /// The extracted string, quotes stripped
    pub value: String,
    /// Source the value was read from
    pub source: SourceType,
    /// Byte offset of the value in the document (start)
    pub start_offset: usize,
    /// Byte offset of the value in the document (end)
    pub end_offset: usize,
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed)
    pub column: usize,
}

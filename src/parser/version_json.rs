//! _version.json parser
//!
//! The file is a JSON document with a top-level `version` key holding the
//! declared package version as a string:
//!
//! ```json
//! {"version": "1.2.3"}
//! ```

use tracing::warn;

use crate::parser::traits::{ParseError, SourceParser};
use crate::parser::types::{DeclaredVersion, SourceType};

/// Parser for _version.json files
pub struct VersionJsonParser;

impl VersionJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VersionJsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for VersionJsonParser {
    fn source_type(&self) -> SourceType {
        SourceType::VersionJson
    }

    fn parse(&self, content: &str) -> Result<DeclaredVersion, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_json::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set JSON language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse JSON content");
            ParseError::ParseFailed("Failed to parse JSON".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::ParseFailed("Invalid JSON".to_string()));
        }

        // Find the root object
        let Some(document) = root.child(0).filter(|node| node.kind() == "object") else {
            return Err(ParseError::ParseFailed(
                "Expected a top-level JSON object".to_string(),
            ));
        };

        self.extract_version(document, content)
            .ok_or_else(|| ParseError::MissingField("version".to_string()))
    }
}

impl VersionJsonParser {
    /// Extract the top-level "version" pair from the root object
    fn extract_version(
        &self,
        object_node: tree_sitter::Node,
        content: &str,
    ) -> Option<DeclaredVersion> {
        let mut cursor = object_node.walk();

        for child in object_node.children(&mut cursor) {
            if child.kind() != "pair" {
                continue;
            }

            let Some(key_node) = child.child_by_field_name("key") else {
                continue;
            };

            if self.get_string_value(key_node, content) != "version" {
                continue;
            }

            let Some(value_node) = child.child_by_field_name("value") else {
                continue;
            };

            if value_node.kind() != "string" {
                return None;
            }

            let value = self.get_string_value(value_node, content);

            let start_point = value_node.start_position();
            let start_offset = value_node.start_byte();
            let end_offset = value_node.end_byte();

            // Adjust for quotes - the actual value starts after the opening quote
            return Some(DeclaredVersion {
                value,
                source: SourceType::VersionJson,
                start_offset: start_offset + 1,
                end_offset: end_offset - 1,
                line: start_point.row,
                column: start_point.column + 1,
            });
        }

        None
    }

    /// Get the string value from a string node (removes quotes)
    fn get_string_value(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = &content[node.byte_range()];
        text.trim()
            .trim_start_matches('"')
            .trim_end_matches('"')
            .to_string()
    }
}

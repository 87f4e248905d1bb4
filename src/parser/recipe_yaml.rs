//! recipe.yaml parser
//!
//! Extracts the `context.version` field from a build recipe. The value is
//! returned raw: in a well-formed recipe it is a templated expression that
//! defers to _version.json at build time, e.g.
//!
//! ```yaml
//! context:
//!   version: ${{ load_from_file("_version.json").version }}
//! ```
//!
//! Both block and flow mapping styles are supported.

use tracing::warn;

use crate::parser::traits::{ParseError, SourceParser};
use crate::parser::types::{DeclaredVersion, SourceType};

/// Parser for recipe.yaml files
pub struct RecipeYamlParser;

impl SourceParser for RecipeYamlParser {
    fn source_type(&self) -> SourceType {
        SourceType::Recipe
    }

    fn parse(&self, content: &str) -> Result<DeclaredVersion, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_yaml::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set YAML language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse YAML content");
            ParseError::ParseFailed("Failed to parse YAML".to_string())
        })?;

        let root = tree.root_node();

        let Some(context_value) = self.find_pair_value(root, content, "context") else {
            return Err(ParseError::MissingField("context".to_string()));
        };

        let Some(version_pair) = self.find_pair(context_value, content, "version") else {
            return Err(ParseError::MissingField("context.version".to_string()));
        };

        self.extract_value(version_pair, content)
            .ok_or_else(|| ParseError::MissingField("context.version".to_string()))
    }
}

impl RecipeYamlParser {
    /// Mapping pair node kinds for block and flow styles
    const PAIR_KINDS: [&'static str; 2] = ["block_mapping_pair", "flow_pair"];

    /// Find the value node of the first mapping pair with the given key
    fn find_pair_value<'a>(
        &self,
        node: tree_sitter::Node<'a>,
        content: &str,
        key: &str,
    ) -> Option<tree_sitter::Node<'a>> {
        self.find_pair(node, content, key)?.child_by_field_name("value")
    }

    /// Find the first mapping pair with the given key, recursively
    fn find_pair<'a>(
        &self,
        node: tree_sitter::Node<'a>,
        content: &str,
        key: &str,
    ) -> Option<tree_sitter::Node<'a>> {
        if Self::PAIR_KINDS.contains(&node.kind())
            && let Some(key_node) = node.child_by_field_name("key")
            && self.get_node_text(key_node, content) == key
        {
            return Some(node);
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if let Some(found) = self.find_pair(child, content, key) {
                return Some(found);
            }
        }

        None
    }

    /// Extract the scalar value of a mapping pair with its source location
    fn extract_value(&self, pair: tree_sitter::Node, content: &str) -> Option<DeclaredVersion> {
        let value_node = pair.child_by_field_name("value")?;

        let raw_text = &content[value_node.byte_range()];
        let trimmed = raw_text.trim();

        // Detect and remove quotes
        let (value, has_quotes) = if (trimmed.starts_with('\'') && trimmed.ends_with('\''))
            || (trimmed.starts_with('"') && trimmed.ends_with('"'))
        {
            (&trimmed[1..trimmed.len() - 1], true)
        } else {
            (trimmed, false)
        };

        if value.is_empty() {
            return None;
        }

        let start_offset = value_node.start_byte();
        let end_offset = value_node.end_byte();
        let start_point = value_node.start_position();

        // Adjust offsets for quotes
        let (adjusted_start, adjusted_end, adjusted_column) = if has_quotes {
            (start_offset + 1, end_offset - 1, start_point.column + 1)
        } else {
            (start_offset, end_offset, start_point.column)
        };

        Some(DeclaredVersion {
            value: value.to_string(),
            source: SourceType::Recipe,
            start_offset: adjusted_start,
            end_offset: adjusted_end,
            line: start_point.row,
            column: adjusted_column,
        })
    }

    /// Get text content of a node, removing quotes if present
    fn get_node_text(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = &content[node.byte_range()];
        text.trim()
            .trim_start_matches('"')
            .trim_end_matches('"')
            .trim_start_matches('\'')
            .trim_end_matches('\'')
            .to_string()
    }
}

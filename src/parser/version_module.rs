//! __version__ attribute parser
//!
//! Recovers the version a package reports at runtime without executing it,
//! by extracting the `__version__` assignment from Python source. Reads the
//! generated `_version.py` in a built checkout, or the fallback assignment in
//! `__init__.py` otherwise.
//!
//! Format examples:
//! - Generated module: `__version__ = version = '1.2.3'`
//! - Fallback: `__version__ = "0.0.0.dev0"`

use regex::Regex;

use crate::parser::traits::{ParseError, SourceParser};
use crate::parser::types::{DeclaredVersion, SourceType};

/// Parser for the `__version__` attribute in Python modules
pub struct VersionModuleParser {
    /// Regex for `__version__ = "1.2.3"` (chained assignments allowed)
    version_re: Regex,
}

impl VersionModuleParser {
    pub fn new() -> Self {
        Self {
            // Match: __version__ = [version =] "1.2.3" or '1.2.3'
            // Leading whitespace allowed: fallback assignments sit inside an
            // except branch.
            version_re: Regex::new(
                r#"(?m)^\s*__version__\s*=\s*(?:version\s*=\s*)?["']([^"']+)["']"#,
            )
            .unwrap(),
        }
    }
}

impl Default for VersionModuleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for VersionModuleParser {
    fn source_type(&self) -> SourceType {
        SourceType::Runtime
    }

    fn parse(&self, content: &str) -> Result<DeclaredVersion, ParseError> {
        let caps = self
            .version_re
            .captures(content)
            .ok_or_else(|| ParseError::MissingField("__version__".to_string()))?;

        // Group 1 always participates when the pattern matches
        let value_match = caps.get(1).ok_or_else(|| {
            ParseError::ParseFailed("__version__ assignment without a value".to_string())
        })?;

        let start_offset = value_match.start();
        let end_offset = value_match.end();

        let before = &content[..start_offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|pos| pos + 1).unwrap_or(0);

        Ok(DeclaredVersion {
            value: value_match.as_str().to_string(),
            source: SourceType::Runtime,
            start_offset,
            end_offset,
            line,
            column: start_offset - line_start,
        })
    }
}

//! Recipe template-expression check
//!
//! The recipe must not pin a literal version: its `context.version` has to be
//! a templated expression that loads the version from _version.json at build
//! time, e.g.
//!
//! ```text
//! ${{ load_from_file("_version.json").version }}
//! ${{ load_from_file('_version.json').version + ".rc1" }}
//! ```
//!
//! Anything may follow the `.version` accessor (suffix concatenation for
//! pre-release tagging is common), so only the prefix is validated.

use regex::Regex;

/// Checks a recipe version definition against the expected template pattern
pub struct TemplateChecker {
    /// Regex for `${{ load_from_file("_version.json").version ... }}`
    template_re: Regex,
}

impl TemplateChecker {
    pub fn new() -> Self {
        Self {
            // Single- and double-quoted filename forms are both accepted
            template_re: Regex::new(
                r#"^\$\{\{\s*load_from_file\(\s*['"]_version\.json['"]\s*\)\s*\.version\b.*\}\}"#,
            )
            .unwrap(),
        }
    }

    /// Check whether a version definition matches the template pattern
    pub fn matches(&self, version_def: &str) -> bool {
        self.template_re.is_match(version_def)
    }
}

impl Default for TemplateChecker {
    fn default() -> Self {
        Self::new()
    }
}

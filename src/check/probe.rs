//! Build-state probe
//!
//! A built checkout carries a generated `_version.py` inside the package
//! directory; an unbuilt one does not. Absence is a valid state, not an
//! error, so the probe is a plain boolean capability query.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::config::VERSION_MODULE_FILE;

/// Whether the checkout has a generated version module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildState {
    /// Generated `_version.py` present
    Built,
    /// No generated version module; the package reports its fallback version
    Unbuilt,
}

impl BuildState {
    /// Returns the string representation of the build state
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildState::Built => "built",
            BuildState::Unbuilt => "unbuilt",
        }
    }
}

/// Probe the build state of a package directory
pub fn probe_build_state(package_dir: &Path) -> BuildState {
    let module_path = package_dir.join(VERSION_MODULE_FILE);
    let state = if module_path.is_file() {
        BuildState::Built
    } else {
        BuildState::Unbuilt
    };
    debug!(
        "Probed {} for {}: {}",
        package_dir.display(),
        VERSION_MODULE_FILE,
        state.as_str()
    );
    state
}

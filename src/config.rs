use std::path::{Path, PathBuf};

use thiserror::Error;

// =============================================================================
// Source file names
// =============================================================================

/// JSON file holding the declared package version (source of truth).
pub const VERSION_JSON_FILE: &str = "_version.json";

/// Build recipe whose `context.version` defers to the JSON file.
pub const RECIPE_FILE: &str = "recipe.yaml";

/// Generated version module; its presence marks a built checkout.
pub const VERSION_MODULE_FILE: &str = "_version.py";

/// Package init module holding the fallback `__version__` assignment.
pub const INIT_FILE: &str = "__init__.py";

/// Version reported by an unbuilt checkout.
pub const FALLBACK_VERSION: &str = "0.0.0.dev0";

/// Resolved locations of every version source in a checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLayout {
    /// Checkout root directory
    pub root: PathBuf,
    /// Path to `_version.json`
    pub version_json: PathBuf,
    /// Path to `recipe.yaml`
    pub recipe: PathBuf,
    /// Package directory containing `__init__.py`
    pub package_dir: PathBuf,
}

/// Error while resolving a checkout layout
#[derive(Debug, Error)]
pub enum LayoutError {
    /// No directory with an `__init__.py` was found under the root.
    #[error("No package directory found under {}", root.display())]
    PackageNotFound { root: PathBuf },

    /// The explicitly named package directory has no `__init__.py`.
    #[error("{} is not a package directory (no __init__.py)", dir.display())]
    NotAPackage { dir: PathBuf },

    /// Failed to scan the checkout root.
    #[error("Failed to scan {}: {source}", root.display())]
    Scan {
        root: PathBuf,
        source: std::io::Error,
    },
}

impl CheckoutLayout {
    /// Resolve the layout for a checkout root.
    ///
    /// When `package` is given, the package directory is `root/<package>` and
    /// must contain an `__init__.py`. Otherwise the root is scanned for the
    /// first directory holding an `__init__.py`; hidden and
    /// underscore-prefixed directories are skipped.
    pub fn discover(root: &Path, package: Option<&str>) -> Result<Self, LayoutError> {
        let package_dir = match package {
            Some(name) => {
                let dir = root.join(name);
                if !dir.join(INIT_FILE).is_file() {
                    return Err(LayoutError::NotAPackage { dir });
                }
                dir
            }
            None => find_package_dir(root)?,
        };

        Ok(Self {
            root: root.to_path_buf(),
            version_json: root.join(VERSION_JSON_FILE),
            recipe: root.join(RECIPE_FILE),
            package_dir,
        })
    }
}

/// Find the first package directory under the root, in name order.
fn find_package_dir(root: &Path) -> Result<PathBuf, LayoutError> {
    let entries = std::fs::read_dir(root).map_err(|source| LayoutError::Scan {
        root: root.to_path_buf(),
        source,
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('.') && !name.starts_with('_'))
        })
        .filter(|path| path.join(INIT_FILE).is_file())
        .collect();

    // Directory iteration order is platform-dependent
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| LayoutError::PackageNotFound {
            root: root.to_path_buf(),
        })
}

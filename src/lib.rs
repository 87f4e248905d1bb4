//! version-audit: consistency auditing for package version metadata
//!
//! A checkout declares its version in several places that must agree:
//! `_version.json` (the source of truth), the `context.version` field of
//! `recipe.yaml` (a templated expression resolved at build time), and the
//! `__version__` attribute of the package itself. This crate reads each
//! source, determines whether the checkout is built or unbuilt, and reports
//! per-check pass/fail outcomes.
//!
//! # Modules
//!
//! - [`config`]: source file names and checkout layout discovery
//! - [`parser`]: per-source parsers extracting declared versions
//! - [`check`]: build-state probe, version policies, and the check runner

pub mod check;
pub mod config;
pub mod parser;

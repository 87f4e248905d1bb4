//! Shared PEP 440 version utilities

use std::str::FromStr;

use pep508_rs::pep440_rs::Version;
use tracing::warn;

/// Parse a version string into a PEP 440 version.
///
/// Comparisons elsewhere operate on parsed versions, so formatting variants
/// a PEP 440 parser normalizes (leading zeros, separator spelling) compare
/// equal.
pub fn parse_version(value: &str) -> Option<Version> {
    Version::from_str(value)
        .inspect_err(|e| {
            warn!("Failed to parse version '{}': {}", value, e);
        })
        .ok()
}

/// Check whether a version satisfies the unbuilt fallback policy.
///
/// The fallback placeholder is `0.0.0.dev0`: base release exactly 0.0.0,
/// no pre-release, no post-release, and the placeholder's dev marker.
pub fn is_fallback(version: &Version) -> bool {
    *version.release() == [0, 0, 0]
        && version.pre().is_none()
        && version.post().is_none()
        && version.dev() == Some(0)
}

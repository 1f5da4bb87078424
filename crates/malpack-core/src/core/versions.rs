// crates/malpack-core/src/core/versions.rs
// ============================================================================
// Module: Malpack Version Ordering
// Description: Deterministic ordering for affected version lists.
// Purpose: Sort version lists by semver precedence with a total fallback.
// Dependencies: semver
// ============================================================================

//! ## Overview
//! Affected version lists are emitted in ascending semantic-version order.
//! Registry version strings are not always valid semantic versions (PyPI
//! post-releases, two-component npm versions); when ANY element of a list
//! fails to parse, the WHOLE list falls back to plain lexicographic order.
//! The sort never fails and never partially applies semver precedence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use semver::Version;

// ============================================================================
// SECTION: Version Ordering
// ============================================================================

/// Ordering applied to a version list by [`sort_versions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOrder {
    /// Every element parsed; the list is in semver precedence order.
    Semantic,
    /// At least one element failed to parse; the list is in lexicographic
    /// order.
    Lexicographic,
}

/// Sorts a version list ascending, reporting which ordering was used.
pub fn sort_versions(versions: &mut Vec<String>) -> VersionOrder {
    let parsed: Result<Vec<Version>, semver::Error> =
        versions.iter().map(|version| Version::parse(version)).collect();
    let Ok(parsed) = parsed else {
        versions.sort();
        return VersionOrder::Lexicographic;
    };

    let mut keyed: Vec<(Version, String)> =
        parsed.into_iter().zip(std::mem::take(versions)).collect();
    keyed.sort_by(|left, right| left.0.cmp(&right.0));
    *versions = keyed.into_iter().map(|(_, version)| version).collect();
    VersionOrder::Semantic
}

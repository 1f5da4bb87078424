// crates/malpack-core/src/core/manifest.rs
// ============================================================================
// Module: Malpack Manifest Model
// Description: The synchronized dataset manifest artifact.
// Purpose: Hold package-to-versions entries with deterministic serialization.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The manifest maps package names to either a list of known-malicious
//! versions (compromised legitimate library) or `null` (purpose-built
//! malicious package, or not yet triaged; the artifact format cannot tell
//! the two apart). Keys serialize in case-sensitive sorted order so repeated
//! runs over identical stores produce byte-identical output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

// ============================================================================
// SECTION: Manifest
// ============================================================================

/// Version-list entry for a single manifest package.
pub type ManifestEntry = Option<Vec<String>>;

/// The dataset manifest: package name to known-malicious versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    /// Entries ordered by package name.
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Inserts or replaces the entry for a package.
    pub fn insert(&mut self, package: impl Into<String>, entry: ManifestEntry) {
        self.entries.insert(package.into(), entry);
    }

    /// Returns the entry for a package when present.
    #[must_use]
    pub fn get(&self, package: &str) -> Option<&ManifestEntry> {
        self.entries.get(package)
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }

    /// Parses a manifest from its JSON object form.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] when the input is not a JSON object
    /// of the manifest shape.
    pub fn from_json_str(input: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(input).map_err(|err| ManifestError::Parse(err.to_string()))
    }

    /// Serializes the manifest as pretty JSON.
    ///
    /// Published dataset manifests use four-space indentation; the output
    /// here must stay byte-compatible with them.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Serialize`] when serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ManifestError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|err| ManifestError::Serialize(err.to_string()))?;
        String::from_utf8(buffer).map_err(|err| ManifestError::Serialize(err.to_string()))
    }
}

// ============================================================================
// SECTION: Package Classification
// ============================================================================

/// Internal tri-state classification of one synchronized package.
///
/// The manifest artifact only has two observable shapes: a version list or
/// `null`. [`PackageClassification::Untriaged`] and
/// [`PackageClassification::MaliciousIntent`] therefore collapse into the
/// same `null` entry when converted; the tri-state exists so the engine and
/// its callers do not lose the distinction before the final serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageClassification {
    /// No triage determination exists for the package.
    Untriaged,
    /// Legitimate library; the listed versions are tainted.
    CompromisedLib(Vec<String>),
    /// Purpose-built malicious package; version enumeration is meaningless.
    MaliciousIntent,
}

impl PackageClassification {
    /// Collapses the classification into its manifest entry shape.
    #[must_use]
    pub fn into_entry(self) -> ManifestEntry {
        match self {
            Self::CompromisedLib(versions) => Some(versions),
            Self::Untriaged | Self::MaliciousIntent => None,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while reading or writing manifests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// The input is not valid manifest JSON.
    #[error("manifest parse error: {0}")]
    Parse(String),
    /// The manifest could not be serialized.
    #[error("manifest serialize error: {0}")]
    Serialize(String),
}

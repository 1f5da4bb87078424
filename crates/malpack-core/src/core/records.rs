// crates/malpack-core/src/core/records.rs
// ============================================================================
// Module: Malpack Store Records
// Description: Advisory and triage record types read from backing stores.
// Purpose: Model store rows and derive package identity and verdicts from them.
// Dependencies: crate::core::keys, serde, thiserror
// ============================================================================

//! ## Overview
//! Advisory records describe one security advisory for one package; triage
//! records carry the human or automated verdict for the same composite key.
//! Both are keyed by the encoded package key plus a numeric attack
//! identifier. Record decoding is lenient (missing affected fields default
//! to empty) but identity derivation is strict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::keys::KeyError;
use crate::core::keys::PackageKey;

// ============================================================================
// SECTION: Advisory Records
// ============================================================================

/// Package identity named inside an advisory's affected block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedPackage {
    /// Ecosystem display token (for example `npm` or `PyPI`).
    #[serde(default)]
    pub ecosystem: String,
    /// Package name.
    #[serde(default)]
    pub name: String,
}

/// Per-ecosystem affected block inside an advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedBlock {
    /// The package the block concerns.
    #[serde(default)]
    pub package: AffectedPackage,
    /// Affected version strings, as published in the advisory.
    #[serde(default)]
    pub versions: Vec<String>,
}

/// One security advisory entry for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryRecord {
    /// Encoded package key (`"<name>|<ecosystem>"`), the store hash key.
    pub package: String,
    /// Attack identifier, the store range key.
    pub attack_id: i64,
    /// Ordered affected blocks published with the advisory.
    pub affected: Vec<AffectedBlock>,
    /// Advisory last-modified time in seconds since the epoch.
    pub timestamp: i64,
}

impl AdvisoryRecord {
    /// Derives the advisory's own package identity from its store key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] when the stored key does not decode.
    pub fn ecosystem_package(&self) -> Result<PackageKey, KeyError> {
        PackageKey::decode(&self.package)
    }

    /// Extracts the affected versions for the advisory's own package.
    ///
    /// Exactly one affected block should name the advisory's own ecosystem
    /// and package; its version list is returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisoryError::MissingAffectedBlock`] when no block matches,
    /// and [`AdvisoryError::Key`] when the advisory's own key is malformed.
    pub fn affected_versions(&self) -> Result<Vec<String>, AdvisoryError> {
        let key = self.ecosystem_package()?;
        let ecosystem_token = key.ecosystem.to_string();
        for block in &self.affected {
            if block.package.ecosystem != ecosystem_token || block.package.name != key.name {
                continue;
            }
            return Ok(block.versions.clone());
        }
        Err(AdvisoryError::MissingAffectedBlock {
            key: key.to_string(),
        })
    }
}

// ============================================================================
// SECTION: Triage Records
// ============================================================================

/// One triage verdict row for a `(package, attack_id)` composite key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRecord {
    /// Encoded package key (`"<name>|<ecosystem>"`), the store hash key.
    pub package: String,
    /// Attack identifier, the store range key.
    pub attack_id: i64,
    /// Whether the package is a compromised legitimate library. Absent means
    /// the row exists but carries no compromised-library determination.
    #[serde(default)]
    pub compromised_lib: Option<bool>,
}

/// Triage outcome for one advisory's package.
///
/// The manifest artifact cannot distinguish [`TriageVerdict::Untriaged`]
/// from [`TriageVerdict::MaliciousIntent`]: both collapse to a `null`
/// version list. The distinction is kept internally so callers can observe
/// it, but no third observable manifest shape is invented for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageVerdict {
    /// No triage record exists, or the record carries no determination.
    Untriaged,
    /// The package is a legitimate library with tainted versions.
    CompromisedLib,
    /// The package was triaged and is not a compromised library; every
    /// observed instance is malicious by intent.
    MaliciousIntent,
}

impl TriageVerdict {
    /// Derives the verdict from an optional triage record.
    #[must_use]
    pub fn from_record(record: Option<&TriageRecord>) -> Self {
        match record.and_then(|record| record.compromised_lib) {
            Some(true) => Self::CompromisedLib,
            Some(false) => Self::MaliciousIntent,
            None => Self::Untriaged,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while interpreting advisory records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisoryError {
    /// No affected block matches the advisory's own package.
    #[error("malformed advisory: no affected block for concerned package {key}")]
    MissingAffectedBlock {
        /// Display form of the advisory's package identity.
        key: String,
    },
    /// The advisory's own store key is malformed.
    #[error(transparent)]
    Key(#[from] KeyError),
}

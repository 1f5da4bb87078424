// crates/malpack-core/src/runtime/sync.rs
// ============================================================================
// Module: Malpack Synchronizer
// Description: The manifest synchronization engine.
// Purpose: Merge recent advisories and triage verdicts into a manifest.
// Dependencies: crate::{core, interfaces, runtime}, thiserror, tracing
// ============================================================================

//! ## Overview
//! The synchronizer correlates three inputs: the prior manifest, the
//! advisories changed since a cutoff, and the triage verdict for each
//! advisory's package. Compromised libraries keep a sorted affected-version
//! list; everything else maps to a `null` entry. Advisory processing order
//! follows the store and is commutative for the final manifest. Any store
//! failure aborts the run; a partial manifest is never produced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tracing::warn;

use crate::core::Ecosystem;
use crate::core::keys::KeyError;
use crate::core::manifest::Manifest;
use crate::core::manifest::PackageClassification;
use crate::core::records::AdvisoryError;
use crate::core::records::AdvisoryRecord;
use crate::core::records::TriageVerdict;
use crate::core::versions::VersionOrder;
use crate::core::versions::sort_versions;
use crate::interfaces::AdvisoryStore;
use crate::interfaces::StoreError;
use crate::interfaces::TriageStore;
use crate::runtime::advisories::AdvisoryReader;
use crate::runtime::triage::TriageReader;

// ============================================================================
// SECTION: Synchronizer
// ============================================================================

/// Manifest synchronization engine over advisory and triage stores.
#[derive(Debug)]
pub struct Synchronizer<A, T> {
    /// Validated advisory access.
    advisories: AdvisoryReader<A>,
    /// Triage verdict access.
    triage: TriageReader<T>,
}

impl<A: AdvisoryStore, T: TriageStore> Synchronizer<A, T> {
    /// Creates a synchronizer over the given stores.
    #[must_use]
    pub const fn new(advisory_store: A, triage_store: T) -> Self {
        Self {
            advisories: AdvisoryReader::new(advisory_store),
            triage: TriageReader::new(triage_store),
        }
    }

    /// Synchronizes a manifest against advisories changed since `since`.
    ///
    /// The output starts as a copy of `input`; every advisory in the sync
    /// window inserts or replaces the entry for its package. Entries for
    /// packages outside the window are preserved untouched. Re-running with
    /// the same cutoff over the previous output is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when a store operation fails, when an advisory
    /// being processed has a malformed key, or when a compromised-library
    /// advisory names no affected block for its own package.
    pub fn sync(
        &self,
        input: &Manifest,
        ecosystem: Ecosystem,
        since: i64,
    ) -> Result<Manifest, SyncError> {
        let mut output = input.clone();

        let advisories = self.advisories.scan_latest(ecosystem, since)?;
        for advisory in advisories {
            let key = advisory.ecosystem_package()?;
            let verdict = self.triage.query_verdict(key.ecosystem, &key.name, advisory.attack_id)?;

            let classification = match TriageVerdict::from_record(verdict.as_ref()) {
                TriageVerdict::CompromisedLib => {
                    PackageClassification::CompromisedLib(resolve_affected_versions(&advisory)?)
                }
                TriageVerdict::MaliciousIntent => PackageClassification::MaliciousIntent,
                TriageVerdict::Untriaged => PackageClassification::Untriaged,
            };
            output.insert(key.name, classification.into_entry());
        }

        Ok(output)
    }
}

/// Resolves and sorts the affected versions of a compromised library.
fn resolve_affected_versions(advisory: &AdvisoryRecord) -> Result<Vec<String>, SyncError> {
    let mut versions = advisory.affected_versions()?;
    if versions.is_empty() {
        warn!(
            package = %advisory.package,
            "advisory for compromised library lists no affected versions"
        );
    }
    if sort_versions(&mut versions) == VersionOrder::Lexicographic {
        warn!(
            package = %advisory.package,
            "failed to semantically sort affected versions; using lexicographic order"
        );
    }
    Ok(versions)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort a synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A store scan or query failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The advisory being processed has a malformed package key.
    #[error(transparent)]
    Key(#[from] KeyError),
    /// The advisory being processed has no affected block for its package.
    #[error(transparent)]
    Advisory(#[from] AdvisoryError),
}

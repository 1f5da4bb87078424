// crates/malpack-core/src/runtime/advisories.rs
// ============================================================================
// Module: Malpack Advisory Reader
// Description: Validated advisory access over an advisory store.
// Purpose: Scan recent advisories and reject suffix-mismatched scan results.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! The backing store filters scans by substring containment, which can
//! over-match keys that merely embed an ecosystem token inside a package
//! name. The reader re-validates every scan result against the exact key
//! suffix in a single partition pass: mismatches are dropped and logged as
//! an anomaly, never returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::warn;

use crate::core::Ecosystem;
use crate::core::records::AdvisoryRecord;
use crate::interfaces::AdvisoryStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Advisory Reader
// ============================================================================

/// Validated reader over an advisory store.
#[derive(Debug)]
pub struct AdvisoryReader<S> {
    /// Backing advisory store.
    store: S,
}

impl<S: AdvisoryStore> AdvisoryReader<S> {
    /// Creates a reader over the given store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Scans for advisories in `ecosystem` modified at or after `since`.
    ///
    /// Results whose key does not END with the exact ecosystem suffix are
    /// discarded; the offending keys are logged in sorted order as one
    /// anomaly warning.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the underlying scan fails.
    pub fn scan_latest(
        &self,
        ecosystem: Ecosystem,
        since: i64,
    ) -> Result<Vec<AdvisoryRecord>, StoreError> {
        let results = self.store.scan_advisories(ecosystem, since)?;
        let suffix = ecosystem.key_suffix();

        let mut validated = Vec::with_capacity(results.len());
        let mut anomalies = Vec::new();
        for advisory in results {
            if advisory.package.ends_with(&suffix) {
                validated.push(advisory);
            } else {
                anomalies.push(advisory.package);
            }
        }

        if !anomalies.is_empty() {
            anomalies.sort();
            let anomaly_keys = anomalies.join(", ");
            warn!(packages = %anomaly_keys, "detected advisories with dubious package keys");
        }

        Ok(validated)
    }
}

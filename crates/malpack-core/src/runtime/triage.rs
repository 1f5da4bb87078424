// crates/malpack-core/src/runtime/triage.rs
// ============================================================================
// Module: Malpack Triage Reader
// Description: Verdict lookup over a triage store.
// Purpose: Resolve the triage record for one package and attack identifier.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! Triage verdicts are addressed by the exact encoded package key plus the
//! attack identifier. A well-formed store holds at most one record per
//! composite key; when more than one comes back the reader logs a
//! multiplicity warning and keeps the first record in store-return order.
//! Which duplicate wins is stable for a fixed store response but carries no
//! domain meaning.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::warn;

use crate::core::Ecosystem;
use crate::core::keys::PackageKey;
use crate::core::records::TriageRecord;
use crate::interfaces::StoreError;
use crate::interfaces::TriageStore;

// ============================================================================
// SECTION: Triage Reader
// ============================================================================

/// Verdict reader over a triage store.
#[derive(Debug)]
pub struct TriageReader<S> {
    /// Backing triage store.
    store: S,
}

impl<S: TriageStore> TriageReader<S> {
    /// Creates a reader over the given store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Queries the triage record for one package and attack identifier.
    ///
    /// Returns `None` when no record exists, which is distinct from a
    /// record that is present but carries no compromised-library
    /// determination.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the underlying query fails.
    pub fn query_verdict(
        &self,
        ecosystem: Ecosystem,
        package: &str,
        attack_id: i64,
    ) -> Result<Option<TriageRecord>, StoreError> {
        let key = PackageKey::new(ecosystem, package).encode();
        let mut results = self.store.query_triage(&key, attack_id)?;

        if results.is_empty() {
            return Ok(None);
        }
        if results.len() > 1 {
            warn!(
                package = %key,
                attack_id,
                "package has multiple triage records for one attack id"
            );
        }
        Ok(Some(results.swap_remove(0)))
    }
}

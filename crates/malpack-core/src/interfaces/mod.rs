// crates/malpack-core/src/interfaces/mod.rs
// ============================================================================
// Module: Malpack Store Interfaces
// Description: Backend-agnostic interfaces for advisory and triage stores.
// Purpose: Define the contract surfaces the synchronization runtime queries.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Store interfaces decouple the synchronization engine from any concrete
//! record store. Implementations resolve pagination internally and return
//! complete result sets; page ordering is not guaranteed and callers must
//! not assume it. Any store failure is terminal for the operation; partial
//! results are never returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Ecosystem;
use crate::core::records::AdvisoryRecord;
use crate::core::records::TriageRecord;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O or connectivity error.
    #[error("record store io error: {0}")]
    Io(String),
    /// A stored item cannot be decoded into its record type.
    #[error("record store invalid data: {0}")]
    Invalid(String),
    /// The store reported an operation error.
    #[error("record store error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Advisory Store
// ============================================================================

/// Store of security advisory records.
pub trait AdvisoryStore {
    /// Scans for advisories whose encoded package key CONTAINS the
    /// ecosystem's key suffix and whose timestamp is at or after `since`
    /// (seconds since the epoch).
    ///
    /// The store filter language only supports substring containment, so
    /// results may include keys that merely embed the suffix; callers must
    /// validate that keys END with the suffix before use.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when any page of the scan fails.
    fn scan_advisories(
        &self,
        ecosystem: Ecosystem,
        since: i64,
    ) -> Result<Vec<AdvisoryRecord>, StoreError>;
}

impl<S: AdvisoryStore + ?Sized> AdvisoryStore for &S {
    fn scan_advisories(
        &self,
        ecosystem: Ecosystem,
        since: i64,
    ) -> Result<Vec<AdvisoryRecord>, StoreError> {
        (**self).scan_advisories(ecosystem, since)
    }
}

// ============================================================================
// SECTION: Triage Store
// ============================================================================

/// Store of triage verdict records.
pub trait TriageStore {
    /// Queries triage records by exact encoded package key and attack
    /// identifier.
    ///
    /// A well-formed store holds at most one record per composite key;
    /// callers handle multiplicity as an integrity anomaly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when any page of the query fails.
    fn query_triage(
        &self,
        package_key: &str,
        attack_id: i64,
    ) -> Result<Vec<TriageRecord>, StoreError>;
}

impl<S: TriageStore + ?Sized> TriageStore for &S {
    fn query_triage(
        &self,
        package_key: &str,
        attack_id: i64,
    ) -> Result<Vec<TriageRecord>, StoreError> {
        (**self).query_triage(package_key, attack_id)
    }
}

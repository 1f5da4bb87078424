// crates/malpack-core/src/runtime/memory.rs
// ============================================================================
// Module: Malpack In-Memory Stores
// Description: Simple in-memory advisory and triage stores for tests and demos.
// Purpose: Provide deterministic store implementations without external deps.
// Dependencies: crate::{core, interfaces, runtime::pagination}
// ============================================================================

//! ## Overview
//! This module provides in-memory implementations of [`AdvisoryStore`] and
//! [`TriageStore`] for tests and local demos. They reproduce the backing
//! store's observable behavior (substring-containment scan filtering and
//! cursor-based pagination) so validation logic layered above them can be
//! exercised faithfully. They are not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Ecosystem;
use crate::core::records::AdvisoryRecord;
use crate::core::records::TriageRecord;
use crate::interfaces::AdvisoryStore;
use crate::interfaces::StoreError;
use crate::interfaces::TriageStore;
use crate::runtime::pagination::Page;
use crate::runtime::pagination::collect_pages;

// ============================================================================
// SECTION: In-Memory Advisory Store
// ============================================================================

/// Default number of items per synthetic page.
const DEFAULT_PAGE_SIZE: usize = 100;

/// In-memory advisory store for tests and examples.
#[derive(Debug, Clone)]
pub struct InMemoryAdvisoryStore {
    /// Stored advisory records in insertion order.
    records: Vec<AdvisoryRecord>,
    /// Number of items returned per page.
    page_size: usize,
}

impl InMemoryAdvisoryStore {
    /// Creates a store over the given records with the default page size.
    #[must_use]
    pub fn new(records: Vec<AdvisoryRecord>) -> Self {
        Self::with_page_size(records, DEFAULT_PAGE_SIZE)
    }

    /// Creates a store that splits results into pages of `page_size` items.
    #[must_use]
    pub fn with_page_size(records: Vec<AdvisoryRecord>, page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
        }
    }
}

impl AdvisoryStore for InMemoryAdvisoryStore {
    fn scan_advisories(
        &self,
        ecosystem: Ecosystem,
        since: i64,
    ) -> Result<Vec<AdvisoryRecord>, StoreError> {
        let suffix = ecosystem.key_suffix();
        let matches: Vec<AdvisoryRecord> = self
            .records
            .iter()
            .filter(|record| record.package.contains(&suffix) && record.timestamp >= since)
            .cloned()
            .collect();
        collect_pages(|cursor| Ok(paginate(&matches, self.page_size, cursor)))
    }
}

// ============================================================================
// SECTION: In-Memory Triage Store
// ============================================================================

/// In-memory triage store for tests and examples.
#[derive(Debug, Clone)]
pub struct InMemoryTriageStore {
    /// Stored triage records in insertion order.
    records: Vec<TriageRecord>,
    /// Number of items returned per page.
    page_size: usize,
}

impl InMemoryTriageStore {
    /// Creates a store over the given records with the default page size.
    #[must_use]
    pub fn new(records: Vec<TriageRecord>) -> Self {
        Self::with_page_size(records, DEFAULT_PAGE_SIZE)
    }

    /// Creates a store that splits results into pages of `page_size` items.
    #[must_use]
    pub fn with_page_size(records: Vec<TriageRecord>, page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
        }
    }
}

impl TriageStore for InMemoryTriageStore {
    fn query_triage(
        &self,
        package_key: &str,
        attack_id: i64,
    ) -> Result<Vec<TriageRecord>, StoreError> {
        let matches: Vec<TriageRecord> = self
            .records
            .iter()
            .filter(|record| record.package == package_key && record.attack_id == attack_id)
            .cloned()
            .collect();
        collect_pages(|cursor| Ok(paginate(&matches, self.page_size, cursor)))
    }
}

// ============================================================================
// SECTION: Synthetic Pagination
// ============================================================================

/// Slices a result set into one synthetic page at the cursor offset.
fn paginate<T: Clone>(items: &[T], page_size: usize, cursor: Option<usize>) -> Page<T, usize> {
    let start = cursor.unwrap_or(0);
    let end = start.saturating_add(page_size).min(items.len());
    let next_cursor = (end < items.len()).then_some(end);
    Page {
        items: items[start..end].to_vec(),
        next_cursor,
    }
}

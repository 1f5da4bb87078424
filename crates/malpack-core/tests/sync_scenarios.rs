// crates/malpack-core/tests/sync_scenarios.rs
// ============================================================================
// Module: Synchronizer Scenario Tests
// Description: End-to-end synchronization scenarios over in-memory stores.
// ============================================================================

//! ## Overview
//! Exercises the synchronization engine against in-memory stores: the
//! compromised-library and malicious-intent outcomes, pagination, suffix
//! validation of scan results, duplicate-triage handling, prior-manifest
//! preservation, and idempotence.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use malpack_core::AdvisoryReader;
use malpack_core::AdvisoryRecord;
use malpack_core::AdvisoryStore;
use malpack_core::AffectedBlock;
use malpack_core::AffectedPackage;
use malpack_core::Ecosystem;
use malpack_core::InMemoryAdvisoryStore;
use malpack_core::InMemoryTriageStore;
use malpack_core::Manifest;
use malpack_core::StoreError;
use malpack_core::SyncError;
use malpack_core::Synchronizer;
use malpack_core::TriageRecord;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Builds an advisory for one package with a single matching affected block.
fn advisory(ecosystem: Ecosystem, name: &str, attack_id: i64, versions: &[&str]) -> AdvisoryRecord {
    AdvisoryRecord {
        package: format!("{name}|{}", ecosystem.key_token()),
        attack_id,
        affected: vec![AffectedBlock {
            package: AffectedPackage {
                ecosystem: ecosystem.to_string(),
                name: name.to_string(),
            },
            versions: versions.iter().map(ToString::to_string).collect(),
        }],
        timestamp: 1_700_000_000,
    }
}

/// Builds a triage record for one package.
fn triage(
    ecosystem: Ecosystem,
    name: &str,
    attack_id: i64,
    compromised_lib: Option<bool>,
) -> TriageRecord {
    TriageRecord {
        package: format!("{name}|{}", ecosystem.key_token()),
        attack_id,
        compromised_lib,
    }
}

/// Runs a synchronization over in-memory stores.
fn run_sync(
    input: &Manifest,
    ecosystem: Ecosystem,
    advisories: Vec<AdvisoryRecord>,
    triage_records: Vec<TriageRecord>,
) -> Result<Manifest, SyncError> {
    let synchronizer = Synchronizer::new(
        InMemoryAdvisoryStore::new(advisories),
        InMemoryTriageStore::new(triage_records),
    );
    synchronizer.sync(input, ecosystem, 0)
}

// ============================================================================
// SECTION: Verdict Outcomes
// ============================================================================

/// Tests the new compromised-library advisory scenario.
#[test]
fn test_compromised_lib_advisory_lists_sorted_versions() {
    let output = run_sync(
        &Manifest::new(),
        Ecosystem::PyPI,
        vec![advisory(Ecosystem::PyPI, "evil-pkg", 7, &["2.0.0", "1.0.0"])],
        vec![triage(Ecosystem::PyPI, "evil-pkg", 7, Some(true))],
    )
    .unwrap();

    assert_eq!(output.len(), 1);
    assert_eq!(
        output.get("evil-pkg"),
        Some(&Some(vec!["1.0.0".to_string(), "2.0.0".to_string()]))
    );
}

/// Tests the malicious-intent outcome when no triage record exists.
#[test]
fn test_untriaged_advisory_maps_to_null_entry() {
    let output = run_sync(
        &Manifest::new(),
        Ecosystem::PyPI,
        vec![advisory(Ecosystem::PyPI, "evil-pkg", 7, &["2.0.0", "1.0.0"])],
        Vec::new(),
    )
    .unwrap();

    assert_eq!(output.get("evil-pkg"), Some(&None));
}

/// Tests the malicious-intent outcome when the verdict is explicit.
#[test]
fn test_malicious_intent_verdict_maps_to_null_entry() {
    let output = run_sync(
        &Manifest::new(),
        Ecosystem::PyPI,
        vec![advisory(Ecosystem::PyPI, "evil-pkg", 7, &["1.0.0"])],
        vec![triage(Ecosystem::PyPI, "evil-pkg", 7, Some(false))],
    )
    .unwrap();

    assert_eq!(output.get("evil-pkg"), Some(&None));
}

/// Tests that a compromised library with no enumerated versions is kept
/// with an empty list rather than failing the run.
#[test]
fn test_compromised_lib_with_no_versions_is_not_fatal() {
    let output = run_sync(
        &Manifest::new(),
        Ecosystem::Npm,
        vec![advisory(Ecosystem::Npm, "hollow-pkg", 3, &[])],
        vec![triage(Ecosystem::Npm, "hollow-pkg", 3, Some(true))],
    )
    .unwrap();

    assert_eq!(output.get("hollow-pkg"), Some(&Some(Vec::new())));
}

/// Tests the whole-list lexicographic fallback inside a full run.
#[test]
fn test_unparseable_versions_fall_back_lexicographic() {
    let output = run_sync(
        &Manifest::new(),
        Ecosystem::PyPI,
        vec![advisory(Ecosystem::PyPI, "evil-pkg", 7, &["1.0", "0.9", "0.10"])],
        vec![triage(Ecosystem::PyPI, "evil-pkg", 7, Some(true))],
    )
    .unwrap();

    assert_eq!(
        output.get("evil-pkg"),
        Some(&Some(vec!["0.10".to_string(), "0.9".to_string(), "1.0".to_string()]))
    );
}

/// Tests that an advisory without a matching affected block aborts the run.
#[test]
fn test_missing_affected_block_aborts_the_run() {
    let mut broken = advisory(Ecosystem::PyPI, "evil-pkg", 7, &["1.0.0"]);
    broken.affected.clear();
    let result = run_sync(
        &Manifest::new(),
        Ecosystem::PyPI,
        vec![broken],
        vec![triage(Ecosystem::PyPI, "evil-pkg", 7, Some(true))],
    );
    assert!(matches!(result, Err(SyncError::Advisory(_))));
}

// ============================================================================
// SECTION: Merge Semantics
// ============================================================================

/// Tests that prior entries outside the sync window are preserved.
#[test]
fn test_prior_manifest_entries_are_preserved() {
    let mut input = Manifest::new();
    input.insert("untouched-pkg", Some(vec!["1.0".to_string()]));

    let output = run_sync(
        &input,
        Ecosystem::PyPI,
        vec![advisory(Ecosystem::PyPI, "evil-pkg", 7, &["1.0.0"])],
        vec![triage(Ecosystem::PyPI, "evil-pkg", 7, Some(true))],
    )
    .unwrap();

    assert_eq!(output.len(), 2);
    assert_eq!(output.get("untouched-pkg"), Some(&Some(vec!["1.0".to_string()])));
    assert_eq!(output.get("evil-pkg"), Some(&Some(vec!["1.0.0".to_string()])));
}

/// Tests that a fresh verdict replaces the prior entry for the package.
#[test]
fn test_fresh_verdict_replaces_prior_entry() {
    let mut input = Manifest::new();
    input.insert("evil-pkg", Some(vec!["0.1.0".to_string()]));

    let output = run_sync(
        &input,
        Ecosystem::PyPI,
        vec![advisory(Ecosystem::PyPI, "evil-pkg", 7, &["1.0.0"])],
        Vec::new(),
    )
    .unwrap();

    assert_eq!(output.get("evil-pkg"), Some(&None));
}

/// Tests idempotence: re-running over the first output changes nothing.
#[test]
fn test_sync_is_idempotent() {
    let advisories = vec![
        advisory(Ecosystem::Npm, "evil-a", 1, &["1.0.0", "0.1.0"]),
        advisory(Ecosystem::Npm, "evil-b", 2, &["3.0.0"]),
    ];
    let triage_records = vec![triage(Ecosystem::Npm, "evil-a", 1, Some(true))];

    let first = run_sync(
        &Manifest::new(),
        Ecosystem::Npm,
        advisories.clone(),
        triage_records.clone(),
    )
    .unwrap();
    let second = run_sync(&first, Ecosystem::Npm, advisories, triage_records).unwrap();

    assert_eq!(first, second);
}

// ============================================================================
// SECTION: Scan Hygiene
// ============================================================================

/// Tests that a three-page scan returns the union of all pages.
#[test]
fn test_paginated_scan_returns_union_of_pages() {
    let advisories: Vec<AdvisoryRecord> = (0..5)
        .map(|index| advisory(Ecosystem::Npm, &format!("pkg-{index}"), index, &["1.0.0"]))
        .collect();
    let synchronizer = Synchronizer::new(
        InMemoryAdvisoryStore::with_page_size(advisories, 2),
        InMemoryTriageStore::new(Vec::new()),
    );

    let output = synchronizer.sync(&Manifest::new(), Ecosystem::Npm, 0).unwrap();

    assert_eq!(output.len(), 5);
    for index in 0..5 {
        assert_eq!(output.get(&format!("pkg-{index}")), Some(&None));
    }
}

/// Tests that the timestamp cutoff excludes older advisories.
#[test]
fn test_scan_respects_since_cutoff() {
    let mut stale = advisory(Ecosystem::Npm, "stale-pkg", 1, &["1.0.0"]);
    stale.timestamp = 100;
    let fresh = advisory(Ecosystem::Npm, "fresh-pkg", 2, &["1.0.0"]);

    let synchronizer = Synchronizer::new(
        InMemoryAdvisoryStore::new(vec![stale, fresh]),
        InMemoryTriageStore::new(Vec::new()),
    );
    let output = synchronizer.sync(&Manifest::new(), Ecosystem::Npm, 1_000).unwrap();

    assert_eq!(output.len(), 1);
    assert_eq!(output.get("fresh-pkg"), Some(&None));
}

/// Advisory store stub that returns its records for any scan, the way an
/// over-matching containment filter can.
#[derive(Debug)]
struct OverMatchingStore {
    /// Records returned verbatim by every scan.
    records: Vec<AdvisoryRecord>,
}

impl AdvisoryStore for OverMatchingStore {
    fn scan_advisories(
        &self,
        _ecosystem: Ecosystem,
        _since: i64,
    ) -> Result<Vec<AdvisoryRecord>, StoreError> {
        Ok(self.records.clone())
    }
}

/// Tests that scan results whose key merely embeds the ecosystem token are
/// excluded by the reader's suffix validation.
#[test]
fn test_suffix_validation_excludes_embedded_tokens() {
    let mut contaminated = advisory(Ecosystem::PyPI, "foo-npm-extra", 9, &["1.0.0"]);
    contaminated.package = "foo-npm-extra|pypi".to_string();
    let genuine = advisory(Ecosystem::Npm, "real-pkg", 1, &["1.0.0"]);

    let reader = AdvisoryReader::new(OverMatchingStore {
        records: vec![contaminated, genuine],
    });
    let validated = reader.scan_latest(Ecosystem::Npm, 0).unwrap();

    assert_eq!(validated.len(), 1);
    assert_eq!(validated[0].package, "real-pkg|npm");
}

/// Tests that duplicate triage records resolve to the first returned, and
/// that the choice is stable for a fixed store response.
#[test]
fn test_duplicate_triage_records_resolve_to_first_returned() {
    let advisories = vec![advisory(Ecosystem::PyPI, "evil-pkg", 7, &["1.0.0"])];
    let duplicates = vec![
        triage(Ecosystem::PyPI, "evil-pkg", 7, Some(true)),
        triage(Ecosystem::PyPI, "evil-pkg", 7, Some(false)),
    ];

    let first = run_sync(&Manifest::new(), Ecosystem::PyPI, advisories.clone(), duplicates.clone())
        .unwrap();
    let second = run_sync(&Manifest::new(), Ecosystem::PyPI, advisories, duplicates).unwrap();

    assert_eq!(first.get("evil-pkg"), Some(&Some(vec!["1.0.0".to_string()])));
    assert_eq!(first, second);
}

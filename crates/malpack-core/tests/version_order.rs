// crates/malpack-core/tests/version_order.rs
// ============================================================================
// Module: Version Ordering Tests
// Description: Tests for affected-version sorting and its fallback.
// ============================================================================

//! ## Overview
//! Validates ascending semver ordering, the whole-list lexicographic
//! fallback, and total behavior over arbitrary version strings.

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

use malpack_core::VersionOrder;
use malpack_core::sort_versions;
use proptest::prelude::*;

/// Builds an owned version list from literals.
fn versions(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Tests ascending semantic ordering of valid versions.
#[test]
fn test_valid_versions_sort_by_semver_precedence() {
    let mut list = versions(&["2.0.0", "1.0.0", "1.0.10", "1.0.2"]);
    assert_eq!(sort_versions(&mut list), VersionOrder::Semantic);
    assert_eq!(list, versions(&["1.0.0", "1.0.2", "1.0.10", "2.0.0"]));
}

/// Tests that pre-release versions order below their release.
#[test]
fn test_prerelease_orders_before_release() {
    let mut list = versions(&["1.0.0", "1.0.0-alpha.2", "1.0.0-alpha.10"]);
    assert_eq!(sort_versions(&mut list), VersionOrder::Semantic);
    assert_eq!(list, versions(&["1.0.0-alpha.2", "1.0.0-alpha.10", "1.0.0"]));
}

/// Tests that one invalid element forces the whole list lexicographic.
#[test]
fn test_single_invalid_element_forces_whole_list_fallback() {
    let mut list = versions(&["1.0.10", "1.0.2", "not-a-version"]);
    assert_eq!(sort_versions(&mut list), VersionOrder::Lexicographic);
    assert_eq!(list, versions(&["1.0.10", "1.0.2", "not-a-version"]));
}

/// Tests that two-component versions are not valid semver and fall back.
#[test]
fn test_two_component_versions_fall_back() {
    let mut list = versions(&["1.10", "1.2"]);
    assert_eq!(sort_versions(&mut list), VersionOrder::Lexicographic);
    assert_eq!(list, versions(&["1.10", "1.2"]));
}

/// Tests the empty list.
#[test]
fn test_empty_list_is_semantic() {
    let mut list: Vec<String> = Vec::new();
    assert_eq!(sort_versions(&mut list), VersionOrder::Semantic);
    assert!(list.is_empty());
}

proptest! {
    /// The sort is total: it never panics and never changes the element
    /// multiset, whatever the input strings are.
    #[test]
    fn sort_is_total_over_arbitrary_strings(mut list in prop::collection::vec(".{0,24}", 0..16)) {
        let mut expected = list.clone();
        expected.sort();
        let _order = sort_versions(&mut list);
        let mut sorted_copy = list.clone();
        sorted_copy.sort();
        prop_assert_eq!(sorted_copy, expected);
    }
}

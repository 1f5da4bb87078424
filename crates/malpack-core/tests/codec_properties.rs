// crates/malpack-core/tests/codec_properties.rs
// ============================================================================
// Module: Codec Property-Based Tests
// Description: Property tests for key and fragment round-trip invariants.
// Purpose: Detect round-trip failures across wide input ranges.
// ============================================================================

//! Property-based tests for codec round-trip invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use malpack_core::Ecosystem;
use malpack_core::PackageKey;
use malpack_core::decode_package_fragment;
use malpack_core::decode_path_fragment;
use malpack_core::encode_path_fragment;
use proptest::prelude::*;

/// Strategy over the monitored ecosystems.
fn ecosystem_strategy() -> impl Strategy<Value = Ecosystem> {
    prop_oneof![Just(Ecosystem::Npm), Just(Ecosystem::PyPI)]
}

proptest! {
    /// Store keys round-trip for arbitrary names, including names that
    /// embed the key separator.
    #[test]
    fn store_key_round_trips(name in ".*", ecosystem in ecosystem_strategy()) {
        let key = PackageKey::new(ecosystem, name);
        let decoded = PackageKey::decode(&key.encode()).unwrap();
        prop_assert_eq!(decoded, key);
    }

    /// Version fragments round-trip for strings without the replacement
    /// character.
    #[test]
    fn version_fragment_round_trips(version in "[^@]*") {
        let encoded = encode_path_fragment(&version);
        prop_assert!(!encoded.contains('/'));
        prop_assert_eq!(decode_path_fragment(&encoded), version);
    }

    /// Package fragments round-trip for plain and scoped names whose only
    /// literal `@` is the leading scope marker. Names never start with a
    /// separator in either ecosystem's grammar.
    #[test]
    fn package_fragment_round_trips(scoped in any::<bool>(), name in "[^@/][^@]*") {
        let package = if scoped { format!("@{name}") } else { name };
        let encoded = encode_path_fragment(&package);
        prop_assert!(!encoded.contains('/'));
        prop_assert_eq!(decode_package_fragment(&encoded), package);
    }
}

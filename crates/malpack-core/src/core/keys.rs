// crates/malpack-core/src/core/keys.rs
// ============================================================================
// Module: Malpack Key Codec
// Description: Store-key and path-fragment encoding for package identities.
// Purpose: Round-trip package identity through flat store keys and directories.
// Dependencies: crate::core::ecosystem, serde, thiserror
// ============================================================================

//! ## Overview
//! Backing stores address records by the flat key `"<name>|<ecosystem>"`
//! with a lowercase ecosystem token after the LAST `|`. Sample directories
//! encode `/` in package names and versions as `@`, which the npm name
//! grammar already escapes, so the substitution round-trips unambiguously.
//! Both codecs are shared with the sample archiver and must stay
//! bit-compatible with it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ecosystem::Ecosystem;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator between package name and ecosystem token in store keys.
const KEY_SEPARATOR: char = '|';

/// Replacement character for `/` in directory and file fragments.
const FRAGMENT_SEPARATOR: char = '@';

// ============================================================================
// SECTION: Package Key
// ============================================================================

/// Composite package identity `(ecosystem, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageKey {
    /// Ecosystem the package belongs to.
    pub ecosystem: Ecosystem,
    /// Package name in the ecosystem's native notation.
    pub name: String,
}

impl PackageKey {
    /// Creates a new package key.
    #[must_use]
    pub fn new(ecosystem: Ecosystem, name: impl Into<String>) -> Self {
        Self {
            ecosystem,
            name: name.into(),
        }
    }

    /// Encodes the key into the flat store form `"<name>|<ecosystem>"`.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.name, KEY_SEPARATOR, self.ecosystem.key_token())
    }

    /// Decodes a flat store key, splitting on the last `|`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] when the key has no `|` or the suffix
    /// after the last `|` is not a known ecosystem token.
    pub fn decode(key: &str) -> Result<Self, KeyError> {
        let malformed = || KeyError::Malformed {
            key: key.to_string(),
        };
        let (name, token) = key.rsplit_once(KEY_SEPARATOR).ok_or_else(malformed)?;
        let ecosystem = Ecosystem::from_str(token).map_err(|_| malformed())?;
        Ok(Self::new(ecosystem, name))
    }

    /// Decodes a flat store key and checks it against an expected ecosystem.
    ///
    /// Scan results are filtered by substring containment in the backing
    /// store, so a key may embed one ecosystem token while ending with
    /// another. This guard rejects such cross-ecosystem contamination.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] when the key does not decode, or when
    /// the decoded ecosystem differs from `expected`.
    pub fn decode_expecting(key: &str, expected: Ecosystem) -> Result<Self, KeyError> {
        let decoded = Self::decode(key)?;
        if decoded.ecosystem != expected {
            return Err(KeyError::Malformed {
                key: key.to_string(),
            });
        }
        Ok(decoded)
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.name, self.ecosystem)
    }
}

// ============================================================================
// SECTION: Path Fragments
// ============================================================================

/// Encodes a package name or version for use as a directory name.
///
/// Every `/` becomes `@`; all other characters pass through unchanged.
#[must_use]
pub fn encode_path_fragment(fragment: &str) -> String {
    fragment.replace('/', "@")
}

/// Decodes a directory name back into a version or unscoped name.
///
/// Every `@` becomes `/`. Use [`decode_package_fragment`] for package names,
/// which may legitimately start with an npm scope marker.
#[must_use]
pub fn decode_path_fragment(fragment: &str) -> String {
    fragment.replace(FRAGMENT_SEPARATOR, "/")
}

/// Decodes a directory name back into a package name.
///
/// A leading `@` is an npm scope marker and is preserved; every other `@`
/// decodes to `/`.
#[must_use]
pub fn decode_package_fragment(fragment: &str) -> String {
    let mut chars = fragment.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut decoded = String::with_capacity(fragment.len());
    decoded.push(first);
    decoded.push_str(&decode_path_fragment(chars.as_str()));
    decoded
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the store-key codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The key does not decode to a `(ecosystem, name)` pair.
    #[error("malformed package key '{key}'")]
    Malformed {
        /// The rejected key.
        key: String,
    },
}

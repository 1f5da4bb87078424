// crates/malpack-core/src/core/ecosystem.rs
// ============================================================================
// Module: Malpack Ecosystems
// Description: Closed enumeration of monitored package ecosystems.
// Purpose: Provide canonical ecosystem tokens for display and store keys.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The dataset monitors a closed set of package ecosystems. Parsing is
//! case-insensitive; serialization uses one fixed canonical token per
//! member. An unrecognized token is a hard parse error, never a default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Ecosystem
// ============================================================================

/// Package ecosystems monitored by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ecosystem {
    /// The npm registry.
    Npm,
    /// The Python Package Index.
    PyPI,
}

impl Ecosystem {
    /// Returns the lowercase token used in encoded store keys.
    #[must_use]
    pub const fn key_token(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::PyPI => "pypi",
        }
    }

    /// Returns the `|`-prefixed suffix that encoded store keys must end with.
    #[must_use]
    pub fn key_suffix(self) -> String {
        format!("|{}", self.key_token())
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Npm => write!(f, "npm"),
            Self::PyPI => write!(f, "PyPI"),
        }
    }
}

impl FromStr for Ecosystem {
    type Err = EcosystemParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pypi" => Ok(Self::PyPI),
            _ => Err(EcosystemParseError {
                token: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised when a string does not name a monitored ecosystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid package ecosystem '{token}'")]
pub struct EcosystemParseError {
    /// The rejected input token.
    pub token: String,
}

// crates/malpack-store-dynamodb/src/config.rs
// ============================================================================
// Module: Malpack DynamoDB Store Configuration
// Description: Configuration for the DynamoDB-backed store client.
// Purpose: Name the backing tables and scope numeric precision per client.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Store configuration is explicit and instance-scoped. In particular the
//! numeric decode precision is a field on the client configuration, not a
//! process-wide arithmetic context: the backing store represents large
//! integers exactly, and each client instance is told how many significant
//! digits to preserve when decoding them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default number of significant digits preserved when decoding numbers.
const DEFAULT_NUMERIC_PRECISION: u64 = 100;

/// Configuration for [`crate::DynamoStoreClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamoStoreConfig {
    /// Advisory table name.
    pub advisory_table: String,
    /// Triage table name.
    pub triage_table: String,
    /// AWS region (optional; falls back to environment configuration).
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint URL (for DynamoDB-compatible stores).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Significant digits preserved when decoding numeric attributes.
    #[serde(default = "default_numeric_precision")]
    pub numeric_precision: u64,
}

impl DynamoStoreConfig {
    /// Creates a configuration for the given tables with default precision.
    #[must_use]
    pub const fn new(advisory_table: String, triage_table: String) -> Self {
        Self {
            advisory_table,
            triage_table,
            region: None,
            endpoint: None,
            numeric_precision: DEFAULT_NUMERIC_PRECISION,
        }
    }
}

/// Serde default for [`DynamoStoreConfig::numeric_precision`].
const fn default_numeric_precision() -> u64 {
    DEFAULT_NUMERIC_PRECISION
}

// crates/malpack-store-dynamodb/src/lib.rs
// ============================================================================
// Module: Malpack DynamoDB Store Library
// Description: DynamoDB-backed advisory and triage store implementations.
// Purpose: Expose the DynamoDB store client and its configuration.
// Dependencies: crate::{client, config, decode}
// ============================================================================

//! ## Overview
//! This crate implements the Malpack store interfaces over DynamoDB tables.
//! The async AWS SDK is confined behind a blocking facade so the
//! synchronization engine stays single-threaded and synchronous. Numeric
//! attributes are decoded through arbitrary-precision decimals with a
//! per-client precision setting; there is no process-wide numeric context.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod config;
mod decode;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::DynamoStoreClient;
pub use config::DynamoStoreConfig;

// crates/malpack-store-dynamodb/src/decode.rs
// ============================================================================
// Module: Malpack DynamoDB Attribute Decoding
// Description: Item-to-record decoding for advisory and triage tables.
// Purpose: Turn raw attribute maps into core records without precision loss.
// Dependencies: aws-sdk-dynamodb, bigdecimal, malpack-core
// ============================================================================

//! ## Overview
//! Store items arrive as maps of typed attribute values. Key attributes are
//! required and strictly decoded; the nested affected structure is decoded
//! leniently (missing fields default to empty), matching the published
//! advisory schema where optional fields are simply absent. Numeric
//! attributes are strings on the wire and pass through arbitrary-precision
//! decimals clamped to the client's configured precision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use bigdecimal::BigDecimal;
use bigdecimal::ToPrimitive;
use malpack_core::AdvisoryRecord;
use malpack_core::AffectedBlock;
use malpack_core::AffectedPackage;
use malpack_core::StoreError;
use malpack_core::TriageRecord;

// ============================================================================
// SECTION: Record Decoding
// ============================================================================

/// Decodes one advisory table item.
///
/// # Errors
///
/// Returns [`StoreError::Invalid`] when a required attribute is missing or
/// has the wrong type.
pub(crate) fn decode_advisory(
    item: &HashMap<String, AttributeValue>,
    precision: u64,
) -> Result<AdvisoryRecord, StoreError> {
    let affected = match item.get("affected") {
        Some(AttributeValue::L(blocks)) => blocks.iter().map(decode_affected_block).collect(),
        Some(_) => {
            return Err(StoreError::Invalid(
                "advisory attribute 'affected' is not a list".to_string(),
            ));
        }
        None => {
            return Err(StoreError::Invalid(
                "advisory attribute 'affected' is missing".to_string(),
            ));
        }
    };
    Ok(AdvisoryRecord {
        package: string_attribute(item, "package")?,
        attack_id: integer_attribute(item, "attack_id", precision)?,
        affected,
        timestamp: integer_attribute(item, "timestamp", precision)?,
    })
}

/// Decodes one triage table item.
///
/// # Errors
///
/// Returns [`StoreError::Invalid`] when a required attribute is missing or
/// has the wrong type.
pub(crate) fn decode_triage(
    item: &HashMap<String, AttributeValue>,
    precision: u64,
) -> Result<TriageRecord, StoreError> {
    let compromised_lib = match item.get("compromised_lib") {
        Some(AttributeValue::Bool(value)) => Some(*value),
        _ => None,
    };
    Ok(TriageRecord {
        package: string_attribute(item, "package")?,
        attack_id: integer_attribute(item, "attack_id", precision)?,
        compromised_lib,
    })
}

/// Decodes one affected block, defaulting missing fields to empty.
fn decode_affected_block(value: &AttributeValue) -> AffectedBlock {
    let AttributeValue::M(block) = value else {
        return AffectedBlock::default();
    };
    let package = match block.get("package") {
        Some(AttributeValue::M(package)) => AffectedPackage {
            ecosystem: map_string(package, "ecosystem"),
            name: map_string(package, "name"),
        },
        _ => AffectedPackage::default(),
    };
    let versions = match block.get("versions") {
        Some(AttributeValue::L(values)) => values
            .iter()
            .filter_map(|value| match value {
                AttributeValue::S(version) => Some(version.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    AffectedBlock {
        package,
        versions,
    }
}

// ============================================================================
// SECTION: Attribute Helpers
// ============================================================================

/// Reads a required string attribute.
fn string_attribute(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<String, StoreError> {
    match item.get(name) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        _ => Err(StoreError::Invalid(format!("attribute '{name}' is missing or not a string"))),
    }
}

/// Reads a required numeric attribute as an integer.
fn integer_attribute(
    item: &HashMap<String, AttributeValue>,
    name: &str,
    precision: u64,
) -> Result<i64, StoreError> {
    match item.get(name) {
        Some(AttributeValue::N(raw)) => decode_integer(raw, precision)
            .map_err(|reason| StoreError::Invalid(format!("attribute '{name}': {reason}"))),
        _ => Err(StoreError::Invalid(format!("attribute '{name}' is missing or not a number"))),
    }
}

/// Reads an optional string from a nested attribute map, defaulting empty.
fn map_string(map: &HashMap<String, AttributeValue>, name: &str) -> String {
    match map.get(name) {
        Some(AttributeValue::S(value)) => value.clone(),
        _ => String::new(),
    }
}

/// Parses a wire number into an integer, preserving `precision` significant
/// digits before truncating any fractional part.
pub(crate) fn decode_integer(raw: &str, precision: u64) -> Result<i64, String> {
    let decimal = BigDecimal::from_str(raw)
        .map_err(|err| format!("'{raw}' is not a decimal number: {err}"))?
        .with_prec(precision);
    decimal.to_i64().ok_or_else(|| format!("'{raw}' does not fit an integer"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

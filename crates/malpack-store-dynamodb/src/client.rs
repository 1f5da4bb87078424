// crates/malpack-store-dynamodb/src/client.rs
// ============================================================================
// Module: Malpack DynamoDB Store Client
// Description: Blocking DynamoDB client implementing the store interfaces.
// Purpose: Scan advisories and query triage verdicts with full pagination.
// Dependencies: aws-config, aws-sdk-dynamodb, malpack-core, tokio
// ============================================================================

//! ## Overview
//! The client owns a Tokio runtime and drives the async AWS SDK behind the
//! synchronous store interfaces. Scans filter by substring containment on
//! the encoded package key (the store's filter language cannot anchor a
//! suffix), so callers validate result keys themselves. Every scan and
//! query follows continuation cursors to exhaustion before returning, and
//! any page failure fails the whole operation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use malpack_core::AdvisoryRecord;
use malpack_core::AdvisoryStore;
use malpack_core::Ecosystem;
use malpack_core::Page;
use malpack_core::StoreError;
use malpack_core::TriageRecord;
use malpack_core::TriageStore;
use malpack_core::collect_pages;
use tokio::runtime::Runtime;

use crate::config::DynamoStoreConfig;
use crate::decode::decode_advisory;
use crate::decode::decode_triage;

// ============================================================================
// SECTION: Cursor
// ============================================================================

/// Native continuation cursor for DynamoDB scans and queries.
type PageCursor = HashMap<String, AttributeValue>;

// ============================================================================
// SECTION: Store Client
// ============================================================================

/// DynamoDB-backed implementation of the advisory and triage stores.
pub struct DynamoStoreClient {
    /// DynamoDB client handle.
    client: Client,
    /// Store configuration.
    config: DynamoStoreConfig,
    /// Tokio runtime for blocking SDK calls.
    runtime: Option<Arc<Runtime>>,
}

impl Drop for DynamoStoreClient {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            let _ = std::thread::spawn(move || drop(runtime));
        }
    }
}

impl DynamoStoreClient {
    /// Creates a new store client.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the configuration is incomplete or the
    /// runtime cannot be built.
    pub fn new(config: DynamoStoreConfig) -> Result<Self, StoreError> {
        if config.advisory_table.trim().is_empty() {
            return Err(StoreError::Invalid("advisory_table must be set".to_string()));
        }
        if config.triage_table.trim().is_empty() {
            return Err(StoreError::Invalid("triage_table must be set".to_string()));
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| StoreError::Io(err.to_string()))?;
        let shared_config = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = &config.region {
                loader = loader.region(Region::new(region.clone()));
            }
            if let Some(endpoint) = &config.endpoint {
                loader = loader.endpoint_url(endpoint);
            }
            loader.load().await
        });
        let client = Client::new(&shared_config);
        Ok(Self {
            client,
            config,
            runtime: Some(Arc::new(runtime)),
        })
    }

    /// Returns the runtime handle while the client is open.
    fn runtime(&self) -> Result<&Runtime, StoreError> {
        self.runtime
            .as_deref()
            .ok_or_else(|| StoreError::Io("store client closed".to_string()))
    }

    /// Fetches one advisory scan page at the given cursor.
    fn scan_advisory_page(
        &self,
        suffix: &str,
        since: i64,
        cursor: Option<PageCursor>,
    ) -> Result<Page<HashMap<String, AttributeValue>, PageCursor>, StoreError> {
        let request = self
            .client
            .scan()
            .table_name(&self.config.advisory_table)
            .filter_expression("contains(#pkg, :suffix) AND #ts >= :since")
            .expression_attribute_names("#pkg", "package")
            .expression_attribute_names("#ts", "timestamp")
            .expression_attribute_values(":suffix", AttributeValue::S(suffix.to_string()))
            .expression_attribute_values(":since", AttributeValue::N(since.to_string()))
            .set_exclusive_start_key(cursor);
        let output = self
            .runtime()?
            .block_on(async move { request.send().await })
            .map_err(|err| StoreError::Store(err.to_string()))?;
        Ok(Page {
            items: output.items.unwrap_or_default(),
            next_cursor: output.last_evaluated_key,
        })
    }

    /// Fetches one triage query page at the given cursor.
    fn query_triage_page(
        &self,
        package_key: &str,
        attack_id: i64,
        cursor: Option<PageCursor>,
    ) -> Result<Page<HashMap<String, AttributeValue>, PageCursor>, StoreError> {
        let request = self
            .client
            .query()
            .table_name(&self.config.triage_table)
            .key_condition_expression("#pkg = :package AND #aid = :attack_id")
            .expression_attribute_names("#pkg", "package")
            .expression_attribute_names("#aid", "attack_id")
            .expression_attribute_values(":package", AttributeValue::S(package_key.to_string()))
            .expression_attribute_values(":attack_id", AttributeValue::N(attack_id.to_string()))
            .set_exclusive_start_key(cursor);
        let output = self
            .runtime()?
            .block_on(async move { request.send().await })
            .map_err(|err| StoreError::Store(err.to_string()))?;
        Ok(Page {
            items: output.items.unwrap_or_default(),
            next_cursor: output.last_evaluated_key,
        })
    }
}

impl AdvisoryStore for DynamoStoreClient {
    fn scan_advisories(
        &self,
        ecosystem: Ecosystem,
        since: i64,
    ) -> Result<Vec<AdvisoryRecord>, StoreError> {
        let suffix = ecosystem.key_suffix();
        let items = collect_pages(|cursor| self.scan_advisory_page(&suffix, since, cursor))?;
        items
            .iter()
            .map(|item| decode_advisory(item, self.config.numeric_precision))
            .collect()
    }
}

impl TriageStore for DynamoStoreClient {
    fn query_triage(
        &self,
        package_key: &str,
        attack_id: i64,
    ) -> Result<Vec<TriageRecord>, StoreError> {
        let items =
            collect_pages(|cursor| self.query_triage_page(package_key, attack_id, cursor))?;
        items
            .iter()
            .map(|item| decode_triage(item, self.config.numeric_precision))
            .collect()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

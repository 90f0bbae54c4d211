//! # Console View API
//!
//! High-level API behind the console's two secret-scan views.
//!
//! This module abstracts the batching, settlement, and aggregation details of
//! `api`, `aggregate`, and `charts` into simple functions. Users only need to:
//! 1. Build a `ScanApiClient` (or any other `ScanResultSource`)
//! 2. Call `fetch_scan_summaries()` or `fetch_top_assets()`
//!
//! ## Example
//!
//! ```ignore
//! use view_kit::api::{ScanApiClient, ServerConfig};
//! use view_kit::view_api::fetch_scan_summaries;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ScanApiClient::new(&ServerConfig::default()).unwrap();
//!
//!     // One slot per requested scan id - failures become None, never panics
//!     let summaries = fetch_scan_summaries(&client, "scan-a,scan-b").await;
//!
//!     for summary in summaries.iter().flatten() {
//!         println!("{}: {} secrets", summary.account_id, summary.total);
//!     }
//! }
//! ```

use async_trait::async_trait;
use futures::future::join_all;
use uuid::Uuid;

use crate::aggregate::AccountSeveritySummary;
use crate::api::models::{AssetType, SecretScanResult, TopAssetRow};
use crate::api::{ApiError, ScanApiClient};

// ============================================================================
// Re-exports - types users need for view construction and result handling
// ============================================================================

pub use crate::aggregate::aggregate_severity_counts;
pub use crate::charts::top_assets_chart_options;
pub use crate::navigate::{card_title, scans_index_path, scans_link};

// Logging utilities (optional, for users who want logging)
pub use crate::logging;
pub use crate::{log_debug, log_error, log_info, log_success, log_warn};

// ============================================================================
// Source Seam
// ============================================================================

/// Source of scan data for the views
///
/// Seam between the view operations and the HTTP client, so batch semantics
/// can be exercised against an in-memory source.
#[async_trait]
pub trait ScanResultSource: Sync {
    /// Full result window for one scan id
    async fn secret_scan_result(&self, scan_id: &str) -> Result<SecretScanResult, ApiError>;

    /// Ranked top-assets rows for one node type
    async fn top_secret_assets(&self, asset_type: AssetType) -> Result<Vec<TopAssetRow>, ApiError>;
}

#[async_trait]
impl ScanResultSource for ScanApiClient {
    async fn secret_scan_result(&self, scan_id: &str) -> Result<SecretScanResult, ApiError> {
        ScanApiClient::secret_scan_result(self, scan_id).await
    }

    async fn top_secret_assets(&self, asset_type: AssetType) -> Result<Vec<TopAssetRow>, ApiError> {
        ScanApiClient::top_secret_assets(self, asset_type).await
    }
}

// ============================================================================
// Public API Functions
// ============================================================================

/// Split a comma-separated scan-id list into its slots
///
/// No trimming and no filtering: `""` yields one empty id and `"a,,b"` keeps
/// its middle slot, so positions map one-to-one onto batch output slots.
pub fn split_scan_ids(scan_ids: &str) -> Vec<&str> {
    scan_ids.split(',').collect()
}

/// Fetch one severity summary per scan id, concurrently and best-effort.
///
/// Every fetch is dispatched before any is awaited, then the whole batch
/// settles together. A failed fetch leaves `None` in its slot and logs one
/// warning; it never aborts the rest of the batch.
///
/// # Arguments
/// * `source` - Where results come from (the HTTP client in production)
/// * `scan_ids` - Comma-separated scan ids
///
/// # Returns
/// One slot per requested id, in request order. `Some` holds the aggregated
/// summary, `None` marks a dropped fetch.
pub async fn fetch_scan_summaries<S: ScanResultSource>(
    source: &S,
    scan_ids: &str,
) -> Vec<Option<AccountSeveritySummary>> {
    let ids = split_scan_ids(scan_ids);
    let batch_id = Uuid::new_v4();
    log_info!(
        "Dispatching scan result fetches",
        "batch" => batch_id,
        "requested" => ids.len()
    );

    let fetches = ids.iter().map(|scan_id| source.secret_scan_result(scan_id));
    let settled = join_all(fetches).await;

    let summaries: Vec<Option<AccountSeveritySummary>> = settled
        .into_iter()
        .zip(ids.iter())
        .map(|(outcome, scan_id)| match outcome {
            Ok(result) => Some(AccountSeveritySummary::from_result(&result)),
            Err(e) => {
                log_warn!(
                    "Dropping failed result fetch",
                    "batch" => batch_id,
                    "scan_id" => scan_id,
                    "error" => e
                );
                None
            }
        })
        .collect();

    let fetched = summaries.iter().filter(|slot| slot.is_some()).count();
    log_success!(
        logging::codes::success::RESULT_FETCH_SUCCESS,
        "Scan result batch settled",
        "batch" => batch_id,
        "requested" => summaries.len(),
        "fetched" => fetched
    );

    summaries
}

/// Fetch the ranked top-assets rows for one asset type.
///
/// Single fetch, no batch semantics: any failure propagates to the caller.
///
/// # Arguments
/// * `source` - Where rows come from (the HTTP client in production)
/// * `asset_type` - Which asset kind to rank
///
/// # Returns
/// * `Ok(rows)` - Ranked rows, highest total first (possibly empty)
/// * `Err(ApiError)` - The listing could not be fetched
pub async fn fetch_top_assets<S: ScanResultSource>(
    source: &S,
    asset_type: AssetType,
) -> Result<Vec<TopAssetRow>, ApiError> {
    let rows = source.top_secret_assets(asset_type).await?;
    log_info!(
        "Top assets fetched",
        "node_type" => asset_type,
        "rows" => rows.len()
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// In-memory source: ids listed in `failing` error out, everything else
    /// yields a result whose cluster name echoes the scan id.
    struct StubSource {
        failing: Vec<String>,
    }

    impl StubSource {
        fn failing(ids: &[&str]) -> Self {
            Self {
                failing: ids.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl ScanResultSource for StubSource {
        async fn secret_scan_result(&self, scan_id: &str) -> Result<SecretScanResult, ApiError> {
            if self.failing.iter().any(|f| f == scan_id) {
                return Err(ApiError::Status {
                    endpoint: "secret/scan/results".to_string(),
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                });
            }
            let mut counts = BTreeMap::new();
            counts.insert("high".to_string(), 2u64);
            counts.insert("low".to_string(), 1u64);
            Ok(SecretScanResult {
                kubernetes_cluster_name: format!("cluster-{}", scan_id),
                updated_at: None,
                severity_counts: Some(counts),
            })
        }

        async fn top_secret_assets(
            &self,
            _asset_type: AssetType,
        ) -> Result<Vec<TopAssetRow>, ApiError> {
            Err(ApiError::Status {
                endpoint: "secret/scan/top-assets".to_string(),
                status: reqwest::StatusCode::BAD_GATEWAY,
            })
        }
    }

    #[test]
    fn test_split_keeps_every_slot() {
        assert_eq!(split_scan_ids("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_scan_ids("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_scan_ids(""), vec![""]);
    }

    #[tokio::test]
    async fn test_batch_preserves_length_and_order() {
        let source = StubSource::failing(&[]);
        let summaries = fetch_scan_summaries(&source, "s1,s2,s3").await;
        assert_eq!(summaries.len(), 3);
        let ids: Vec<&str> = summaries
            .iter()
            .map(|slot| slot.as_ref().unwrap().account_id.as_str())
            .collect();
        assert_eq!(ids, vec!["cluster-s1", "cluster-s2", "cluster-s3"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_drops_only_its_slot() {
        let source = StubSource::failing(&["s2"]);
        let summaries = fetch_scan_summaries(&source, "s1,s2,s3").await;
        assert_eq!(summaries.len(), 3);
        assert!(summaries[0].is_some());
        assert!(summaries[1].is_none());
        assert!(summaries[2].is_some());
    }

    #[tokio::test]
    async fn test_all_failures_still_fill_every_slot() {
        let source = StubSource::failing(&["s1", "s2"]);
        let summaries = fetch_scan_summaries(&source, "s1,s2").await;
        assert_eq!(summaries, vec![None, None]);
    }

    #[tokio::test]
    async fn test_empty_id_string_is_one_degenerate_request() {
        // "" splits to one empty id, which the source happily serves.
        let source = StubSource::failing(&[]);
        let summaries = fetch_scan_summaries(&source, "").await;
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].as_ref().unwrap().account_id, "cluster-");
    }

    #[tokio::test]
    async fn test_summaries_carry_aggregated_totals() {
        let source = StubSource::failing(&[]);
        let summaries = fetch_scan_summaries(&source, "s1").await;
        let summary = summaries[0].as_ref().unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.counts.len(), 2);
    }

    #[tokio::test]
    async fn test_top_assets_failure_propagates() {
        let source = StubSource::failing(&[]);
        let outcome = fetch_top_assets(&source, AssetType::Host).await;
        assert!(matches!(outcome, Err(ApiError::Status { .. })));
    }
}

//! Wire models for the scan-server API
//!
//! Only the fields the views consume are declared; everything else in the
//! server's responses is ignored during deserialization.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result window requesting effectively all rows of a scan
pub const RESULT_WINDOW_SIZE: u32 = 1_000_000;

/// Paging window of a results request
#[derive(Debug, Clone, Serialize)]
pub struct FetchWindow {
    pub offset: u32,
    pub size: u32,
}

impl FetchWindow {
    /// The fixed full-result window used by the summary view
    pub fn full() -> Self {
        Self {
            offset: 0,
            size: RESULT_WINDOW_SIZE,
        }
    }
}

/// Request body for the per-scan results endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ScanResultsReq {
    pub scan_id: String,
    pub window: FetchWindow,
}

impl ScanResultsReq {
    pub fn for_scan(scan_id: &str) -> Self {
        Self {
            scan_id: scan_id.to_string(),
            window: FetchWindow::full(),
        }
    }
}

/// Per-scan secret result, as consumed by the summary view
#[derive(Debug, Clone, Deserialize)]
pub struct SecretScanResult {
    /// Account the scan ran against
    #[serde(default)]
    pub kubernetes_cluster_name: String,

    /// When the result was last written (epoch millis on the wire)
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Severity label to occurrence count; absent when the scan found nothing
    #[serde(default)]
    pub severity_counts: Option<BTreeMap<String, u64>>,
}

/// One ranked row of the top-assets response
///
/// Severities missing from the wire default to zero. `id` exists only for
/// navigation; ranking and the N cutoff happen server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopAssetRow {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub unknown: u64,
}

impl TopAssetRow {
    /// Count for one of the five charted severities (0 for anything else)
    pub fn severity_value(&self, name: &str) -> u64 {
        match name {
            "critical" => self.critical,
            "high" => self.high,
            "medium" => self.medium,
            "low" => self.low,
            "unknown" => self.unknown,
            _ => 0,
        }
    }

    /// Stacked total across the five severities
    pub fn total(&self) -> u64 {
        self.critical + self.high + self.medium + self.low + self.unknown
    }
}

/// Asset kind a top-assets view ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Host,
    Container,
    Image,
}

impl AssetType {
    /// Value sent as the `node_type` query parameter
    pub fn as_query_param(&self) -> &'static str {
        match self {
            AssetType::Host => "host",
            AssetType::Container => "container",
            AssetType::Image => "image",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_param())
    }
}

/// Error for asset-type strings outside the fixed set
#[derive(Debug, Error)]
#[error("unknown asset type '{0}'. Use: host, container, image")]
pub struct ParseAssetTypeError(String);

impl std::str::FromStr for AssetType {
    type Err = ParseAssetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(AssetType::Host),
            "container" => Ok(AssetType::Container),
            "image" => Ok(AssetType::Image),
            other => Err(ParseAssetTypeError(other.to_string())),
        }
    }
}

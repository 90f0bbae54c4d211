//! Scan-server API
//!
//! HTTP client and wire models for the two endpoints the console reads:
//! per-scan secret results and the ranked top-assets listing.

pub mod client;
pub mod models;

pub use client::{ScanApiClient, ServerConfig};
pub use models::{AssetType, ScanResultsReq, SecretScanResult, TopAssetRow};

use thiserror::Error;

/// Errors surfaced by the scan-server client
///
/// Everything a request can fail with collapses into one of these; batch
/// callers treat any variant as "drop this slot", single-fetch callers
/// propagate them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot be used
    #[error("invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client itself could not be constructed
    #[error("failed to build HTTP client: {source}")]
    ClientBuild { source: reqwest::Error },

    /// The request never produced a response (connect, timeout, ...)
    #[error("request to '{endpoint}' failed: {source}")]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The server answered outside the 2xx range
    #[error("'{endpoint}' returned status {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// The response body did not match the expected shape
    #[error("failed to decode response from '{endpoint}': {source}")]
    Decode {
        endpoint: String,
        source: reqwest::Error,
    },
}

//! HTTP client for the scan-server API
//!
//! ## Endpoints
//!
//! - `POST {server}/secret/scan/results` — full result window for one scan id
//! - `GET {server}/secret/scan/top-assets` — ranked top-5 rows per node type
//!
//! Top-assets responses are cached for a short TTL per node type, so a
//! console session that renders the same card twice reuses the first answer.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tokio::sync::RwLock;

use crate::api::models::{AssetType, ScanResultsReq, SecretScanResult, TopAssetRow};
use crate::api::ApiError;
use crate::log_debug;

// ============================================================================
// Constants
// ============================================================================

/// Server reached when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Per-request timeout when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const RESULTS_ENDPOINT: &str = "secret/scan/results";
const TOP_ASSETS_ENDPOINT: &str = "secret/scan/top-assets";

/// Rows requested from the top-assets endpoint
const TOP_ASSETS_SIZE: u32 = 5;

/// Query name under which top-assets responses are cached
const TOP_ASSETS_QUERY: &str = "top5SecretAssets";

/// How long a cached top-assets response stays fresh
const TOP_ASSETS_CACHE_TTL: Duration = Duration::from_secs(60);

// ============================================================================
// Configuration
// ============================================================================

/// Connection settings for the scan server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL, scheme included (e.g. `http://127.0.0.1:8080`)
    pub base_url: String,
    /// Total per-request timeout
    pub timeout: Duration,
}

impl ServerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug)]
struct CachedRows {
    rows: Vec<TopAssetRow>,
    expires_at: Instant,
}

/// Client for the scan-server endpoints the console reads
#[derive(Debug)]
pub struct ScanApiClient {
    http: reqwest::Client,
    base_url: String,
    top_cache: RwLock<HashMap<String, CachedRows>>,
}

impl ScanApiClient {
    /// Build a client against the given server
    ///
    /// # Arguments
    /// * `config` - Base URL and timeout to connect with
    ///
    /// # Returns
    /// The ready client, or an error when the URL is unusable or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::InvalidUrl {
                url: config.base_url.clone(),
                reason: "base URL is empty".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("secrets-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::ClientBuild { source })?;

        Ok(Self {
            http,
            base_url,
            top_cache: RwLock::new(HashMap::new()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch the full result window for one scan id
    pub async fn secret_scan_result(&self, scan_id: &str) -> Result<SecretScanResult, ApiError> {
        let url = self.endpoint(RESULTS_ENDPOINT);
        log_debug!("Requesting scan result", "scan_id" => scan_id, "url" => url);

        let response = self
            .http
            .post(&url)
            .json(&ScanResultsReq::for_scan(scan_id))
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: RESULTS_ENDPOINT.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: RESULTS_ENDPOINT.to_string(),
                status,
            });
        }

        response
            .json::<SecretScanResult>()
            .await
            .map_err(|source| ApiError::Decode {
                endpoint: RESULTS_ENDPOINT.to_string(),
                source,
            })
    }

    /// Fetch the ranked top-assets rows for one node type
    ///
    /// Served from the per-node-type cache while the previous response is
    /// still fresh.
    pub async fn top_secret_assets(
        &self,
        asset_type: AssetType,
    ) -> Result<Vec<TopAssetRow>, ApiError> {
        let key = top_cache_key(asset_type);

        {
            let cache = self.top_cache.read().await;
            if let Some(entry) = cache.get(&key) {
                if entry.expires_at > Instant::now() {
                    log_debug!("Serving top assets from cache", "node_type" => asset_type);
                    return Ok(entry.rows.clone());
                }
            }
        }

        let url = self.endpoint(TOP_ASSETS_ENDPOINT);
        log_debug!("Requesting top assets", "node_type" => asset_type, "url" => url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("node_type", asset_type.as_query_param().to_string()),
                ("size", TOP_ASSETS_SIZE.to_string()),
            ])
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: TOP_ASSETS_ENDPOINT.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: TOP_ASSETS_ENDPOINT.to_string(),
                status,
            });
        }

        let rows = response
            .json::<Vec<TopAssetRow>>()
            .await
            .map_err(|source| ApiError::Decode {
                endpoint: TOP_ASSETS_ENDPOINT.to_string(),
                source,
            })?;

        let mut cache = self.top_cache.write().await;
        cache.insert(
            key,
            CachedRows {
                rows: rows.clone(),
                expires_at: Instant::now() + TOP_ASSETS_CACHE_TTL,
            },
        );

        Ok(rows)
    }
}

fn top_cache_key(asset_type: AssetType) -> String {
    format!("{}:{}", TOP_ASSETS_QUERY, asset_type)
}

//! # Secret Console View Kit
//!
//! Presentation pipelines for secret-scan data.
//! Provides severity aggregation, chart shaping, navigation resolution, and a
//! high-level API for feeding the console's views.
//!
//! ## Modules
//!
//! - `api` - Scan-server HTTP client and wire models
//! - `aggregate` - Severity reduction for the summary view
//! - `charts` - Stacked-bar chart document for the top-assets view
//! - `navigate` - Scans-view links and card titles
//! - `severity` - Shared severity ordering and color tables
//! - `view_api` - High-level view operations (batching, settlement)
//! - `logging` - Structured logging with warning/error tallies
//!
//! ## Usage
//!
//! To drive a view, create a client and call the `view_api` operations:
//!
//! ```rust,ignore
//! use view_kit::api::{AssetType, ScanApiClient, ServerConfig};
//! use view_kit::view_api::{fetch_scan_summaries, fetch_top_assets};
//! use view_kit::charts::top_assets_chart_options;
//!
//! let client = ScanApiClient::new(&ServerConfig::default())?;
//!
//! // Summary view: one slot per scan id, failures dropped to None
//! let summaries = fetch_scan_summaries(&client, "scan-a,scan-b").await;
//!
//! // Top-assets view: ranked rows shaped into a chart document
//! let rows = fetch_top_assets(&client, AssetType::Image).await?;
//! let options = top_assets_chart_options(&rows);
//! ```

pub mod aggregate;
pub mod api;
pub mod charts;
pub mod logging;
pub mod navigate;
pub mod severity;
pub mod view_api;

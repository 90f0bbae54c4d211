//! Output generation module
//!
//! Provides builders for the view output formats:
//! - Summary (minimal JSON)
//! - Chart (chart options document, top-assets view only)
//! - Console (human-readable)
//!
//! All builders consume the same `ViewData`, so a view renders to the console
//! and serializes to a file from one fetch.

mod chart;
mod console;
mod summary;

pub use chart::build_chart;
pub use console::{print_scan_summaries, print_top_assets};
pub use summary::build_summary;

use view_kit::aggregate::AccountSeveritySummary;
use view_kit::api::models::{AssetType, TopAssetRow};

use crate::config::OutputFormat;

/// Data a view produced, ready for output
pub enum ViewData<'a> {
    /// One slot per requested scan id; dropped fetches are `None`
    ScanSummary {
        summaries: &'a [Option<AccountSeveritySummary>],
    },
    /// Ranked rows for one asset kind, highest total first
    TopAssets {
        asset_type: AssetType,
        rows: &'a [TopAssetRow],
    },
}

/// Build output in the specified format
pub fn build_output(data: &ViewData<'_>, format: OutputFormat) -> Result<String, OutputError> {
    let json = match format {
        OutputFormat::Summary => {
            let result = build_summary(data);
            serde_json::to_string_pretty(&result)
                .map_err(|e| OutputError::Serialization(e.to_string()))?
        }
        OutputFormat::Chart => {
            let result = build_chart(data)?;
            serde_json::to_string_pretty(&result)
                .map_err(|e| OutputError::Serialization(e.to_string()))?
        }
    };
    Ok(json)
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur during output generation
#[derive(Debug)]
pub enum OutputError {
    /// Failed to build result
    Build(String),
    /// Failed to serialize result
    Serialization(String),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Build(msg) => write!(f, "Failed to build output: {}", msg),
            OutputError::Serialization(msg) => write!(f, "Failed to serialize output: {}", msg),
        }
    }
}

impl std::error::Error for OutputError {}

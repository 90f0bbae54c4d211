//! Core view execution
//!
//! Builds the client, runs the selected view's pipeline, and renders the
//! outcome to console and optional file output.

use std::sync::Arc;
use std::time::Instant;

use view_kit::api::client::ServerConfig;
use view_kit::api::models::AssetType;
use view_kit::api::{ApiError, ScanApiClient};
use view_kit::view_api::{
    fetch_scan_summaries, fetch_top_assets, log_error, log_info, log_success, logging,
};

use crate::config::{self, ConsoleConfig, RunSummary, SettingsError, ViewSelection};
use crate::output::{self, ViewData};

/// Run the selected view with the given configuration
pub async fn run_view(config: &ConsoleConfig) -> Result<i32, ViewError> {
    let start = Instant::now();

    let server = config::resolve_server(config).map_err(ViewError::Settings)?;

    log_info!("Starting view run", "server" => server.base_url);
    if !config.quiet {
        println!();
        println!("Secrets Console v{}", env!("CARGO_PKG_VERSION"));
        println!("Server: {}", server.base_url);
        println!();
    }

    let client = create_client(&server)?;

    let mut summary = match &config.view {
        ViewSelection::ScanSummary { scan_ids } => {
            run_summary_view(client, scan_ids, config).await?
        }
        ViewSelection::TopAssets { asset_type } => {
            run_top_assets_view(client, *asset_type, config).await?
        }
    };

    summary.duration = start.elapsed();

    if !config.quiet {
        print_execution_info(&summary, config);
    }

    log_success!(
        logging::codes::success::VIEW_RENDER_SUCCESS,
        "View completed",
        "requested" => summary.requested,
        "fetched" => summary.fetched,
        "dropped" => summary.dropped
    );

    Ok(summary.exit_code())
}

/// Run the batch summary view
///
/// The batch runs on its own task so the placeholder frame prints while the
/// fetches settle; the rendered cards replace it once every slot is decided.
async fn run_summary_view(
    client: Arc<ScanApiClient>,
    scan_ids: &str,
    config: &ConsoleConfig,
) -> Result<RunSummary, ViewError> {
    let ids = scan_ids.to_string();
    let deferred = tokio::spawn(async move { fetch_scan_summaries(client.as_ref(), &ids).await });

    if !config.quiet {
        println!("Loading scan results...");
    }

    let summaries = deferred
        .await
        .map_err(|e| ViewError::Deferred(e.to_string()))?;

    let mut summary = RunSummary::new(summaries.len());
    summary.fetched = summaries.iter().filter(|slot| slot.is_some()).count();
    summary.dropped = summary.requested - summary.fetched;

    if !config.quiet {
        output::print_scan_summaries(&summaries);
    }

    if let Some(output_path) = &config.output_file {
        let data = ViewData::ScanSummary {
            summaries: &summaries,
        };
        save_output(&data, config)?;

        if !config.quiet {
            println!("Results saved to: {}", output_path.display());
            println!();
        }
    }

    Ok(summary)
}

/// Run the top-assets view
///
/// A single fetch with no batch semantics: failures propagate and the whole
/// run errors out. An empty listing still renders (as the empty state).
async fn run_top_assets_view(
    client: Arc<ScanApiClient>,
    asset_type: AssetType,
    config: &ConsoleConfig,
) -> Result<RunSummary, ViewError> {
    let rows = fetch_top_assets(client.as_ref(), asset_type)
        .await
        .map_err(ViewError::Fetch)?;

    let mut summary = RunSummary::new(1);
    summary.fetched = 1;

    if !config.quiet {
        output::print_top_assets(asset_type, &rows);
    }

    if let Some(output_path) = &config.output_file {
        let data = ViewData::TopAssets {
            asset_type,
            rows: &rows,
        };
        save_output(&data, config)?;

        if !config.quiet {
            println!("Results saved to: {}", output_path.display());
            println!();
        }
    }

    Ok(summary)
}

/// Create the API client
fn create_client(server: &ServerConfig) -> Result<Arc<ScanApiClient>, ViewError> {
    let client = ScanApiClient::new(server).map_err(|e| {
        log_error!(
            logging::codes::system::INTERNAL_ERROR,
            "Failed to create API client",
            "error" => e.to_string()
        );
        ViewError::Client(e)
    })?;
    Ok(Arc::new(client))
}

/// Save output to file
fn save_output(data: &ViewData<'_>, config: &ConsoleConfig) -> Result<(), ViewError> {
    let output_path = match &config.output_file {
        Some(path) => path,
        None => return Ok(()), // No output file specified, nothing to do
    };

    let json = output::build_output(data, config.output_format).map_err(ViewError::Output)?;

    std::fs::write(output_path, &json)
        .map_err(|e| ViewError::WriteFile(output_path.display().to_string(), e))?;

    Ok(())
}

/// Print execution information
fn print_execution_info(summary: &RunSummary, config: &ConsoleConfig) {
    println!("────────────────────────────────────────────────────────────────────────────────");
    println!("  Duration:     {:.2}s", summary.duration.as_secs_f64());
    println!("  Fetched:      {}/{}", summary.fetched, summary.requested);
    if summary.dropped > 0 {
        println!("  Dropped:      {}", summary.dropped);
    }
    if let Some(output_path) = &config.output_file {
        println!(
            "  Output:       {} ({})",
            output_path.display(),
            config.output_format
        );
    }
    println!("────────────────────────────────────────────────────────────────────────────────");
    println!();
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while running a view
#[derive(Debug)]
pub enum ViewError {
    /// Server settings could not be resolved
    Settings(SettingsError),
    /// HTTP client could not be built
    Client(ApiError),
    /// A required fetch failed
    Fetch(ApiError),
    /// The deferred batch task was lost
    Deferred(String),
    /// Failed to generate output
    Output(output::OutputError),
    /// Failed to write output file
    WriteFile(String, std::io::Error),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::Settings(e) => write!(f, "Settings resolution failed: {}", e),
            ViewError::Client(e) => write!(f, "Client creation failed: {}", e),
            ViewError::Fetch(e) => write!(f, "Fetch failed: {}", e),
            ViewError::Deferred(msg) => write!(f, "Deferred batch failed: {}", msg),
            ViewError::Output(e) => write!(f, "Output generation failed: {}", e),
            ViewError::WriteFile(path, e) => write!(f, "Failed to write {}: {}", path, e),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewError::Settings(e) => Some(e),
            ViewError::Client(e) => Some(e),
            ViewError::Fetch(e) => Some(e),
            ViewError::Deferred(_) => None,
            ViewError::Output(e) => Some(e),
            ViewError::WriteFile(_, e) => Some(e),
        }
    }
}

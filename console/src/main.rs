//! # Secrets Console
//!
//! Console views over secret-scan data from the scan server.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a batch of scans, one card per scan id
//! secrets_console summary scan-a,scan-b
//!
//! # Rank the top assets of one kind
//! secrets_console top-assets image
//!
//! # Chart document to a file
//! secrets_console --format chart -o chart.json top-assets host
//! ```
//!
//! ## Output Formats
//!
//! - **summary** (default): Minimal JSON with per-account severity totals
//! - **chart**: Chart options document (top-assets view only)
//!
//! Views always render to the console unless --quiet is set.

mod cli;
mod config;
mod output;
mod view;

use cli::{parse_args, print_help, CliResult};
use view_kit::view_api::logging;

#[tokio::main]
async fn main() {
    // Initialize logging
    if let Err(e) = logging::init_global_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("secrets-console");

    let exit_code = match parse_args(&args) {
        CliResult::Help => {
            print_help(program_name);
            0
        }
        CliResult::Error(msg) => {
            eprintln!("Error: {}", msg);
            2
        }
        CliResult::Run(config) => match run(config).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                2
            }
        },
    };

    // Tally prints nothing on a clean run
    logging::print_cargo_style_summary();

    std::process::exit(exit_code);
}

/// Run the selected view with the given configuration
async fn run(config: config::ConsoleConfig) -> Result<i32, Box<dyn std::error::Error>> {
    let exit_code = view::run_view(&config).await?;
    Ok(exit_code)
}

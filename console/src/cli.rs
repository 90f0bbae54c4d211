//! Command-line interface parsing
//!
//! Handles argument parsing, validation, and help text generation.

use std::path::PathBuf;

use view_kit::api::models::AssetType;

use crate::config::{ConsoleConfig, OutputFormat, ViewSelection};

/// CLI parsing result
pub enum CliResult {
    /// Run the selected view with this configuration
    Run(ConsoleConfig),
    /// Show help and exit
    Help,
    /// Error with message
    Error(String),
}

/// Parse command-line arguments
pub fn parse_args(args: &[String]) -> CliResult {
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("secrets-console");

    let mut positionals: Vec<&str> = Vec::new();
    let mut server_url: Option<String> = None;
    let mut config_file: Option<PathBuf> = None;
    let mut output_file: Option<PathBuf> = None;
    let mut quiet = false;
    let mut output_format = OutputFormat::Summary;

    let mut i = 1;
    while i < args.len() {
        match args.get(i).map(|s| s.as_str()) {
            Some("--help" | "-h") => {
                return CliResult::Help;
            }
            Some("--quiet" | "-q") => {
                quiet = true;
            }
            Some("--server" | "-s") => {
                i += 1;
                match args.get(i) {
                    Some(val) => server_url = Some(val.clone()),
                    None => return CliResult::Error("--server requires a URL".to_string()),
                }
            }
            Some("--config" | "-c") => {
                i += 1;
                match args.get(i) {
                    Some(val) => config_file = Some(PathBuf::from(val)),
                    None => return CliResult::Error("--config requires a filename".to_string()),
                }
            }
            Some("--output" | "-o") => {
                i += 1;
                match args.get(i) {
                    Some(val) => output_file = Some(PathBuf::from(val)),
                    None => return CliResult::Error("--output requires a filename".to_string()),
                }
            }
            Some("--format" | "-f") => {
                i += 1;
                match args.get(i).map(|s| s.as_str()) {
                    Some("summary") => output_format = OutputFormat::Summary,
                    Some("chart") => output_format = OutputFormat::Chart,
                    Some(other) => {
                        return CliResult::Error(format!(
                            "Unknown format '{}'. Use: summary, chart",
                            other
                        ));
                    }
                    None => return CliResult::Error("--format requires a value".to_string()),
                }
            }
            Some(arg) if !arg.starts_with('-') => {
                positionals.push(arg);
            }
            Some(arg) => {
                return CliResult::Error(format!("Unknown option: {}", arg));
            }
            None => break,
        }
        i += 1;
    }

    // Validate the view selection
    let view = match positionals.as_slice() {
        [] => {
            return CliResult::Error(format!(
                "Missing view\nUsage: {} [OPTIONS] <summary <scan-ids> | top-assets <type>>",
                program_name
            ));
        }
        ["summary"] => {
            return CliResult::Error(
                "The summary view requires a comma-separated scan-id list".to_string(),
            );
        }
        ["top-assets"] => {
            return CliResult::Error(
                "The top-assets view requires an asset type: host, container, image".to_string(),
            );
        }
        ["summary", scan_ids] => ViewSelection::ScanSummary {
            scan_ids: (*scan_ids).to_string(),
        },
        ["top-assets", raw] => match raw.parse::<AssetType>() {
            Ok(asset_type) => ViewSelection::TopAssets { asset_type },
            Err(e) => return CliResult::Error(e.to_string()),
        },
        [other, ..] if *other != "summary" && *other != "top-assets" => {
            return CliResult::Error(format!("Unknown view '{}'. Use: summary, top-assets", other));
        }
        _ => {
            return CliResult::Error("Too many arguments".to_string());
        }
    };

    // The chart document only exists for the top-assets view
    if output_format == OutputFormat::Chart && matches!(view, ViewSelection::ScanSummary { .. }) {
        return CliResult::Error(
            "The chart format is only available for the top-assets view".to_string(),
        );
    }

    CliResult::Run(ConsoleConfig {
        view,
        server_url,
        config_file,
        output_file,
        output_format,
        quiet,
    })
}

/// Print full help text
pub fn print_help(program_name: &str) {
    println!("Secrets Console v{}", env!("CARGO_PKG_VERSION"));
    println!("Console views over secret-scan data\n");

    println!("USAGE:");
    println!(
        "    {} [OPTIONS] summary <scan-ids>       Per-account severity summary",
        program_name
    );
    println!(
        "    {} [OPTIONS] top-assets <type>        Top assets of one kind",
        program_name
    );
    println!(
        "    {} --help                             Show this help message\n",
        program_name
    );

    println!("VIEWS:");
    println!("    summary <scan-ids>          Comma-separated scan ids, one card per scan");
    println!("    top-assets <type>           Asset type: host, container, image");
    println!();

    println!("OPTIONS:");
    println!("    -h, --help                  Show this help message");
    println!("    -q, --quiet                 Suppress console output");
    println!("    -s, --server <url>          Scan server URL (overrides env and settings file)");
    println!("    -c, --config <file>         Settings file (default: secrets-console.toml)");
    println!("    -o, --output <file>         Write view data to JSON file (optional)");
    println!("    -f, --format <format>       Output format: summary (default), chart");
    println!();

    println!("OUTPUT FORMATS:");
    println!("    summary       Minimal JSON with per-account severity totals (default)");
    println!("    chart         Chart options document (top-assets view only)");
    println!();

    println!("BEHAVIOR:");
    println!("    Views are always rendered to the console (unless --quiet is set).");
    println!("    Use --output to additionally save view data to a JSON file.");
    println!("    Failed fetches in a summary batch are dropped, never fatal.");
    println!();

    println!("EXIT CODES:");
    println!("    0    View rendered (even when empty)");
    println!("    1    One or more batch items were dropped");
    println!("    2    Execution error");
    println!();

    println!("EXAMPLES:");
    println!(
        "    {} summary scan-a,scan-b                       # Console output only",
        program_name
    );
    println!(
        "    {} --output cards.json summary scan-a          # Console + file",
        program_name
    );
    println!(
        "    {} --format chart -o chart.json top-assets image # Chart document to file",
        program_name
    );
    println!(
        "    {} --quiet -s http://console:8080 top-assets host # File only, custom server",
        program_name
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        let mut all = vec!["secrets-console".to_string()];
        all.extend(list.iter().map(|s| s.to_string()));
        all
    }

    #[test]
    fn test_parse_summary_view() {
        let result = parse_args(&args(&["summary", "scan-a,scan-b"]));
        match result {
            CliResult::Run(config) => match config.view {
                ViewSelection::ScanSummary { scan_ids } => assert_eq!(scan_ids, "scan-a,scan-b"),
                _ => panic!("expected summary view"),
            },
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_top_assets_view() {
        for (raw, expected) in [
            ("host", AssetType::Host),
            ("container", AssetType::Container),
            ("image", AssetType::Image),
        ] {
            let result = parse_args(&args(&["top-assets", raw]));
            match result {
                CliResult::Run(config) => match config.view {
                    ViewSelection::TopAssets { asset_type } => assert_eq!(asset_type, expected),
                    _ => panic!("expected top-assets view"),
                },
                _ => panic!("expected run"),
            }
        }
    }

    #[test]
    fn test_flags_are_collected() {
        let result = parse_args(&args(&[
            "--server",
            "http://10.0.0.1:9000",
            "--format",
            "chart",
            "-o",
            "out.json",
            "-q",
            "top-assets",
            "image",
        ]));
        match result {
            CliResult::Run(config) => {
                assert_eq!(config.server_url.as_deref(), Some("http://10.0.0.1:9000"));
                assert_eq!(config.output_format, OutputFormat::Chart);
                assert_eq!(config.output_file, Some(PathBuf::from("out.json")));
                assert!(config.quiet);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_unknown_view_is_rejected() {
        let result = parse_args(&args(&["vulnerabilities", "host"]));
        match result {
            CliResult::Error(msg) => assert!(msg.contains("Unknown view")),
            _ => panic!("expected error"),
        }
    }

    #[test]
    fn test_invalid_asset_type_is_rejected() {
        let result = parse_args(&args(&["top-assets", "vm"]));
        match result {
            CliResult::Error(msg) => assert!(msg.contains("unknown asset type")),
            _ => panic!("expected error"),
        }
    }

    #[test]
    fn test_chart_format_rejected_for_summary_view() {
        let result = parse_args(&args(&["--format", "chart", "summary", "a,b"]));
        match result {
            CliResult::Error(msg) => assert!(msg.contains("top-assets")),
            _ => panic!("expected error"),
        }
    }

    #[test]
    fn test_missing_view_argument() {
        assert!(matches!(parse_args(&args(&["summary"])), CliResult::Error(_)));
        assert!(matches!(
            parse_args(&args(&["top-assets"])),
            CliResult::Error(_)
        ));
        assert!(matches!(parse_args(&args(&[])), CliResult::Error(_)));
    }

    #[test]
    fn test_flag_missing_value() {
        assert!(matches!(
            parse_args(&args(&["--server"])),
            CliResult::Error(_)
        ));
        assert!(matches!(
            parse_args(&args(&["summary", "a", "--output"])),
            CliResult::Error(_)
        ));
    }

    #[test]
    fn test_help_flag_wins() {
        assert!(matches!(
            parse_args(&args(&["summary", "a,b", "--help"])),
            CliResult::Help
        ));
    }
}

//! Configuration types for the secrets console
//!
//! Defines the run configuration plus the layered server-settings lookup:
//! command-line flag, environment, settings file, built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use view_kit::api::client::{ServerConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};
use view_kit::api::models::AssetType;

/// Environment variable consulted for the server URL
pub const SERVER_ENV_VAR: &str = "SECRETS_CONSOLE_SERVER";

/// Settings file read when no `--config` flag is given
pub const DEFAULT_SETTINGS_FILE: &str = "secrets-console.toml";

/// Output format for view data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Minimal JSON with per-account totals (default)
    Summary,
    /// Chart options document (top-assets view only)
    Chart,
}

impl OutputFormat {
    /// Get the default output filename for this format
    #[allow(dead_code)]
    pub fn default_filename(&self) -> &'static str {
        match self {
            OutputFormat::Summary => "summary.json",
            OutputFormat::Chart => "chart.json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "summary"),
            OutputFormat::Chart => write!(f, "chart"),
        }
    }
}

/// Which view to render
#[derive(Debug, Clone)]
pub enum ViewSelection {
    /// Per-account severity summary over a batch of scans
    ScanSummary {
        /// Comma-separated scan ids, exactly as given on the command line
        scan_ids: String,
    },
    /// Ranked top assets of one kind
    TopAssets { asset_type: AssetType },
}

/// Configuration for a console run
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Selected view and its argument
    pub view: ViewSelection,

    /// Server URL from the command line (overrides everything else)
    pub server_url: Option<String>,

    /// Settings file path (None means the default location)
    pub config_file: Option<PathBuf>,

    /// Output file path (None means console-only output)
    pub output_file: Option<PathBuf>,

    /// Output format
    pub output_format: OutputFormat,

    /// Suppress progress output
    pub quiet: bool,
}

// ============================================================================
// Server settings
// ============================================================================

/// Settings file shape: a `[server]` table with optional fields
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Resolve the server connection settings for this run
///
/// Precedence for the URL: `--server` flag, then `SECRETS_CONSOLE_SERVER`,
/// then the settings file, then the built-in default. The timeout comes from
/// the file or the default only.
pub fn resolve_server(config: &ConsoleConfig) -> Result<ServerConfig, SettingsError> {
    let file = load_settings_file(config.config_file.as_deref())?;

    let base_url = pick_base_url(
        config.server_url.as_deref(),
        std::env::var(SERVER_ENV_VAR).ok(),
        file.server.url,
    );
    let timeout_secs = file.server.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ServerConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn pick_base_url(flag: Option<&str>, env: Option<String>, file: Option<String>) -> String {
    if let Some(url) = flag {
        return url.to_string();
    }
    if let Some(url) = env {
        return url;
    }
    if let Some(url) = file {
        return url;
    }
    DEFAULT_SERVER_URL.to_string()
}

/// Load the settings file
///
/// An explicitly named file must exist and parse; the default location is
/// optional and silently skipped when absent.
fn load_settings_file(path: Option<&Path>) -> Result<SettingsFile, SettingsError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| SettingsError::Read(path.display().to_string(), e))?;
            toml::from_str(&raw).map_err(|e| SettingsError::Parse(path.display().to_string(), e))
        }
        None => match std::fs::read_to_string(DEFAULT_SETTINGS_FILE) {
            Ok(raw) => toml::from_str(&raw)
                .map_err(|e| SettingsError::Parse(DEFAULT_SETTINGS_FILE.to_string(), e)),
            Err(_) => Ok(SettingsFile::default()),
        },
    }
}

/// Errors from settings resolution
#[derive(Debug)]
pub enum SettingsError {
    /// Failed to read an explicitly named settings file
    Read(String, std::io::Error),
    /// Settings file did not parse as TOML
    Parse(String, toml::de::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Read(path, e) => write!(f, "Failed to read settings {}: {}", path, e),
            SettingsError::Parse(path, e) => write!(f, "Failed to parse settings {}: {}", path, e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Read(_, e) => Some(e),
            SettingsError::Parse(_, e) => Some(e),
        }
    }
}

// ============================================================================
// Run summary
// ============================================================================

/// Result of a view run
#[derive(Debug)]
pub struct RunSummary {
    /// Items requested from the server
    pub requested: usize,

    /// Items fetched successfully
    pub fetched: usize,

    /// Items dropped after fetch failures
    pub dropped: usize,

    /// Total run duration
    pub duration: std::time::Duration,
}

impl RunSummary {
    /// Create a new run summary
    pub fn new(requested: usize) -> Self {
        Self {
            requested,
            fetched: 0,
            dropped: 0,
            duration: std::time::Duration::ZERO,
        }
    }

    /// Get the exit code based on results
    ///
    /// Dropped batch items surface as a partial-result exit; an empty view
    /// that rendered cleanly is still a success.
    pub fn exit_code(&self) -> i32 {
        if self.dropped > 0 {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_precedence_flag_env_file_default() {
        let flag = Some("http://flag:1");
        let env = Some("http://env:2".to_string());
        let file = Some("http://file:3".to_string());

        assert_eq!(pick_base_url(flag, env.clone(), file.clone()), "http://flag:1");
        assert_eq!(pick_base_url(None, env, file.clone()), "http://env:2");
        assert_eq!(pick_base_url(None, None, file), "http://file:3");
        assert_eq!(pick_base_url(None, None, None), DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_settings_file_parses_server_table() {
        let file: SettingsFile = toml::from_str(
            r#"
            [server]
            url = "http://10.1.1.1:8080"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(file.server.url.as_deref(), Some("http://10.1.1.1:8080"));
        assert_eq!(file.server.timeout_secs, Some(5));
    }

    #[test]
    fn test_settings_file_tolerates_missing_table() {
        let file: SettingsFile = toml::from_str("").unwrap();
        assert!(file.server.url.is_none());
        assert!(file.server.timeout_secs.is_none());
    }

    #[test]
    fn test_exit_code_reflects_dropped_items() {
        let mut summary = RunSummary::new(3);
        summary.fetched = 3;
        assert_eq!(summary.exit_code(), 0);

        summary.fetched = 2;
        summary.dropped = 1;
        assert_eq!(summary.exit_code(), 1);

        // A run with nothing to show is still a clean exit.
        let empty = RunSummary::new(0);
        assert_eq!(empty.exit_code(), 0);
    }
}

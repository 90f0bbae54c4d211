//! Global logging for the console and view kit
//!
//! Thin structured layer over `log` + `env_logger`. Messages carry optional
//! `"key" => value` fields rendered as `key=value` pairs, and error/success
//! sites carry a stable diagnostic code from [`codes`].
//!
//! The installed logger tallies emitted warnings and errors so the binary can
//! print a cargo-style summary on exit.
//!
//! ## Usage
//!
//! ```ignore
//! use view_kit::view_api::logging;
//! use view_kit::{log_info, log_error};
//!
//! logging::init_global_logging()?;
//! log_info!("Dispatching result fetches", "count" => 3);
//! log_error!(logging::codes::net::REQUEST_FAILED, "Fetch failed", "scan_id" => id);
//! logging::print_cargo_style_summary();
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

static WARNINGS: AtomicUsize = AtomicUsize::new(0);
static ERRORS: AtomicUsize = AtomicUsize::new(0);

/// Stable diagnostic codes attached to error and success log lines
pub mod codes {
    /// Completed operations
    pub mod success {
        pub const RESULT_FETCH_SUCCESS: &str = "SC-0101";
        pub const VIEW_RENDER_SUCCESS: &str = "SC-0102";
    }

    /// Scan-server communication failures
    pub mod net {
        pub const REQUEST_FAILED: &str = "SC-0201";
        pub const UNEXPECTED_STATUS: &str = "SC-0202";
        pub const DECODE_FAILED: &str = "SC-0203";
    }

    /// Internal failures
    pub mod system {
        pub const INTERNAL_ERROR: &str = "SC-0901";
    }
}

/// Logger wrapper that counts emitted warnings and errors
struct TallyLogger {
    inner: env_logger::Logger,
}

impl log::Log for TallyLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.inner.matches(record) {
            match record.level() {
                log::Level::Error => {
                    ERRORS.fetch_add(1, Ordering::Relaxed);
                }
                log::Level::Warn => {
                    WARNINGS.fetch_add(1, Ordering::Relaxed);
                }
                _ => {}
            }
        }
        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush()
    }
}

/// Install the global logger
///
/// Reads the usual `RUST_LOG` filter, defaulting to `info`. Call once at
/// process start; a second call returns the `SetLoggerError` from `log`.
pub fn init_global_logging() -> Result<(), log::SetLoggerError> {
    let env = env_logger::Env::default().default_filter_or("info");
    let inner = env_logger::Builder::from_env(env).build();
    let max_level = inner.filter();

    log::set_boxed_logger(Box::new(TallyLogger { inner }))?;
    log::set_max_level(max_level);
    Ok(())
}

/// Print a cargo-style tally of emitted warnings and errors to stderr
///
/// Prints nothing when the run was clean.
pub fn print_cargo_style_summary() {
    let warnings = WARNINGS.load(Ordering::Relaxed);
    let errors = ERRORS.load(Ordering::Relaxed);

    if let Some(line) = summary_line(warnings, errors) {
        eprintln!("{}", line);
    }
}

fn summary_line(warnings: usize, errors: usize) -> Option<String> {
    fn plural(n: usize) -> &'static str {
        if n == 1 {
            ""
        } else {
            "s"
        }
    }

    match (warnings, errors) {
        (0, 0) => None,
        (w, 0) => Some(format!(
            "warning: secrets-console generated {} warning{}",
            w,
            plural(w)
        )),
        (0, e) => Some(format!(
            "error: secrets-console generated {} error{}",
            e,
            plural(e)
        )),
        (w, e) => Some(format!(
            "error: secrets-console generated {} error{} and {} warning{}",
            e,
            plural(e),
            w,
            plural(w)
        )),
    }
}

/// Render `key=value` fields for a structured log line
///
/// Used by the `log_*!` macros; the returned string starts with a space so it
/// can be appended directly to the message.
pub fn render_fields(fields: &[(&str, String)]) -> String {
    let mut out = String::new();
    for (key, value) in fields {
        out.push(' ');
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Log an informational message with optional structured fields
#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        ::log::info!("{}", $msg)
    };
    ($msg:expr, $($key:expr => $value:expr),+ $(,)?) => {
        ::log::info!(
            "{}{}",
            $msg,
            $crate::logging::render_fields(&[$(($key, $value.to_string())),+])
        )
    };
}

/// Log a debug message with optional structured fields
#[macro_export]
macro_rules! log_debug {
    ($msg:expr) => {
        ::log::debug!("{}", $msg)
    };
    ($msg:expr, $($key:expr => $value:expr),+ $(,)?) => {
        ::log::debug!(
            "{}{}",
            $msg,
            $crate::logging::render_fields(&[$(($key, $value.to_string())),+])
        )
    };
}

/// Log a warning with optional structured fields
#[macro_export]
macro_rules! log_warn {
    ($msg:expr) => {
        ::log::warn!("{}", $msg)
    };
    ($msg:expr, $($key:expr => $value:expr),+ $(,)?) => {
        ::log::warn!(
            "{}{}",
            $msg,
            $crate::logging::render_fields(&[$(($key, $value.to_string())),+])
        )
    };
}

/// Log a completed operation under a success code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $msg:expr) => {
        ::log::info!("[{}] {}", $code, $msg)
    };
    ($code:expr, $msg:expr, $($key:expr => $value:expr),+ $(,)?) => {
        ::log::info!(
            "[{}] {}{}",
            $code,
            $msg,
            $crate::logging::render_fields(&[$(($key, $value.to_string())),+])
        )
    };
}

/// Log a failure under a diagnostic code
#[macro_export]
macro_rules! log_error {
    ($code:expr, $msg:expr) => {
        ::log::error!("[{}] {}", $code, $msg)
    };
    ($code:expr, $msg:expr, $($key:expr => $value:expr),+ $(,)?) => {
        ::log::error!(
            "[{}] {}{}",
            $code,
            $msg,
            $crate::logging::render_fields(&[$(($key, $value.to_string())),+])
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fields_empty() {
        assert_eq!(render_fields(&[]), "");
    }

    #[test]
    fn test_render_fields_pairs() {
        let rendered = render_fields(&[("count", "3".to_string()), ("batch", "abc".to_string())]);
        assert_eq!(rendered, " count=3 batch=abc");
    }

    #[test]
    fn test_summary_line_clean_run() {
        assert_eq!(summary_line(0, 0), None);
    }

    #[test]
    fn test_summary_line_warnings_only() {
        assert_eq!(
            summary_line(1, 0).as_deref(),
            Some("warning: secrets-console generated 1 warning")
        );
        assert_eq!(
            summary_line(3, 0).as_deref(),
            Some("warning: secrets-console generated 3 warnings")
        );
    }

    #[test]
    fn test_summary_line_errors_and_warnings() {
        assert_eq!(
            summary_line(2, 1).as_deref(),
            Some("error: secrets-console generated 1 error and 2 warnings")
        );
    }
}

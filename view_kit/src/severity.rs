//! Severity labels and their fixed display styles
//!
//! Severity names arrive from the scan server as lowercase strings. The set
//! is open-ended: the secret scanner emits critical/high/medium/low/unknown,
//! the compliance side adds info/ok/skip/alarm. Labels outside the table get
//! no style and must render unstyled rather than fail.

use serde::{Deserialize, Serialize};

/// One severity bucket of a scan result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCount {
    pub name: String,
    pub value: u64,
}

/// Stacked-series order for the top-assets chart
pub const CHART_SEVERITY_ORDER: [&str; 5] = ["critical", "high", "medium", "low", "unknown"];

/// Chart color for a severity label
///
/// Returns `None` for labels outside the fixed table. Lookup is
/// case-insensitive; the server emits lowercase but display layers pass
/// whatever they hold.
pub fn chart_color(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "critical" => Some("#f87171"),
        "high" => Some("#f472b6"),
        "medium" => Some("#60a5fa"),
        "low" => Some("#fde047"),
        "unknown" => Some("#9ca3af"),
        "info" => Some("#60a5fa"),
        "ok" => Some("#4ade80"),
        "skip" => Some("#9ca3af"),
        "alarm" => Some("#f87171"),
        _ => None,
    }
}

/// ANSI escape for rendering a severity label on the console
///
/// Same table as [`chart_color`], mapped onto terminal colors. `None` means
/// render without color.
pub fn console_color(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "critical" => Some("\x1b[31m"),
        "high" => Some("\x1b[35m"),
        "medium" => Some("\x1b[34m"),
        "low" => Some("\x1b[33m"),
        "unknown" => Some("\x1b[90m"),
        "info" => Some("\x1b[34m"),
        "ok" => Some("\x1b[32m"),
        "skip" => Some("\x1b[90m"),
        "alarm" => Some("\x1b[31m"),
        _ => None,
    }
}

/// Severity name as shown to the user (first letter uppercased)
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_colors_for_known_labels() {
        assert_eq!(chart_color("critical"), Some("#f87171"));
        assert_eq!(chart_color("high"), Some("#f472b6"));
        assert_eq!(chart_color("medium"), Some("#60a5fa"));
        assert_eq!(chart_color("low"), Some("#fde047"));
        assert_eq!(chart_color("unknown"), Some("#9ca3af"));
        assert_eq!(chart_color("ok"), Some("#4ade80"));
    }

    #[test]
    fn test_unmapped_label_degrades_to_none() {
        assert_eq!(chart_color("banana"), None);
        assert_eq!(console_color("banana"), None);
        assert_eq!(chart_color(""), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(chart_color("Critical"), chart_color("critical"));
        assert_eq!(console_color("HIGH"), console_color("high"));
    }

    #[test]
    fn test_display_name_capitalizes_first_letter() {
        assert_eq!(display_name("critical"), "Critical");
        assert_eq!(display_name("ok"), "Ok");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_chart_order_is_fixed() {
        assert_eq!(
            CHART_SEVERITY_ORDER,
            ["critical", "high", "medium", "low", "unknown"]
        );
    }
}

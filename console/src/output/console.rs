//! Console output formatting
//!
//! Provides formatted console output for the two views: per-account severity
//! cards for the summary view, a ranked stacked-bar listing for top assets.
//! Each view renders to a string first so the output can be asserted on.

use std::fmt::Write;

use view_kit::aggregate::AccountSeveritySummary;
use view_kit::api::models::{AssetType, TopAssetRow};
use view_kit::charts::truncate_label;
use view_kit::navigate::{card_title, scans_link};
use view_kit::severity::{console_color, display_name, CHART_SEVERITY_ORDER};

/// Track width of a per-severity bar in a summary card
const BAR_WIDTH: usize = 24;

/// Width of the stacked bar in the top-assets listing
const STACK_WIDTH: usize = 40;

/// Marker shown when a top-assets listing has no rows
const NO_DATA_MARKER: &str = "No data available";

const RESET: &str = "\x1b[0m";

// ============================================================================
// Summary view
// ============================================================================

/// Print the batch summary cards in a human-readable format
pub fn print_scan_summaries(summaries: &[Option<AccountSeveritySummary>]) {
    print!("{}", render_scan_summaries(summaries));
}

/// Render the batch summary cards
fn render_scan_summaries(summaries: &[Option<AccountSeveritySummary>]) -> String {
    let mut out = String::new();
    if summaries.is_empty() {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "╔═══════════════════════════════════════════════════════════════════════════════╗");
    let _ = writeln!(out, "║{:^79}║", "SECRET SCAN RESULTS SUMMARY");
    let _ = writeln!(out, "║{:^79}║", "Summary of secret scan result");
    let _ = writeln!(out, "╚═══════════════════════════════════════════════════════════════════════════════╝");
    let _ = writeln!(out);

    for (index, slot) in summaries.iter().enumerate() {
        match slot {
            Some(summary) => render_account_card(&mut out, index + 1, summaries.len(), summary),
            None => render_dropped_card(&mut out, index + 1, summaries.len()),
        }
    }
    out
}

/// Render one account's severity card
fn render_account_card(
    out: &mut String,
    num: usize,
    total: usize,
    summary: &AccountSeveritySummary,
) {
    let _ = writeln!(out, "┌───────────────────────────────────────────────────────────────────────────────┐");
    let _ = writeln!(out, "│ Account {}/{}: {}", num, total, summary.account_id);
    let _ = writeln!(out, "├───────────────────────────────────────────────────────────────────────────────┤");
    let _ = writeln!(out, "│ Total Secrets: {}", summary.total);
    if let Some(updated_at) = summary.updated_at {
        let _ = writeln!(
            out,
            "│ Updated:       {}",
            updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    if summary.counts.is_empty() {
        let _ = writeln!(out, "│ No secrets found");
    } else {
        let _ = writeln!(out, "├───────────────────────────────────────────────────────────────────────────────┤");
        // Bars scale against this card's largest count, not the batch.
        let max = summary.max_count();
        for count in &summary.counts {
            let color = console_color(&count.name).unwrap_or("");
            let _ = writeln!(
                out,
                "│   {:<10} {:>6}  {}{}{}",
                display_name(&count.name),
                count.value,
                color,
                severity_bar(count.value, max),
                RESET
            );
        }
    }

    let _ = writeln!(out, "└───────────────────────────────────────────────────────────────────────────────┘");
    let _ = writeln!(out);
}

/// Render the placeholder card for a dropped fetch
fn render_dropped_card(out: &mut String, num: usize, total: usize) {
    let _ = writeln!(out, "┌───────────────────────────────────────────────────────────────────────────────┐");
    let _ = writeln!(
        out,
        "│ Account {}/{}: \x1b[31m✗\x1b[0m result unavailable (fetch dropped)",
        num, total
    );
    let _ = writeln!(out, "└───────────────────────────────────────────────────────────────────────────────┘");
    let _ = writeln!(out);
}

/// Bar scaled against the card's largest count
///
/// The dominant severity always fills the whole track; any nonzero count
/// shows at least one cell.
fn severity_bar(value: u64, max: u64) -> String {
    if max == 0 {
        return "░".repeat(BAR_WIDTH);
    }
    let filled = ((value as u128 * BAR_WIDTH as u128 + max as u128 - 1) / max as u128) as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

// ============================================================================
// Top-assets view
// ============================================================================

/// Print the ranked top-assets listing
pub fn print_top_assets(asset_type: AssetType, rows: &[TopAssetRow]) {
    print!("{}", render_top_assets(asset_type, rows));
}

/// Render the ranked top-assets listing, or its empty state
fn render_top_assets(asset_type: AssetType, rows: &[TopAssetRow]) -> String {
    let mut out = String::new();
    let title = card_title(asset_type).to_uppercase();

    let _ = writeln!(out);
    let _ = writeln!(out, "╔═══════════════════════════════════════════════════════════════════════════════╗");
    let _ = writeln!(out, "║{:^79}║", title);

    if rows.is_empty() {
        let _ = writeln!(out, "╠═══════════════════════════════════════════════════════════════════════════════╣");
        let _ = writeln!(out, "║{:^79}║", NO_DATA_MARKER);
        let _ = writeln!(out, "╚═══════════════════════════════════════════════════════════════════════════════╝");
        let _ = writeln!(out);
        return out;
    }

    let _ = writeln!(out, "╚═══════════════════════════════════════════════════════════════════════════════╝");
    let _ = writeln!(out);

    // Highest-ranked row prints first; all bars share one scale.
    let scale = rows.iter().map(|r| r.total()).max().unwrap_or(0);
    for (index, row) in rows.iter().enumerate() {
        render_asset_row(&mut out, index + 1, row, asset_type, scale);
    }

    render_legend(&mut out);
    let _ = writeln!(out);
    out
}

/// Render a single ranked asset row with its stacked bar and link
fn render_asset_row(
    out: &mut String,
    rank: usize,
    row: &TopAssetRow,
    asset_type: AssetType,
    scale: u64,
) {
    let _ = writeln!(
        out,
        "  {}. {:<20} {:>6}  {}",
        rank,
        truncate_label(&row.name),
        row.total(),
        stacked_bar(row, scale)
    );
    if let Some(link) = scans_link(asset_type, row.id.as_deref()) {
        let _ = writeln!(out, "     └─ {}", link);
    }
}

/// Stacked severity bar on the shared listing scale
fn stacked_bar(row: &TopAssetRow, scale: u64) -> String {
    if scale == 0 {
        return String::new();
    }
    let mut bar = String::new();
    for name in CHART_SEVERITY_ORDER {
        let value = row.severity_value(name);
        if value == 0 {
            continue;
        }
        let width =
            ((value as u128 * STACK_WIDTH as u128 + scale as u128 - 1) / scale as u128) as usize;
        let color = console_color(name).unwrap_or("");
        bar.push_str(color);
        for _ in 0..width {
            bar.push('█');
        }
        bar.push_str(RESET);
    }
    bar
}

fn render_legend(out: &mut String) {
    let _ = writeln!(out);
    let _ = write!(out, "  Legend: ");
    for name in CHART_SEVERITY_ORDER {
        let color = console_color(name).unwrap_or("");
        let _ = write!(out, "{}■{} {}  ", color, RESET, display_name(name));
    }
    let _ = writeln!(out);
}

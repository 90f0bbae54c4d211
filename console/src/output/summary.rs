//! Summary builder
//!
//! Builds minimal summary output for either view. Dropped batch slots stay
//! in the accounts array as nulls so positions line up with the request.

use chrono::Utc;

use view_kit::aggregate::AccountSeveritySummary;
use view_kit::api::models::{AssetType, TopAssetRow};
use view_kit::navigate;

use super::ViewData;

/// Build a unified summary JSON for the rendered view
pub fn build_summary(data: &ViewData<'_>) -> serde_json::Value {
    match data {
        ViewData::ScanSummary { summaries } => build_scan_summary(summaries),
        ViewData::TopAssets { asset_type, rows } => build_top_assets_summary(*asset_type, rows),
    }
}

fn build_scan_summary(summaries: &[Option<AccountSeveritySummary>]) -> serde_json::Value {
    let fetched = summaries.iter().filter(|slot| slot.is_some()).count();
    let total_secrets: u64 = summaries.iter().flatten().map(|s| s.total).sum();

    let accounts: Vec<serde_json::Value> = summaries
        .iter()
        .map(|slot| match slot {
            Some(summary) => build_account_summary(summary),
            None => serde_json::Value::Null,
        })
        .collect();

    serde_json::json!({
        "console": {
            "name": "secrets-console",
            "version": env!("CARGO_PKG_VERSION")
        },
        "view": "summary",
        "generated_at": Utc::now().to_rfc3339(),
        "summary": {
            "requested": summaries.len(),
            "fetched": fetched,
            "dropped": summaries.len() - fetched,
            "total_secrets": total_secrets
        },
        "accounts": accounts
    })
}

/// Build summary for a single account
fn build_account_summary(summary: &AccountSeveritySummary) -> serde_json::Value {
    let counts: Vec<serde_json::Value> = summary
        .counts
        .iter()
        .map(|count| {
            serde_json::json!({
                "name": count.name,
                "value": count.value
            })
        })
        .collect();

    serde_json::json!({
        "account_id": summary.account_id,
        "total": summary.total,
        "counts": counts,
        "updated_at": summary.updated_at.map(|t| t.to_rfc3339())
    })
}

fn build_top_assets_summary(asset_type: AssetType, rows: &[TopAssetRow]) -> serde_json::Value {
    let assets: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "name": row.name,
                "id": row.id,
                "critical": row.critical,
                "high": row.high,
                "medium": row.medium,
                "low": row.low,
                "unknown": row.unknown,
                "total": row.total(),
                "link": navigate::scans_link(asset_type, row.id.as_deref())
            })
        })
        .collect();

    serde_json::json!({
        "console": {
            "name": "secrets-console",
            "version": env!("CARGO_PKG_VERSION")
        },
        "view": "top-assets",
        "generated_at": Utc::now().to_rfc3339(),
        "node_type": asset_type.to_string(),
        "title": navigate::card_title(asset_type),
        "scans_path": navigate::scans_index_path(asset_type),
        "assets": assets
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use view_kit::severity::SeverityCount;

    fn summary(account_id: &str, pairs: &[(&str, u64)]) -> AccountSeveritySummary {
        let counts: Vec<SeverityCount> = pairs
            .iter()
            .map(|(name, value)| SeverityCount {
                name: name.to_string(),
                value: *value,
            })
            .collect();
        AccountSeveritySummary {
            account_id: account_id.to_string(),
            total: counts.iter().map(|c| c.value).sum(),
            counts,
            updated_at: None,
        }
    }

    #[test]
    fn test_dropped_slots_stay_as_nulls() {
        let slots = vec![
            Some(summary("acct-a", &[("critical", 2)])),
            None,
            Some(summary("acct-c", &[("low", 1)])),
        ];
        let data = ViewData::ScanSummary { summaries: &slots };
        let value = build_summary(&data);

        let accounts = value["accounts"].as_array().unwrap();
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[0]["account_id"], "acct-a");
        assert!(accounts[1].is_null());
        assert_eq!(accounts[2]["account_id"], "acct-c");

        assert_eq!(value["summary"]["requested"], 3);
        assert_eq!(value["summary"]["fetched"], 2);
        assert_eq!(value["summary"]["dropped"], 1);
        assert_eq!(value["summary"]["total_secrets"], 3);
    }

    #[test]
    fn test_top_assets_summary_carries_links() {
        let rows = vec![
            TopAssetRow {
                name: "nginx:latest".to_string(),
                id: Some("img-1".to_string()),
                critical: 3,
                high: 1,
                medium: 0,
                low: 0,
                unknown: 0,
            },
            TopAssetRow {
                name: "anon".to_string(),
                id: None,
                critical: 1,
                high: 0,
                medium: 0,
                low: 0,
                unknown: 0,
            },
        ];
        let data = ViewData::TopAssets {
            asset_type: AssetType::Image,
            rows: &rows,
        };
        let value = build_summary(&data);

        assert_eq!(value["node_type"], "image");
        assert_eq!(value["scans_path"], "/secret/scans?nodeType=container_image");
        let assets = value["assets"].as_array().unwrap();
        assert_eq!(
            assets[0]["link"],
            "/secret/scans?nodeType=container_image&containerImages=img-1"
        );
        assert!(assets[1]["link"].is_null());
        assert_eq!(assets[0]["total"], 4);
    }
}

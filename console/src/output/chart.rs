//! Chart document builder
//!
//! Emits the chart options for the top-assets view. The summary view has no
//! chart shape, so asking for one is a build error rather than a guess.

use view_kit::charts;

use super::{OutputError, ViewData};

/// Build the chart options document for the rendered view
pub fn build_chart(data: &ViewData<'_>) -> Result<serde_json::Value, OutputError> {
    match data {
        ViewData::TopAssets { rows, .. } => Ok(charts::top_assets_chart_options(rows)),
        ViewData::ScanSummary { .. } => Err(OutputError::Build(
            "chart output is only available for the top-assets view".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use view_kit::api::models::{AssetType, TopAssetRow};

    #[test]
    fn test_top_assets_build_chart_document() {
        let rows = vec![TopAssetRow {
            name: "web-1".to_string(),
            id: Some("h1".to_string()),
            critical: 2,
            high: 0,
            medium: 0,
            low: 0,
            unknown: 0,
        }];
        let data = ViewData::TopAssets {
            asset_type: AssetType::Host,
            rows: &rows,
        };
        let value = build_chart(&data).unwrap();
        assert_eq!(value["series"].as_array().unwrap().len(), 5);
        assert_eq!(value["dataset"]["source"][0]["name"], "web-1");
    }

    #[test]
    fn test_summary_view_has_no_chart() {
        let summaries: Vec<Option<view_kit::aggregate::AccountSeveritySummary>> = vec![];
        let data = ViewData::ScanSummary {
            summaries: &summaries,
        };
        let err = build_chart(&data).unwrap_err();
        assert!(err.to_string().contains("top-assets"));
    }
}

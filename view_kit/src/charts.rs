//! Chart document for the top-assets view
//!
//! Shapes ranked rows into the declarative option object a charting layer
//! consumes directly: a column-oriented dataset plus five fixed stacked bar
//! series, one per severity. The input arrives ranked highest-first; the
//! dataset is emitted reversed so a horizontal layout draws the top asset
//! in the top lane.

use serde_json::{json, Map, Value};

use crate::api::models::TopAssetRow;
use crate::severity::{chart_color, CHART_SEVERITY_ORDER};

/// Category labels longer than this are shortened for axis display
pub const MAX_LABEL_CHARS: usize = 20;

/// Build the chart options for ranked top-asset rows
///
/// # Arguments
/// * `rows` - Ranked rows, highest total first, as served by the API
///
/// # Returns
/// The complete options object. Row ids ride along inside the dataset so a
/// click handler can resolve them without a side lookup.
pub fn top_assets_chart_options(rows: &[TopAssetRow]) -> Value {
    let source: Vec<Value> = rows.iter().rev().map(dataset_row).collect();

    let series: Vec<Value> = CHART_SEVERITY_ORDER
        .iter()
        .map(|name| {
            json!({
                "type": "bar",
                "stack": "total",
                "color": chart_color(name),
                "cursor": "pointer",
                "barMaxWidth": 20,
            })
        })
        .collect();

    json!({
        "backgroundColor": "transparent",
        "title": { "show": false },
        "dataset": {
            "dimensions": [
                { "name": "name", "displayName": "Container Name" },
                { "name": "critical", "displayName": "Critical" },
                { "name": "high", "displayName": "High" },
                { "name": "medium", "displayName": "Medium" },
                { "name": "low", "displayName": "Low" },
                { "name": "unknown", "displayName": "Unknown" },
            ],
            "source": source,
        },
        "tooltip": {
            "trigger": "axis",
            "axisPointer": { "type": "shadow" },
            "confine": true,
            "borderWidth": 0,
            "borderRadius": 5,
        },
        "legend": { "show": false },
        "grid": {
            "left": "2%",
            "right": "5%",
            "top": "10%",
            "bottom": "10%",
            "containLabel": true,
        },
        "xAxis": { "type": "value" },
        "yAxis": {
            "type": "category",
            "axisLine": { "show": false },
            "axisTick": { "show": false },
        },
        "series": series,
    })
}

/// One dataset entry; `id` appears only when the row carries one
fn dataset_row(row: &TopAssetRow) -> Value {
    let mut entry = Map::new();
    entry.insert("name".to_string(), json!(row.name));
    if let Some(id) = &row.id {
        entry.insert("id".to_string(), json!(id));
    }
    entry.insert("critical".to_string(), json!(row.critical));
    entry.insert("high".to_string(), json!(row.high));
    entry.insert("medium".to_string(), json!(row.medium));
    entry.insert("low".to_string(), json!(row.low));
    entry.insert("unknown".to_string(), json!(row.unknown));
    Value::Object(entry)
}

/// Shorten a category label for axis display
///
/// Labels over [`MAX_LABEL_CHARS`] characters keep their head and gain an
/// ellipsis. Display only; click resolution always uses the full id.
pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_CHARS {
        let head: String = name.chars().take(MAX_LABEL_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

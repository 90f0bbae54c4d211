//! Severity aggregation for the scan summary view
//!
//! One pass over a result's severity mapping produces everything the
//! summary card needs: the grand total and the per-severity rows, in the
//! mapping's own key order. Ordering by count is deliberately left to the
//! server; this stage never re-sorts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::models::SecretScanResult;
use crate::severity::SeverityCount;

/// Reduce a severity mapping to a grand total and ordered count rows
///
/// # Arguments
/// * `counts` - Severity label to occurrence count, or `None` when the scan
///   reported nothing
///
/// # Returns
/// The sum over all labels and one `SeverityCount` per label, in key order.
/// Absent and empty mappings both yield `(0, vec![])`.
pub fn aggregate_severity_counts(
    counts: Option<&BTreeMap<String, u64>>,
) -> (u64, Vec<SeverityCount>) {
    let Some(map) = counts else {
        return (0, Vec::new());
    };

    let mut total = 0u64;
    let mut rows = Vec::with_capacity(map.len());
    for (name, value) in map {
        total += value;
        rows.push(SeverityCount {
            name: name.clone(),
            value: *value,
        });
    }
    (total, rows)
}

/// Aggregated severity picture of one account's scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSeveritySummary {
    /// Account the scan ran against
    pub account_id: String,
    /// Sum over every severity label
    pub total: u64,
    /// Per-severity rows in the mapping's key order
    pub counts: Vec<SeverityCount>,
    /// When the result was last written, if the server said
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AccountSeveritySummary {
    /// Build the summary card data from one scan result
    pub fn from_result(result: &SecretScanResult) -> Self {
        let (total, counts) = aggregate_severity_counts(result.severity_counts.as_ref());
        Self {
            account_id: result.kubernetes_cluster_name.clone(),
            total,
            counts,
            updated_at: result.updated_at,
        }
    }

    /// Largest single severity count
    ///
    /// Each card scales its bars against this value, so the dominant
    /// severity always draws a full bar regardless of absolute size.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().map(|c| c.value).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_total_is_sum_of_all_labels() {
        let map = counts(&[("critical", 3), ("high", 5), ("low", 2)]);
        let (total, rows) = aggregate_severity_counts(Some(&map));
        assert_eq!(total, 10);
        assert_eq!(total, rows.iter().map(|r| r.value).sum::<u64>());
    }

    #[test]
    fn test_absent_mapping_yields_empty_aggregate() {
        let (total, rows) = aggregate_severity_counts(None);
        assert_eq!(total, 0);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_mapping_yields_empty_aggregate() {
        let map = BTreeMap::new();
        let (total, rows) = aggregate_severity_counts(Some(&map));
        assert_eq!(total, 0);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_rows_follow_key_order_not_count_order() {
        // "low" outnumbers "critical"; key order must still win.
        let map = counts(&[("low", 50), ("critical", 1), ("medium", 9)]);
        let (_, rows) = aggregate_severity_counts(Some(&map));
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["critical", "low", "medium"]);
    }

    #[test]
    fn test_unconventional_labels_are_kept() {
        let map = counts(&[("banana", 2), ("critical", 1)]);
        let (total, rows) = aggregate_severity_counts(Some(&map));
        assert_eq!(total, 3);
        assert!(rows.iter().any(|r| r.name == "banana"));
    }

    #[test]
    fn test_summary_from_result_keeps_invariant() {
        let result = SecretScanResult {
            kubernetes_cluster_name: "prod-cluster".to_string(),
            updated_at: None,
            severity_counts: Some(counts(&[("critical", 4), ("unknown", 1)])),
        };
        let summary = AccountSeveritySummary::from_result(&result);
        assert_eq!(summary.account_id, "prod-cluster");
        assert_eq!(summary.total, 5);
        assert_eq!(
            summary.total,
            summary.counts.iter().map(|r| r.value).sum::<u64>()
        );
    }

    #[test]
    fn test_max_count_over_rows() {
        let result = SecretScanResult {
            kubernetes_cluster_name: "c".to_string(),
            updated_at: None,
            severity_counts: Some(counts(&[("critical", 4), ("high", 9), ("low", 2)])),
        };
        let summary = AccountSeveritySummary::from_result(&result);
        assert_eq!(summary.max_count(), 9);

        let empty = AccountSeveritySummary::from_result(&SecretScanResult {
            kubernetes_cluster_name: "c".to_string(),
            updated_at: None,
            severity_counts: None,
        });
        assert_eq!(empty.max_count(), 0);
    }
}

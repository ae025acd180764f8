use serde::{Deserialize, Serialize};

use crate::models::{ParishField, ParishRecord};
use crate::services::aggregation::SummaryStatistics;
use crate::services::filters::FilterCriteria;

/// Headline figures of a parish view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExplorerMetrics {
    pub parish_count: usize,
    pub total_infrastructure: u64,
    /// Mean health facilities per 10k inhabitants; `None` when there is no data.
    pub mean_health_rate: Option<f64>,
    pub total_population: u64,
}

/// Simple counts over a parish view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedCounts {
    /// Parishes with at least one piece of oil infrastructure.
    pub with_oil: usize,
    /// Parishes whose afro-ecuadorian share is above 5%.
    pub with_afro_above_5_pct: usize,
    /// Parishes with no health facility at all.
    pub without_health_access: usize,
}

/// One row of the descriptive statistics table, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeRow {
    pub field: ParishField,
    pub label: String,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Whether a view has rows to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorerStatus {
    Ok,
    /// The query succeeded but nothing matched.
    NoData,
}

/// Complete data explorer view for one scope and one set of filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerData {
    pub scope: String,
    pub status: ExplorerStatus,
    pub criteria: FilterCriteria,
    /// Metrics over the unfiltered scope.
    pub scope_metrics: ExplorerMetrics,
    /// Metrics over the filtered rows.
    pub metrics: ExplorerMetrics,
    /// Filtered rows, most infrastructure first.
    pub rows: Vec<ParishRecord>,
    pub summary: SummaryStatistics,
    pub statistics: Vec<DescribeRow>,
    pub counts: DerivedCounts,
    /// Suggested file name for the CSV download of this view.
    pub export_file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ExplorerStatus::NoData).unwrap(),
            "\"no_data\""
        );
        assert_eq!(serde_json::to_string(&ExplorerStatus::Ok).unwrap(), "\"ok\"");
    }

    #[test]
    fn test_undefined_mean_serializes_as_null() {
        let metrics = ExplorerMetrics::default();
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json["mean_health_rate"].is_null());
    }
}

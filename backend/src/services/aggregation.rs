//! Aggregation engine: descriptive statistics and derived counts over parish views.
//!
//! Every function here is pure and total. Statistics that are undefined for the
//! given input (mean of nothing, deviation of a single value, ratio against a
//! zero baseline) come back as `None` instead of NaN or a panic; callers check
//! `count` before reading them.

use serde::{Deserialize, Serialize};

use crate::api::{DerivedCounts, DescribeRow, ExplorerMetrics};
use crate::models::{ParishField, ParishRecord};

/// Afro-ecuadorian share above which a parish counts as having a notable community.
pub const AFRO_PRESENCE_THRESHOLD_PCT: f64 = 5.0;

/// Columns shown in the descriptive statistics table.
pub const DESCRIBED_FIELDS: [ParishField; 4] = [
    ParishField::Infrastructure,
    ParishField::HealthRate,
    ParishField::AfroPercentage,
    ParishField::Population,
];

/// Statistics of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnStats {
    pub sum: f64,
    pub mean: Option<f64>,
    /// Sample standard deviation (N-1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Summary statistics of a dataset snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub infrastructure: ColumnStats,
    pub wells: ColumnStats,
    pub contaminated_sites: ColumnStats,
    pub health_rate: ColumnStats,
    pub afro_percentage: ColumnStats,
    pub population: ColumnStats,
}

impl SummaryStatistics {
    /// Statistics for a numeric field; `None` for text fields.
    pub fn column(&self, field: ParishField) -> Option<&ColumnStats> {
        match field {
            ParishField::Infrastructure => Some(&self.infrastructure),
            ParishField::Wells => Some(&self.wells),
            ParishField::ContaminatedSites => Some(&self.contaminated_sites),
            ParishField::HealthRate => Some(&self.health_rate),
            ParishField::AfroPercentage => Some(&self.afro_percentage),
            ParishField::Population => Some(&self.population),
            ParishField::Parish | ParishField::Canton | ParishField::Province => None,
        }
    }
}

/// Compute count, sum, mean, sample deviation, min and max of a column.
pub fn column_stats(values: &[f64]) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats::default();
    }

    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    let mean = sum / n;

    let std = if values.len() > 1 {
        let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((squared / (n - 1.0)).sqrt())
    } else {
        None
    };

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    ColumnStats {
        sum,
        mean: Some(mean),
        std,
        min: Some(min),
        max: Some(max),
    }
}

fn field_values(dataset: &[ParishRecord], field: ParishField) -> Vec<f64> {
    dataset
        .iter()
        .filter_map(|record| field.numeric_value(record))
        .collect()
}

/// Summarize every numeric column of the dataset.
pub fn summarize(dataset: &[ParishRecord]) -> SummaryStatistics {
    let stats = |field| column_stats(&field_values(dataset, field));

    SummaryStatistics {
        count: dataset.len(),
        infrastructure: stats(ParishField::Infrastructure),
        wells: stats(ParishField::Wells),
        contaminated_sites: stats(ParishField::ContaminatedSites),
        health_rate: stats(ParishField::HealthRate),
        afro_percentage: stats(ParishField::AfroPercentage),
        population: stats(ParishField::Population),
    }
}

/// Round to a fixed number of decimals for display.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Descriptive statistics table (mean, std, min, max) rounded to two decimals.
pub fn describe(summary: &SummaryStatistics) -> Vec<DescribeRow> {
    let round = |v: Option<f64>| v.map(|x| round_to(x, 2));

    DESCRIBED_FIELDS
        .iter()
        .filter_map(|field| {
            summary.column(*field).map(|stats| DescribeRow {
                field: *field,
                label: field.display_label().to_string(),
                mean: round(stats.mean),
                std: round(stats.std),
                min: round(stats.min),
                max: round(stats.max),
            })
        })
        .collect()
}

/// Counts of parishes with oil, with a notable afro community and without health access.
pub fn derived_counts(dataset: &[ParishRecord]) -> DerivedCounts {
    DerivedCounts {
        with_oil: dataset.iter().filter(|r| r.infrastructure > 0).count(),
        with_afro_above_5_pct: dataset
            .iter()
            .filter(|r| r.afro_percentage > AFRO_PRESENCE_THRESHOLD_PCT)
            .count(),
        without_health_access: dataset.iter().filter(|r| r.health_rate == 0.0).count(),
    }
}

/// Headline metrics: parish count, total infrastructure, mean health rate, total population.
pub fn explorer_metrics(dataset: &[ParishRecord]) -> ExplorerMetrics {
    let health = column_stats(&field_values(dataset, ParishField::HealthRate));

    ExplorerMetrics {
        parish_count: dataset.len(),
        total_infrastructure: dataset.iter().map(|r| r.infrastructure as u64).sum(),
        mean_health_rate: health.mean,
        total_population: dataset.iter().map(|r| r.population).sum(),
    }
}

/// Mean of `field` over the records matching `predicate`, `None` if none match.
pub fn mean_where<P>(dataset: &[ParishRecord], predicate: P, field: ParishField) -> Option<f64>
where
    P: Fn(&ParishRecord) -> bool,
{
    let values: Vec<f64> = dataset
        .iter()
        .filter(|r| predicate(r))
        .filter_map(|r| field.numeric_value(r))
        .collect();
    column_stats(&values).mean
}

/// Relative change of `a` against baseline `b`, in percent.
///
/// Undefined (`None`) when the baseline is zero or either input is not finite.
pub fn percentage_delta(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 || !a.is_finite() || !b.is_finite() {
        return None;
    }
    Some((a - b) / b * 100.0)
}

/// Share of `part` in `whole`, in percent; `None` when `whole` is zero.
pub fn share_pct(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some(part as f64 / whole as f64 * 100.0)
}

/// Render a percentage for display with one decimal, or "N/A" when undefined.
pub fn format_delta(delta: Option<f64>) -> String {
    match delta {
        Some(value) => format!("{:.1}%", value),
        None => "N/A".to_string(),
    }
}

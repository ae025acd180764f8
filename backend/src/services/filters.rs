//! Filter engine for parish datasets.
//!
//! Filtering is a stable, pure conjunction of optional predicates. Records are
//! expected to be normalized already (see [`ParishRecord`]); no missing-value
//! handling happens here.

use serde::{Deserialize, Serialize};

use crate::models::ParishRecord;

/// Upper bound accepted for the afro-ecuadorian percentage threshold.
pub const MAX_GROUP_PERCENTAGE: f64 = 100.0;
/// Upper bound accepted for the health-rate threshold (facilities per 10k).
pub const MAX_HEALTH_RATE: f64 = 50.0;

/// Error raised when user-supplied thresholds are outside their documented range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },
}

/// User-chosen inclusion thresholds.
///
/// The default value applies no filtering.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Keep only parishes with oil infrastructure.
    pub require_infrastructure: bool,
    /// Minimum afro-ecuadorian population share (inclusive); 0 disables.
    pub min_group_percentage: f64,
    /// Minimum health facilities per 10k inhabitants (inclusive); 0 disables.
    pub min_health_rate: f64,
}

impl FilterCriteria {
    /// Build criteria from raw user input, rejecting out-of-range thresholds.
    pub fn new(
        require_infrastructure: bool,
        min_group_percentage: f64,
        min_health_rate: f64,
    ) -> Result<Self, FilterError> {
        check_range("min_group_percentage", min_group_percentage, MAX_GROUP_PERCENTAGE)?;
        check_range("min_health_rate", min_health_rate, MAX_HEALTH_RATE)?;

        Ok(Self {
            require_infrastructure,
            min_group_percentage,
            min_health_rate,
        })
    }

    /// Whether at least one predicate narrows the dataset.
    pub fn is_active(&self) -> bool {
        self.require_infrastructure || self.min_group_percentage > 0.0 || self.min_health_rate > 0.0
    }

    /// Whether a record satisfies every active predicate.
    pub fn matches(&self, record: &ParishRecord) -> bool {
        if self.require_infrastructure && record.infrastructure == 0 {
            return false;
        }
        if self.min_group_percentage > 0.0 && record.afro_percentage < self.min_group_percentage {
            return false;
        }
        if self.min_health_rate > 0.0 && record.health_rate < self.min_health_rate {
            return false;
        }
        true
    }
}

fn check_range(field: &'static str, value: f64, max: f64) -> Result<(), FilterError> {
    // NaN fails both comparisons, so it lands here too
    if !(0.0..=max).contains(&value) {
        return Err(FilterError::OutOfRange { field, value, max });
    }
    Ok(())
}

/// Apply the criteria to a dataset, keeping surviving records in their original order.
pub fn apply_filters(dataset: &[ParishRecord], criteria: &FilterCriteria) -> Vec<ParishRecord> {
    if !criteria.is_active() {
        return dataset.to_vec();
    }

    dataset
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

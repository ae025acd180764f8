//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies are re-exported from the routes module since they already
//! derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    // Explorer
    DerivedCounts, DescribeRow, ExplorerData, ExplorerMetrics, ExplorerStatus,
    // Landing
    OverviewData, ProvinceList,
};

use crate::models::Scope;
use crate::services::filters::{FilterCriteria, FilterError};

/// Query parameters shared by the explorer and its CSV export.
///
/// `GET /v1/explorer?province=Esmeraldas&only_oil=true&min_afro_pct=5&min_health=1.5`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ExplorerQuery {
    /// Province name; absent, empty, `all` or `Todas` select every province.
    #[serde(default)]
    pub province: Option<String>,
    /// Keep only parishes with oil infrastructure.
    #[serde(default)]
    pub only_oil: bool,
    /// Minimum afro-ecuadorian share, 0-100.
    #[serde(default)]
    pub min_afro_pct: f64,
    /// Minimum health facilities per 10k inhabitants, 0-50.
    #[serde(default)]
    pub min_health: f64,
}

impl ExplorerQuery {
    pub fn scope(&self) -> Scope {
        Scope::from_param(self.province.as_deref())
    }

    /// Validated filter criteria.
    pub fn criteria(&self) -> Result<FilterCriteria, FilterError> {
        FilterCriteria::new(self.only_oil, self.min_afro_pct, self.min_health)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
    /// Database connection status
    pub database: String,
}

use serde::{Deserialize, Serialize};

/// Key metrics shown on the landing page.
///
/// Ratios whose denominator is zero are `None` and render as "N/A".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverviewData {
    pub total_parishes: usize,
    pub parishes_with_oil: usize,
    /// Share of parishes with oil infrastructure, in percent.
    pub oil_share_pct: Option<f64>,
    pub total_wells: u64,
    pub total_contaminated_sites: u64,
    /// Mean health rate of parishes without oil infrastructure.
    pub health_without_oil: Option<f64>,
    /// Mean health rate of parishes with oil infrastructure.
    pub health_with_oil: Option<f64>,
    /// Relative change of the with-oil mean against the without-oil mean.
    pub health_delta_pct: Option<f64>,
}

/// Provinces available as scopes, sorted by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProvinceList {
    pub provinces: Vec<String>,
    pub total: usize,
}

impl From<Vec<String>> for ProvinceList {
    fn from(provinces: Vec<String>) -> Self {
        let total = provinces.len();
        Self { provinces, total }
    }
}

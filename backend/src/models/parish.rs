//! Parish record types.
//!
//! A parish (`parroquia`) is the smallest administrative area in the source
//! table. [`RawParishRow`] mirrors the columns exactly as the data source
//! returns them, with every value nullable. [`ParishRecord`] is the normalized
//! form every other layer works with: converting a raw row is the one place
//! where missing values become zero.

use serde::{Deserialize, Serialize};

/// One row of the `parroquias` table as returned by the data source.
///
/// Field names follow the source column names so the same struct can be read
/// from the database and from a CSV seed file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawParishRow {
    #[serde(default)]
    pub nombre_parroquia: Option<String>,
    #[serde(default)]
    pub nombre_canton: Option<String>,
    #[serde(default)]
    pub nombre_provincia: Option<String>,
    #[serde(default)]
    pub num_infraestructura_petrolera: Option<i64>,
    #[serde(default)]
    pub num_pozos: Option<i64>,
    #[serde(default)]
    pub num_sitios_contaminados: Option<i64>,
    #[serde(default)]
    pub establecimientos_por_10k_hab: Option<f64>,
    #[serde(default)]
    pub pct_poblacion_afro: Option<f64>,
    #[serde(default)]
    pub poblacion_total: Option<i64>,
}

/// Normalized parish record.
///
/// All numeric fields are defined; downstream filters and aggregations never
/// see a missing value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParishRecord {
    pub parish: String,
    pub canton: String,
    pub province: String,
    /// Oil infrastructure count.
    pub infrastructure: u32,
    /// Oil well count.
    pub wells: u32,
    /// Contaminated site count.
    pub contaminated_sites: u32,
    /// Health facilities per 10,000 inhabitants.
    pub health_rate: f64,
    /// Afro-ecuadorian share of the population, 0-100.
    pub afro_percentage: f64,
    pub population: u64,
}

impl From<RawParishRow> for ParishRecord {
    fn from(row: RawParishRow) -> Self {
        Self {
            parish: row.nombre_parroquia.unwrap_or_default(),
            canton: row.nombre_canton.unwrap_or_default(),
            province: row.nombre_provincia.unwrap_or_default(),
            infrastructure: count_or_zero(row.num_infraestructura_petrolera),
            wells: count_or_zero(row.num_pozos),
            contaminated_sites: count_or_zero(row.num_sitios_contaminados),
            health_rate: rate_or_zero(row.establecimientos_por_10k_hab),
            afro_percentage: rate_or_zero(row.pct_poblacion_afro).min(100.0),
            population: row
                .poblacion_total
                .map(|p| p.max(0) as u64)
                .unwrap_or(0),
        }
    }
}

fn count_or_zero(value: Option<i64>) -> u32 {
    value
        .map(|v| v.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0)
}

// Rates always carry a decimal point (`7.0`, not `7`).
fn render_rate(value: f64) -> String {
    format!("{:?}", value)
}

fn rate_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Typed column selector for a [`ParishRecord`].
///
/// Used by the export formatter and the aggregation engine instead of
/// late-bound column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParishField {
    Parish,
    Canton,
    Province,
    Infrastructure,
    Wells,
    ContaminatedSites,
    HealthRate,
    AfroPercentage,
    Population,
}

impl ParishField {
    /// Numeric columns, in display order.
    pub const NUMERIC: [ParishField; 6] = [
        ParishField::Infrastructure,
        ParishField::Wells,
        ParishField::ContaminatedSites,
        ParishField::HealthRate,
        ParishField::AfroPercentage,
        ParishField::Population,
    ];

    /// Source column name of this field.
    pub fn column_name(&self) -> &'static str {
        match self {
            ParishField::Parish => "nombre_parroquia",
            ParishField::Canton => "nombre_canton",
            ParishField::Province => "nombre_provincia",
            ParishField::Infrastructure => "num_infraestructura_petrolera",
            ParishField::Wells => "num_pozos",
            ParishField::ContaminatedSites => "num_sitios_contaminados",
            ParishField::HealthRate => "establecimientos_por_10k_hab",
            ParishField::AfroPercentage => "pct_poblacion_afro",
            ParishField::Population => "poblacion_total",
        }
    }

    /// Column heading shown in tables and exports.
    pub fn display_label(&self) -> &'static str {
        match self {
            ParishField::Parish => "Parroquia",
            ParishField::Canton => "Cantón",
            ParishField::Province => "Provincia",
            ParishField::Infrastructure => "Infraestructura",
            ParishField::Wells => "Pozos",
            ParishField::ContaminatedSites => "Contaminación",
            ParishField::HealthRate => "Salud (10k hab)",
            ParishField::AfroPercentage => "% Afro",
            ParishField::Population => "Población",
        }
    }

    /// Numeric value of the field, or `None` for text columns.
    pub fn numeric_value(&self, record: &ParishRecord) -> Option<f64> {
        match self {
            ParishField::Parish | ParishField::Canton | ParishField::Province => None,
            ParishField::Infrastructure => Some(record.infrastructure as f64),
            ParishField::Wells => Some(record.wells as f64),
            ParishField::ContaminatedSites => Some(record.contaminated_sites as f64),
            ParishField::HealthRate => Some(record.health_rate),
            ParishField::AfroPercentage => Some(record.afro_percentage),
            ParishField::Population => Some(record.population as f64),
        }
    }

    /// Text rendering of the field, as written to delimited exports.
    pub fn render(&self, record: &ParishRecord) -> String {
        match self {
            ParishField::Parish => record.parish.clone(),
            ParishField::Canton => record.canton.clone(),
            ParishField::Province => record.province.clone(),
            ParishField::Infrastructure => record.infrastructure.to_string(),
            ParishField::Wells => record.wells.to_string(),
            ParishField::ContaminatedSites => record.contaminated_sites.to_string(),
            ParishField::HealthRate => render_rate(record.health_rate),
            ParishField::AfroPercentage => render_rate(record.afro_percentage),
            ParishField::Population => record.population.to_string(),
        }
    }
}

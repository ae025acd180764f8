use diesel::prelude::*;
use std::collections::BTreeSet;

use super::schema::parroquias;
use crate::models::RawParishRow;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = parroquias)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ParishRow {
    pub nombre_parroquia: Option<String>,
    pub nombre_canton: Option<String>,
    pub nombre_provincia: Option<String>,
    pub num_infraestructura_petrolera: Option<i32>,
    pub num_pozos: Option<i32>,
    pub num_sitios_contaminados: Option<i32>,
    pub establecimientos_por_10k_hab: Option<f64>,
    pub pct_poblacion_afro: Option<f64>,
    pub poblacion_total: Option<i64>,
}

impl From<ParishRow> for RawParishRow {
    fn from(row: ParishRow) -> Self {
        Self {
            nombre_parroquia: row.nombre_parroquia,
            nombre_canton: row.nombre_canton,
            nombre_provincia: row.nombre_provincia,
            num_infraestructura_petrolera: row.num_infraestructura_petrolera.map(i64::from),
            num_pozos: row.num_pozos.map(i64::from),
            num_sitios_contaminados: row.num_sitios_contaminados.map(i64::from),
            establecimientos_por_10k_hab: row.establecimientos_por_10k_hab,
            pct_poblacion_afro: row.pct_poblacion_afro,
            poblacion_total: row.poblacion_total,
        }
    }
}

/// Distinct non-empty province names, sorted.
pub fn province_names(names: Vec<Option<String>>) -> Vec<String> {
    let names: BTreeSet<String> = names
        .into_iter()
        .flatten()
        .filter(|name| !name.trim().is_empty())
        .collect();
    names.into_iter().collect()
}

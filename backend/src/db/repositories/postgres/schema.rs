// Mirrors the externally managed `parroquias` table; columns the explorer does
// not read are omitted.

diesel::table! {
    parroquias (nombre_provincia, nombre_canton, nombre_parroquia) {
        nombre_parroquia -> Nullable<Text>,
        nombre_canton -> Nullable<Text>,
        nombre_provincia -> Nullable<Text>,
        num_infraestructura_petrolera -> Nullable<Int4>,
        num_pozos -> Nullable<Int4>,
        num_sitios_contaminados -> Nullable<Int4>,
        establecimientos_por_10k_hab -> Nullable<Float8>,
        pct_poblacion_afro -> Nullable<Float8>,
        poblacion_total -> Nullable<Int8>,
    }
}

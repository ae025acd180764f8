//! End-to-end scenarios over the filter, aggregation and export engines.

mod support;

use paradox_dashboard::db::{services as db_services, LocalRepository};
use paradox_dashboard::models::{ParishField, ParishRecord, RawParishRow, Scope};
use paradox_dashboard::services::aggregation::{format_delta, percentage_delta, summarize};
use paradox_dashboard::services::export::{to_delimited_text, ExportColumn};
use paradox_dashboard::services::filters::{apply_filters, FilterCriteria};
use paradox_dashboard::services::overview::compute_overview;

fn record(infrastructure: u32, health_rate: f64, afro_percentage: f64) -> ParishRecord {
    ParishRecord {
        parish: format!("P{}", infrastructure),
        infrastructure,
        health_rate,
        afro_percentage,
        ..Default::default()
    }
}

#[test]
fn test_require_infrastructure_keeps_only_oil_parishes() {
    let data = vec![record(5, 3.0, 10.0), record(0, 8.0, 0.0)];
    let criteria = FilterCriteria {
        require_infrastructure: true,
        ..Default::default()
    };

    let result = apply_filters(&data, &criteria);
    assert_eq!(result, vec![record(5, 3.0, 10.0)]);
}

#[test]
fn test_group_threshold_is_inclusive() {
    let data = vec![record(5, 3.0, 10.0), record(1, 3.0, 9.99)];
    let criteria = FilterCriteria::new(false, 10.0, 0.0).unwrap();

    let result = apply_filters(&data, &criteria);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].afro_percentage, 10.0);
}

#[test]
fn test_summarize_empty_does_not_panic() {
    let summary = summarize(&[]);
    assert_eq!(summary.count, 0);
    assert!(summary.infrastructure.mean.is_none());
}

#[test]
fn test_delta_with_zero_baseline_is_undefined() {
    let delta = percentage_delta(2.5, 0.0);
    assert!(delta.is_none());
    assert_eq!(format_delta(delta), "N/A");

    let overview = compute_overview(&[record(3, 2.0, 0.0), record(0, 0.0, 0.0)]);
    assert!(overview.health_delta_pct.is_none());
}

#[test]
fn test_export_two_rows_three_columns() {
    let data = vec![record(5, 3.0, 10.0), record(0, 8.0, 0.0)];
    let columns = vec![
        ExportColumn::new(ParishField::Parish, "Parroquia"),
        ExportColumn::new(ParishField::HealthRate, "Salud"),
        ExportColumn::new(ParishField::Infrastructure, "Infra"),
    ];

    let bytes = to_delimited_text(&data, &columns).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines, vec!["Parroquia,Salud,Infra", "P5,3.0,5", "P0,8.0,0"]);
}

#[tokio::test]
async fn test_missing_source_values_become_zero_before_filtering() {
    let repo = LocalRepository::new();
    repo.insert_raw_rows(vec![RawParishRow {
        nombre_parroquia: Some("Sin datos".to_string()),
        nombre_provincia: Some("Orellana".to_string()),
        ..Default::default()
    }]);

    let data = db_services::fetch_parishes(&repo, &Scope::All).await.unwrap();
    assert_eq!(data[0].infrastructure, 0);
    assert_eq!(data[0].health_rate, 0.0);

    let criteria = FilterCriteria::new(true, 0.0, 0.0).unwrap();
    assert!(apply_filters(&data, &criteria).is_empty());
}

#[tokio::test]
async fn test_seeded_csv_blank_cells_normalized() {
    let repo = support::seeded_repository();
    let orellana = db_services::fetch_parishes(&repo, &Scope::Province("Orellana".into()))
        .await
        .unwrap();

    assert_eq!(orellana.len(), 1);
    assert_eq!(orellana[0].parish, "Dayuma");
    assert_eq!(orellana[0].health_rate, 0.0);

    let esmeraldas = db_services::fetch_parishes(&repo, &Scope::Province("Esmeraldas".into()))
        .await
        .unwrap();
    let tachina = esmeraldas.iter().find(|p| p.parish == "Tachina").unwrap();
    assert_eq!(tachina.population, 0);
}

//! Data explorer: one fetch, filter, aggregate cycle per request.

use crate::api::{ExplorerData, ExplorerStatus};
use crate::db::{services as db_services, FullRepository, RepositoryResult};
use crate::models::{ParishRecord, Scope};
use crate::services::aggregation::{derived_counts, describe, explorer_metrics, summarize};
use crate::services::export::{
    explorer_columns, export_file_name, to_delimited_text, ExportError,
};
use crate::services::filters::{apply_filters, FilterCriteria};

/// Narrow a scope's records and order them for display, most infrastructure first.
///
/// Ties keep the order of the source.
pub fn filtered_rows(dataset: &[ParishRecord], criteria: &FilterCriteria) -> Vec<ParishRecord> {
    let mut rows = apply_filters(dataset, criteria);
    rows.sort_by(|a, b| b.infrastructure.cmp(&a.infrastructure));
    rows
}

/// Build the explorer view of `dataset`, the full record set of `scope`.
pub fn build_explorer_view(
    scope: &Scope,
    criteria: FilterCriteria,
    dataset: &[ParishRecord],
) -> ExplorerData {
    let rows = filtered_rows(dataset, &criteria);
    let summary = summarize(&rows);

    let status = if rows.is_empty() {
        ExplorerStatus::NoData
    } else {
        ExplorerStatus::Ok
    };

    ExplorerData {
        scope: scope.label().to_string(),
        status,
        criteria,
        scope_metrics: explorer_metrics(dataset),
        metrics: explorer_metrics(&rows),
        statistics: describe(&summary),
        counts: derived_counts(&rows),
        summary,
        rows,
        export_file_name: export_file_name(scope),
    }
}

/// Fetch a scope and build its explorer view.
pub async fn load_explorer_data<R: FullRepository + ?Sized>(
    repo: &R,
    scope: &Scope,
    criteria: FilterCriteria,
) -> RepositoryResult<ExplorerData> {
    let dataset = db_services::fetch_parishes(repo, scope).await?;
    Ok(build_explorer_view(scope, criteria, &dataset))
}

/// CSV download of an explorer view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerExport {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Serialize the filtered, display-ordered rows of a scope.
pub fn export_explorer_view(
    scope: &Scope,
    criteria: &FilterCriteria,
    dataset: &[ParishRecord],
) -> Result<ExplorerExport, ExportError> {
    let rows = filtered_rows(dataset, criteria);
    Ok(ExplorerExport {
        file_name: export_file_name(scope),
        content: to_delimited_text(&rows, &explorer_columns())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(parish: &str, infrastructure: u32, health_rate: f64, afro: f64) -> ParishRecord {
        ParishRecord {
            parish: parish.to_string(),
            canton: "Lago Agrio".to_string(),
            province: "Sucumbios".to_string(),
            infrastructure,
            health_rate,
            afro_percentage: afro,
            population: 1000,
            ..Default::default()
        }
    }

    fn dataset() -> Vec<ParishRecord> {
        vec![
            record("A", 1, 2.0, 0.0),
            record("B", 0, 0.0, 10.0),
            record("C", 5, 4.0, 6.0),
            record("D", 1, 1.0, 3.0),
        ]
    }

    #[test]
    fn test_rows_sorted_by_infrastructure_stable() {
        let rows = filtered_rows(&dataset(), &FilterCriteria::default());
        let names: Vec<&str> = rows.iter().map(|r| r.parish.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "D", "B"]);
    }

    #[test]
    fn test_view_metrics_cover_scope_and_filtered_rows() {
        let criteria = FilterCriteria {
            require_infrastructure: true,
            ..Default::default()
        };
        let view = build_explorer_view(&Scope::All, criteria, &dataset());

        assert_eq!(view.status, ExplorerStatus::Ok);
        assert_eq!(view.scope, "Todas");
        assert_eq!(view.scope_metrics.parish_count, 4);
        assert_eq!(view.metrics.parish_count, 3);
        assert_eq!(view.metrics.total_infrastructure, 7);
        assert_eq!(view.metrics.total_population, 3000);
        assert_eq!(view.counts.with_oil, 3);
        assert_eq!(view.counts.with_afro_above_5_pct, 1);
        assert_eq!(view.statistics.len(), 4);
        assert_eq!(view.export_file_name, "datos_Todas.csv");
    }

    #[test]
    fn test_nothing_matches_is_no_data() {
        let criteria = FilterCriteria {
            min_health_rate: 40.0,
            ..Default::default()
        };
        let view = build_explorer_view(&Scope::Province("Sucumbios".into()), criteria, &dataset());

        assert_eq!(view.status, ExplorerStatus::NoData);
        assert!(view.rows.is_empty());
        assert_eq!(view.metrics.parish_count, 0);
        assert!(view.metrics.mean_health_rate.is_none());
        assert_eq!(view.scope_metrics.parish_count, 4);
    }

    #[test]
    fn test_export_uses_display_order() {
        let export = export_explorer_view(
            &Scope::Province("Sucumbios".into()),
            &FilterCriteria::default(),
            &dataset(),
        )
        .unwrap();

        assert_eq!(export.file_name, "datos_Sucumbios.csv");
        let text = String::from_utf8(export.content).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Parroquia,"));
        assert!(lines[1].starts_with("C,"));
        assert!(lines[4].starts_with("B,"));
    }
}

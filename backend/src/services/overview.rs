//! Landing-page key metrics.
//!
//! Compares the mean health-facility rate of parishes with and without oil
//! infrastructure across the whole country.

use crate::api::OverviewData;
use crate::db::{services as db_services, FullRepository, RepositoryResult};
use crate::models::{ParishField, ParishRecord, Scope};
use crate::services::aggregation::{mean_where, percentage_delta, share_pct};

fn has_oil(record: &ParishRecord) -> bool {
    record.infrastructure > 0
}

/// Compute the key metrics over a full dataset.
pub fn compute_overview(dataset: &[ParishRecord]) -> OverviewData {
    let total_parishes = dataset.len();
    let parishes_with_oil = dataset.iter().filter(|r| has_oil(r)).count();

    let health_without_oil = mean_where(dataset, |r| !has_oil(r), ParishField::HealthRate);
    let health_with_oil = mean_where(dataset, has_oil, ParishField::HealthRate);
    let health_delta_pct = match (health_with_oil, health_without_oil) {
        (Some(with), Some(without)) => percentage_delta(with, without),
        _ => None,
    };

    OverviewData {
        total_parishes,
        parishes_with_oil,
        oil_share_pct: share_pct(parishes_with_oil, total_parishes),
        total_wells: dataset.iter().map(|r| r.wells as u64).sum(),
        total_contaminated_sites: dataset.iter().map(|r| r.contaminated_sites as u64).sum(),
        health_without_oil,
        health_with_oil,
        health_delta_pct,
    }
}

/// Load every parish and compute the key metrics.
pub async fn get_overview<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<OverviewData> {
    let parishes = db_services::fetch_parishes(repo, &Scope::All).await?;
    Ok(compute_overview(&parishes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(infrastructure: u32, health_rate: f64) -> ParishRecord {
        ParishRecord {
            infrastructure,
            wells: infrastructure,
            contaminated_sites: 1,
            health_rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_overview_empty() {
        let overview = compute_overview(&[]);
        assert_eq!(overview.total_parishes, 0);
        assert_eq!(overview.parishes_with_oil, 0);
        assert!(overview.oil_share_pct.is_none());
        assert!(overview.health_with_oil.is_none());
        assert!(overview.health_delta_pct.is_none());
    }

    #[test]
    fn test_overview_with_and_without_oil() {
        let data = vec![
            record(2, 1.0),
            record(0, 4.0),
            record(3, 3.0),
            record(0, 4.0),
        ];
        let overview = compute_overview(&data);

        assert_eq!(overview.total_parishes, 4);
        assert_eq!(overview.parishes_with_oil, 2);
        assert_eq!(overview.oil_share_pct, Some(50.0));
        assert_eq!(overview.total_wells, 5);
        assert_eq!(overview.total_contaminated_sites, 4);
        assert_eq!(overview.health_with_oil, Some(2.0));
        assert_eq!(overview.health_without_oil, Some(4.0));
        assert_eq!(overview.health_delta_pct, Some(-50.0));
    }

    #[test]
    fn test_zero_baseline_delta_is_undefined() {
        let data = vec![record(1, 2.0), record(0, 0.0)];
        let overview = compute_overview(&data);
        assert_eq!(overview.health_without_oil, Some(0.0));
        assert!(overview.health_delta_pct.is_none());
    }

    #[test]
    fn test_all_oil_has_no_comparison() {
        let data = vec![record(1, 2.0), record(4, 6.0)];
        let overview = compute_overview(&data);
        assert_eq!(overview.oil_share_pct, Some(100.0));
        assert!(overview.health_without_oil.is_none());
        assert!(overview.health_delta_pct.is_none());
    }
}

//! Property tests for the filter engine.

use paradox_dashboard::models::ParishRecord;
use paradox_dashboard::services::filters::{apply_filters, FilterCriteria};
use proptest::prelude::*;

fn parish_strategy() -> impl Strategy<Value = ParishRecord> {
    (
        "[A-Z][a-z]{2,8}",
        0u32..20,
        0.0..50.0f64,
        0.0..100.0f64,
        0u64..50_000,
    )
        .prop_map(|(parish, infrastructure, health_rate, afro_percentage, population)| {
            ParishRecord {
                parish,
                canton: "Canton".to_string(),
                province: "Provincia".to_string(),
                infrastructure,
                health_rate,
                afro_percentage,
                population,
                ..Default::default()
            }
        })
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        any::<bool>(),
        prop_oneof![Just(0.0), 0.0..100.0f64],
        prop_oneof![Just(0.0), 0.0..50.0f64],
    )
        .prop_map(|(require_infrastructure, min_group, min_health)| {
            FilterCriteria::new(require_infrastructure, min_group, min_health)
                .expect("generated thresholds are in range")
        })
}

/// True when `sub` appears in `full` in the same relative order.
fn is_subsequence(sub: &[ParishRecord], full: &[ParishRecord]) -> bool {
    let mut remaining = full.iter();
    sub.iter().all(|item| remaining.any(|candidate| candidate == item))
}

proptest! {
    #[test]
    fn prop_default_criteria_is_identity(data in prop::collection::vec(parish_strategy(), 0..40)) {
        let filtered = apply_filters(&data, &FilterCriteria::default());
        prop_assert_eq!(filtered, data);
    }

    #[test]
    fn prop_result_is_ordered_subsequence(
        data in prop::collection::vec(parish_strategy(), 0..40),
        criteria in criteria_strategy(),
    ) {
        let filtered = apply_filters(&data, &criteria);
        prop_assert!(filtered.len() <= data.len());
        prop_assert!(is_subsequence(&filtered, &data));
    }

    #[test]
    fn prop_every_kept_record_satisfies_active_predicates(
        data in prop::collection::vec(parish_strategy(), 0..40),
        criteria in criteria_strategy(),
    ) {
        for record in apply_filters(&data, &criteria) {
            if criteria.require_infrastructure {
                prop_assert!(record.infrastructure > 0);
            }
            if criteria.min_group_percentage > 0.0 {
                prop_assert!(record.afro_percentage >= criteria.min_group_percentage);
            }
            if criteria.min_health_rate > 0.0 {
                prop_assert!(record.health_rate >= criteria.min_health_rate);
            }
        }
    }

    #[test]
    fn prop_no_matching_record_is_dropped(
        data in prop::collection::vec(parish_strategy(), 0..40),
        criteria in criteria_strategy(),
    ) {
        let expected = data.iter().filter(|r| criteria.matches(r)).count();
        prop_assert_eq!(apply_filters(&data, &criteria).len(), expected);
    }

    #[test]
    fn prop_filtering_is_idempotent(
        data in prop::collection::vec(parish_strategy(), 0..40),
        criteria in criteria_strategy(),
    ) {
        let once = apply_filters(&data, &criteria);
        let twice = apply_filters(&once, &criteria);
        prop_assert_eq!(twice, once);
    }
}

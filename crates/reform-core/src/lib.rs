//! # reform-core
//!
//! Synthetic data generation for the hospital reform dashboard.
//!
//! This crate provides:
//! - The `RandomSource` trait, the single seam through which randomness enters
//! - `StdRandom` (production) and `EdgeSource` (deterministic stub) sources
//! - The `DataProvider` that turns the catalog plus randomness into records
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reform_core::{DataProvider, StdRandom};
//!
//! let mut provider = DataProvider::new(&catalog, Box::new(StdRandom::from_entropy()), today);
//! let kiel = provider.hospitals_for_region("Kiel");
//! ```

pub mod provider;
pub mod random;
pub mod traits;

pub use provider::{derive_hospital_status, min_approved, DataProvider, TREND_MONTHS};
pub use random::{EdgeSource, StdRandom};
pub use traits::RandomSource;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;

    use reform_catalog::Catalog;
    use reform_contracts::status::Status;

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn seeded(catalog: &Catalog, seed: u64) -> DataProvider<'_> {
        DataProvider::new(catalog, Box::new(StdRandom::seeded(seed)), today())
    }

    fn edge(catalog: &Catalog, source: EdgeSource) -> DataProvider<'_> {
        DataProvider::new(catalog, Box::new(source), today())
    }

    // ── Derivations ───────────────────────────────────────────────────────────

    #[test]
    fn test_min_approved_is_ceiling_of_sixty_percent() {
        assert_eq!(min_approved(8), 5);
        assert_eq!(min_approved(10), 6);
        assert_eq!(min_approved(11), 7);
        assert_eq!(min_approved(12), 8);
        assert_eq!(min_approved(15), 9);
    }

    #[test]
    fn test_derive_hospital_status_table() {
        assert_eq!(derive_hospital_status(true, 10, 10), Status::Success);
        assert_eq!(derive_hospital_status(true, 8, 10), Status::Warning);
        assert_eq!(derive_hospital_status(false, 10, 10), Status::Warning);
        assert_eq!(derive_hospital_status(false, 8, 10), Status::Critical);
    }

    // ── RandomSource helpers ──────────────────────────────────────────────────

    #[test]
    fn test_shuffled_indices_is_permutation() {
        let mut rng = StdRandom::seeded(7);
        let mut indices = rng.shuffled_indices(15);
        indices.sort_unstable();
        assert_eq!(indices, (0..15).collect::<Vec<_>>());
        assert!(rng.shuffled_indices(0).is_empty());
    }

    /// Zero weights are never drawn, and an all-zero list falls back to 0.
    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let mut rng = StdRandom::seeded(3);
        for _ in 0..500 {
            assert_eq!(rng.weighted_index(&[0, 5, 0]), 1);
        }
        assert_eq!(rng.weighted_index(&[0, 0]), 0);
        assert_eq!(rng.weighted_index(&[]), 0);
    }

    /// Seeded draws through the `rand` samplers are reproducible.
    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let mut a = StdRandom::seeded(99);
        let mut b = StdRandom::seeded(99);
        assert_eq!(a.shuffled_indices(15), b.shuffled_indices(15));
        let draws_a: Vec<usize> = (0..20).map(|_| a.weighted_index(&[50, 30, 20])).collect();
        let draws_b: Vec<usize> = (0..20).map(|_| b.weighted_index(&[50, 30, 20])).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_weighted_index_follows_weights() {
        let mut rng = StdRandom::seeded(42);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[rng.weighted_index(&[50, 30, 20])] += 1;
        }
        assert!((4_700..=5_300).contains(&counts[0]), "success: {}", counts[0]);
        assert!((2_700..=3_300).contains(&counts[1]), "warning: {}", counts[1]);
        assert!((1_700..=2_300).contains(&counts[2]), "critical: {}", counts[2]);
    }

    #[test]
    fn test_edge_source_extremes() {
        let mut low = EdgeSource::Low;
        let mut high = EdgeSource::High;
        assert!(low.chance(3, 4));
        assert!(!high.chance(3, 4));
        assert_eq!(low.weighted_index(&[50, 30, 20]), 0);
        assert_eq!(high.weighted_index(&[50, 30, 20]), 2);
        assert_eq!(low.weighted_index(&[0, 0]), 0);
    }

    // ── Regional status ───────────────────────────────────────────────────────

    #[test]
    fn test_regional_status_one_record_per_region() {
        let catalog = catalog();
        let mut provider = seeded(&catalog, 1);
        let records = provider.regional_status();

        let regions: Vec<&str> = records.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, ["Flensburg", "Kiel", "Lübeck", "Neumünster", "Rendsburg"]);
        assert_eq!(records[1].hospitals, 3);

        for r in &records {
            assert!((70..=100).contains(&r.lg_approved_pct));
            assert!((85..=100).contains(&r.quality_fulfilled_pct));
            assert!((100_000..=500_000).contains(&r.population));
            assert_ne!(r.status, Status::Pending);
        }
    }

    #[test]
    fn test_regional_status_at_edges() {
        let catalog = catalog();
        let low = edge(&catalog, EdgeSource::Low).regional_status();
        assert!(low.iter().all(|r| r.status == Status::Success));
        assert!(low.iter().all(|r| r.lg_approved_pct == 70));

        let high = edge(&catalog, EdgeSource::High).regional_status();
        assert!(high.iter().all(|r| r.status == Status::Critical));
        assert!(high.iter().all(|r| r.population == 500_000));
    }

    // ── Hospitals for region ──────────────────────────────────────────────────

    /// Selecting Kiel always lists the same three catalog hospitals.
    #[test]
    fn test_kiel_lists_three_hospitals() {
        let catalog = catalog();
        for seed in 0..20 {
            let names: Vec<String> = seeded(&catalog, seed)
                .hospitals_for_region("Kiel")
                .into_iter()
                .map(|h| h.name)
                .collect();
            assert_eq!(
                names,
                ["UKSH Campus Kiel", "Städtisches Krankenhaus Kiel", "Helios Klinik Kiel"]
            );
        }
    }

    #[test]
    fn test_hospital_summaries_respect_approval_bounds() {
        let catalog = catalog();
        for seed in 0..200 {
            let mut provider = seeded(&catalog, seed);
            for region in catalog.region_names() {
                for h in provider.hospitals_for_region(region) {
                    assert!(h.lg_approved <= h.lg_total, "{}: {:?}", h.name, h);
                    assert!(h.lg_approved >= min_approved(h.lg_total), "{}: {:?}", h.name, h);
                    assert!((8..=15).contains(&h.lg_total));
                    assert!((200..=3500).contains(&h.staff));
                    assert_eq!(h.region, region);
                }
            }
        }
    }

    #[test]
    fn test_hospital_summary_status_is_consistent() {
        let catalog = catalog();
        for seed in 0..200 {
            let mut provider = seeded(&catalog, seed);
            for region in catalog.region_names() {
                for h in provider.hospitals_for_region(region) {
                    let gap = h.lg_approved < h.lg_total;
                    match h.status {
                        Status::Critical => assert!(!h.quality_fulfilled && gap),
                        Status::Success => assert!(h.quality_fulfilled && !gap),
                        Status::Warning => assert!(!h.quality_fulfilled ^ gap),
                        Status::Pending => panic!("summary must never be pending"),
                    }
                    assert_eq!(h.warnings.len(), usize::from(gap) + usize::from(!h.quality_fulfilled));
                }
            }
        }
    }

    #[test]
    fn test_hospital_summary_at_edges() {
        let catalog = catalog();

        // Low: total 8, approved 5, quality ok → warning with one LG gap message.
        let low = edge(&catalog, EdgeSource::Low).hospitals_for_region("Lübeck");
        assert_eq!(low.len(), 3);
        assert_eq!((low[0].lg_total, low[0].lg_approved), (8, 5));
        assert_eq!(low[0].status, Status::Warning);
        assert_eq!(low[0].warnings, ["3 LG noch nicht genehmigt"]);

        // High: total 15, approved 15, quality fails → warning on staffing only.
        let high = edge(&catalog, EdgeSource::High).hospitals_for_region("Lübeck");
        assert_eq!((high[0].lg_total, high[0].lg_approved), (15, 15));
        assert!(!high[0].quality_fulfilled);
        assert_eq!(high[0].status, Status::Warning);
    }

    #[test]
    fn test_unknown_region_yields_empty_results() {
        let catalog = catalog();
        let mut provider = seeded(&catalog, 3);
        assert!(provider.hospitals_for_region("Hamburg").is_empty());
        assert!(provider.coverage_analysis("Hamburg").is_none());
    }

    // ── Hospital details ──────────────────────────────────────────────────────

    #[test]
    fn test_hospital_details_partition_is_disjoint() {
        let catalog = catalog();
        let hospitals: Vec<String> = catalog.hospitals().map(|h| h.name.clone()).collect();

        for seed in 0..100 {
            let mut provider = seeded(&catalog, seed);
            for name in &hospitals {
                let detail = provider.hospital_details(name).unwrap();
                let total = detail.lg_total();
                assert!((10..=15).contains(&total), "total {total}");

                let mut seen = HashSet::new();
                let all = detail
                    .approved
                    .iter()
                    .chain(detail.in_progress.iter().map(|p| &p.service_group))
                    .chain(detail.rejected.iter().map(|r| &r.service_group));
                for group in all {
                    assert!(catalog.has_service_group(group));
                    assert!(seen.insert(group.clone()), "{group} assigned twice");
                }
                assert_eq!(seen.len(), total);

                let approved = detail.approved.len() as u32;
                assert!(approved >= min_approved(total as u32));
                assert!(approved <= total as u32 - 2);
                assert!((1..=3).contains(&detail.in_progress.len()));
            }
        }
    }

    #[test]
    fn test_hospital_details_at_edges() {
        let catalog = catalog();

        let low = edge(&catalog, EdgeSource::Low)
            .hospital_details("Helios Klinik Kiel")
            .unwrap();
        assert_eq!(
            (low.approved.len(), low.in_progress.len(), low.rejected.len()),
            (6, 1, 3)
        );
        assert!(low.criteria.staffing_ok);
        assert_eq!(low.indicators.complication_rate, 1.5);
        assert_eq!(low.staff, 200);

        let high = edge(&catalog, EdgeSource::High)
            .hospital_details("Helios Klinik Kiel")
            .unwrap();
        assert_eq!(
            (high.approved.len(), high.in_progress.len(), high.rejected.len()),
            (13, 2, 0)
        );
        assert!(!high.criteria.staffing_ok);
        assert_eq!(high.indicators.satisfaction, 4.5);
    }

    #[test]
    fn test_hospital_details_copies_catalog_entry() {
        let catalog = catalog();
        let detail = seeded(&catalog, 9).hospital_details("UKSH Campus Kiel").unwrap();
        assert_eq!(detail.region, "Kiel");
        assert_eq!(detail.beds, 850);
        assert!(detail.in_progress.iter().all(|p| p.step == "Audit geplant"));
        assert!(detail
            .rejected
            .iter()
            .all(|r| r.reason == "Mindestmenge nicht erreichbar"));
    }

    #[test]
    fn test_unknown_hospital_returns_none() {
        let catalog = catalog();
        assert!(seeded(&catalog, 0).hospital_details("Charité Berlin").is_none());
    }

    // ── Quality ───────────────────────────────────────────────────────────────

    #[test]
    fn test_quality_metrics_bounds_and_targets() {
        let catalog = catalog();
        for seed in 0..50 {
            let m = seeded(&catalog, seed).quality_metrics("Urologie").unwrap();
            assert!((1.8..=2.8).contains(&m.complication_rate.current));
            assert!((0.8..=1.4).contains(&m.mortality_rate.current));
            assert!((4.5..=6.0).contains(&m.avg_stay.current));
            assert_eq!(m.complication_rate.target, 2.5);
            assert_eq!(m.avg_stay.tolerance, Some(1.0));
            // Mortality never exceeds its 1.5 target.
            assert!(m.mortality_rate.on_target());
            assert!(m.avg_stay.on_target());
        }

        let high = edge(&catalog, EdgeSource::High).quality_metrics("Urologie").unwrap();
        assert!(!high.complication_rate.on_target());
    }

    #[test]
    fn test_quality_trend_has_twelve_labelled_months() {
        let catalog = catalog();
        let trend = edge(&catalog, EdgeSource::Low).quality_trends("HNO").unwrap();

        assert_eq!(trend.points.len(), TREND_MONTHS);
        assert_eq!(trend.points[0].month, "Nov 2025");
        assert_eq!(trend.points[11].month, "Oct 2026");

        assert!((trend.points[0].regional - 2.6).abs() < 1e-9);
        assert!((trend.points[11].regional - 2.05).abs() < 1e-9);
        assert!(trend.points.iter().all(|p| (p.national - 2.3).abs() < 1e-9));
    }

    #[test]
    fn test_quality_trend_is_bounded() {
        let catalog = catalog();
        for seed in 0..50 {
            let trend = seeded(&catalog, seed).quality_trends("HNO").unwrap();
            for (i, p) in trend.points.iter().enumerate() {
                let centre = 2.8 - 0.05 * i as f64;
                assert!(p.regional >= 1.5);
                assert!(p.regional <= centre + 0.2 + 1e-9);
                assert!((2.3 - 1e-9..=2.5 + 1e-9).contains(&p.national));
            }
        }
    }

    #[test]
    fn test_hospital_comparison_rows() {
        let catalog = catalog();
        let rows = edge(&catalog, EdgeSource::High).hospital_comparison("Radiologie");
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].hospital, "Malteser Krankenhaus St. Franziskus-Hospital");
        assert!(rows.iter().all(|r| r.stay_duration == Status::Success));
        assert!(rows.iter().all(|r| r.complication == Status::Warning));

        let low = edge(&catalog, EdgeSource::Low).hospital_comparison("Radiologie");
        assert!(low.iter().all(|r| r.mortality == Status::Success));
    }

    #[test]
    fn test_unknown_service_group_yields_empty_results() {
        let catalog = catalog();
        let mut provider = seeded(&catalog, 5);
        assert!(provider.quality_metrics("Zahnmedizin").is_none());
        assert!(provider.quality_trends("Zahnmedizin").is_none());
        assert!(provider.hospital_comparison("Zahnmedizin").is_empty());
    }

    // ── Planning and coverage ─────────────────────────────────────────────────

    /// Grouping the timeline by quarter preserves Q4 2025 → Q1 2026 → Q1 2027.
    #[test]
    fn test_timeline_quarters_in_chronological_order() {
        let catalog = catalog();
        let events = seeded(&catalog, 0).timeline_events();
        assert_eq!(events.len(), 6);
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));

        let mut quarters: Vec<String> = Vec::new();
        for e in &events {
            let q = e.quarter();
            if quarters.last() != Some(&q) {
                quarters.push(q);
            }
        }
        assert_eq!(quarters, ["Q4 2025", "Q1 2026", "Q1 2027"]);
    }

    #[test]
    fn test_coverage_analysis_bounds() {
        let catalog = catalog();
        for seed in 0..50 {
            let c = seeded(&catalog, seed).coverage_analysis("Rendsburg").unwrap();
            assert!((150_000..=450_000).contains(&c.demographics.population));
            assert!((42..=48).contains(&c.demographics.avg_age));
            assert!((-8..=2).contains(&c.demographics.forecast_2030_pct));
            assert_eq!(c.accessibility.emergency_30min_pct, 98);
            assert_eq!(c.gaps.len(), 2);
            assert_eq!(c.outbound.len(), 3);
            assert_eq!(c.inbound.len(), 2);
        }
    }

    #[test]
    fn test_state_kpis_percentages() {
        let catalog = catalog();
        let kpis = seeded(&catalog, 0).state_kpis();
        assert_eq!(kpis.lg_approved.percentage(), 77);
        assert_eq!(kpis.quality_fulfilled.percentage(), 95);
        assert_eq!(kpis.funds_allocated.percentage(), 80);
        assert_eq!(kpis.emergency_accessible.percentage(), 98);
        assert!(kpis.bed_occupancy.in_band());
    }

    #[test]
    fn test_alerts_reference_catalog_regions() {
        let catalog = catalog();
        let alerts = seeded(&catalog, 0).critical_alerts();
        assert_eq!(alerts.len(), 3);
        assert!(alerts.iter().all(|a| catalog.region(&a.region).is_some()));
    }
}

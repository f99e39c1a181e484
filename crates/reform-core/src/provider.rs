//! The synthetic data provider.
//!
//! `DataProvider` produces every record the dashboard displays. Each
//! operation takes at most one selector (region, hospital or service-group
//! name), returns freshly generated values, and never fails: a selector that
//! is not in the catalog yields `None` or an empty list.
//!
//! Repeated calls with the same selector return different numbers. Only the
//! structural invariants hold across calls:
//!
//!   - `ceil(0.6 * total) <= approved <= total` for every service-group count
//!   - approved / in-progress / rejected groups of a hospital are disjoint
//!     and sum to the generated total
//!   - every region referenced by a record exists in the catalog

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use reform_catalog::Catalog;
use reform_contracts::{
    hospital::{
        HospitalDetail, HospitalIndicators, HospitalSummary, PendingAssignment, QualityCriteria,
        RejectedAssignment,
    },
    overview::{Alert, KpiBand, KpiProgress, RegionalStatus, StateKpis},
    planning::{
        Accessibility, CoverageAnalysis, CoverageGap, Demographics, MigrationFlow, TimelineEvent,
    },
    quality::{ComparisonRow, Indicator, QualityMetrics, QualityTrend, TrendPoint},
    reference::Hospital,
    status::{GapSeverity, Status},
};

use crate::traits::RandomSource;

/// Weights of the regional status draw: success, warning, critical.
const REGION_STATUS_WEIGHTS: [u32; 3] = [50, 30, 20];
const REGION_STATUSES: [Status; 3] = [Status::Success, Status::Warning, Status::Critical];

/// Hospitals listed in the quality comparison table.
const COMPARISON_LIMIT: usize = 8;

/// Months in the quality trend series.
pub const TREND_MONTHS: usize = 12;

const PENDING_STEP: &str = "Audit geplant";
const PENDING_DATE: &str = "20.12.2025";
const REJECTION_REASON: &str = "Mindestmenge nicht erreichbar";

/// Lowest approved count allowed for `total` applied service groups: ⌈0.6 · total⌉.
pub fn min_approved(total: u32) -> u32 {
    (total * 3 + 4) / 5
}

/// Aggregate status of a hospital.
///
/// Critical when quality criteria fail and some service groups are still
/// unapproved; warning when exactly one of the two holds; success otherwise.
pub fn derive_hospital_status(quality_ok: bool, approved: u32, total: u32) -> Status {
    let lg_gap = approved < total;
    match (quality_ok, lg_gap) {
        (false, true) => Status::Critical,
        (false, false) | (true, true) => Status::Warning,
        (true, false) => Status::Success,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Generates dashboard records from the catalog and a random source.
///
/// Construct one provider per render (or per process; it holds no state
/// besides the random source) and call the operations the page needs.
pub struct DataProvider<'a> {
    catalog: &'a Catalog,
    rng: Box<dyn RandomSource + 'a>,
    /// Reference date for month labels.
    today: NaiveDate,
}

impl<'a> DataProvider<'a> {
    pub fn new(catalog: &'a Catalog, rng: Box<dyn RandomSource + 'a>, today: NaiveDate) -> Self {
        Self {
            catalog,
            rng,
            today,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // ── Overview ──────────────────────────────────────────────────────────────

    /// State-level KPI set. The reporting figures are fixed program values.
    pub fn state_kpis(&self) -> StateKpis {
        StateKpis {
            lg_approved: KpiProgress {
                current: 47,
                total: 61,
                target: 100,
                trend: "+3pp".to_string(),
            },
            quality_fulfilled: KpiProgress {
                current: 156,
                total: 164,
                target: 95,
                trend: "→ stabil".to_string(),
            },
            funds_allocated: KpiProgress {
                current: 48,
                total: 60,
                target: 100,
                trend: "+5pp".to_string(),
            },
            emergency_accessible: KpiProgress {
                current: 98,
                total: 100,
                target: 100,
                trend: "→ stabil".to_string(),
            },
            bed_occupancy: KpiBand {
                current: 78,
                target_min: 75,
                target_max: 85,
                trend: "+2pp".to_string(),
            },
        }
    }

    /// One status record per region, in catalog order.
    pub fn regional_status(&mut self) -> Vec<RegionalStatus> {
        let catalog = self.catalog;
        let records: Vec<RegionalStatus> = catalog
            .regions()
            .iter()
            .map(|region| {
                let status = REGION_STATUSES[self.rng.weighted_index(&REGION_STATUS_WEIGHTS)];
                RegionalStatus {
                    region: region.name.clone(),
                    status,
                    hospitals: catalog.hospitals_in(&region.name).count(),
                    lg_approved_pct: self.rng.u32_in(70, 100),
                    quality_fulfilled_pct: self.rng.u32_in(85, 100),
                    population: self.rng.u32_in(100_000, 500_000),
                }
            })
            .collect();
        debug!(regions = records.len(), "generated regional status");
        records
    }

    /// Open items. Static scenario content from the catalog.
    pub fn critical_alerts(&self) -> Vec<Alert> {
        self.catalog.alerts().to_vec()
    }

    // ── Regional ──────────────────────────────────────────────────────────────

    /// Summaries of every catalog hospital in `region`. Empty for an unknown region.
    pub fn hospitals_for_region(&mut self, region: &str) -> Vec<HospitalSummary> {
        let catalog = self.catalog;
        if catalog.region(region).is_none() {
            warn!(region = %region, "hospital list requested for unknown region");
            return Vec::new();
        }
        let summaries: Vec<HospitalSummary> = catalog
            .hospitals_in(region)
            .map(|hospital| self.summarize(hospital))
            .collect();
        debug!(region = %region, hospitals = summaries.len(), "generated hospital summaries");
        summaries
    }

    fn summarize(&mut self, hospital: &Hospital) -> HospitalSummary {
        let lg_total = self.rng.u32_in(8, 15);
        let lg_approved = self.rng.u32_in(min_approved(lg_total), lg_total);
        let quality_fulfilled = self.rng.chance(3, 4);
        let status = derive_hospital_status(quality_fulfilled, lg_approved, lg_total);

        let mut warnings = Vec::new();
        if lg_approved < lg_total {
            warnings.push(format!("{} LG noch nicht genehmigt", lg_total - lg_approved));
        }
        if !quality_fulfilled {
            warnings.push("Personalausstattung nicht ausreichend".to_string());
        }

        HospitalSummary {
            name: hospital.name.clone(),
            care_level: hospital.care_level,
            beds: hospital.beds,
            region: hospital.region.clone(),
            staff: self.rng.u32_in(200, 3500),
            lg_total,
            lg_approved,
            quality_fulfilled,
            status,
            warnings,
        }
    }

    /// Coverage analysis for `region`. `None` for an unknown region.
    ///
    /// Gaps, patient flows and accessibility are fixed survey results; only
    /// the demographic projection is sampled.
    pub fn coverage_analysis(&mut self, region: &str) -> Option<CoverageAnalysis> {
        if self.catalog.region(region).is_none() {
            warn!(region = %region, "coverage analysis requested for unknown region");
            return None;
        }

        let flow = |counterpart: &str, percent: u32| MigrationFlow {
            counterpart: counterpart.to_string(),
            percent,
        };

        Some(CoverageAnalysis {
            region: region.to_string(),
            demographics: Demographics {
                population: self.rng.u32_in(150_000, 450_000),
                avg_age: self.rng.u32_in(42, 48),
                forecast_2030_pct: self.rng.i32_in(-8, 2),
            },
            accessibility: Accessibility {
                emergency_30min_pct: 98,
                specialized_60min_pct: 95,
            },
            gaps: vec![
                CoverageGap {
                    service_group: "Neurochirurgie".to_string(),
                    severity: GapSeverity::Missing,
                },
                CoverageGap {
                    service_group: "Gefäßchirurgie".to_string(),
                    severity: GapSeverity::UnderCapacity,
                },
            ],
            outbound: vec![flow("Bremen", 12), flow("Hamburg", 8), flow("Niedersachsen", 5)],
            inbound: vec![flow("Hamburg", 3), flow("Mecklenburg-Vorpommern", 2)],
        })
    }

    // ── Locations ─────────────────────────────────────────────────────────────

    /// Full profile of the named hospital. `None` if it is not in the catalog.
    pub fn hospital_details(&mut self, name: &str) -> Option<HospitalDetail> {
        let catalog = self.catalog;
        let Some(hospital) = catalog.hospital(name) else {
            warn!(hospital = %name, "details requested for unknown hospital");
            return None;
        };

        let total = self.rng.u32_in(10, 15);
        // Upper bound total - 2 leaves room for at least one in-progress group.
        let approved = self.rng.u32_in(min_approved(total), total - 2);
        let in_progress = self.rng.u32_in(1, (total - approved).min(3));
        let rejected = total - approved - in_progress;

        let groups = catalog.service_groups();
        let mut draw = self
            .rng
            .shuffled_indices(groups.len())
            .into_iter()
            .map(|i| groups[i].clone());

        let approved_groups: Vec<String> = draw.by_ref().take(approved as usize).collect();
        let pending_groups: Vec<PendingAssignment> = draw
            .by_ref()
            .take(in_progress as usize)
            .map(|service_group| PendingAssignment {
                service_group,
                step: PENDING_STEP.to_string(),
                date: PENDING_DATE.to_string(),
            })
            .collect();
        let rejected_groups: Vec<RejectedAssignment> = draw
            .take(rejected as usize)
            .map(|service_group| RejectedAssignment {
                service_group,
                reason: REJECTION_REASON.to_string(),
            })
            .collect();

        debug!(
            hospital = %name,
            total,
            approved,
            in_progress,
            rejected,
            "generated hospital details"
        );

        Some(HospitalDetail {
            name: hospital.name.clone(),
            region: hospital.region.clone(),
            care_level: hospital.care_level,
            beds: hospital.beds,
            staff: self.rng.u32_in(200, 3500),
            approved: approved_groups,
            in_progress: pending_groups,
            rejected: rejected_groups,
            criteria: QualityCriteria {
                staffing_ok: self.rng.chance(1, 2),
                equipment_ok: true,
                related_groups_ok: true,
            },
            indicators: HospitalIndicators {
                complication_rate: round1(self.rng.f64_in(1.5, 3.5)),
                mortality_rate: round1(self.rng.f64_in(0.8, 1.8)),
                satisfaction: round1(self.rng.f64_in(3.2, 4.5)),
            },
        })
    }

    // ── Quality ───────────────────────────────────────────────────────────────

    /// Headline indicators for `service_group`. `None` for an unknown group.
    pub fn quality_metrics(&mut self, service_group: &str) -> Option<QualityMetrics> {
        if !self.catalog.has_service_group(service_group) {
            warn!(service_group = %service_group, "quality metrics requested for unknown group");
            return None;
        }
        Some(QualityMetrics {
            service_group: service_group.to_string(),
            complication_rate: Indicator {
                current: round1(self.rng.f64_in(1.8, 2.8)),
                target: 2.5,
                tolerance: None,
            },
            mortality_rate: Indicator {
                current: round1(self.rng.f64_in(0.8, 1.4)),
                target: 1.5,
                tolerance: None,
            },
            avg_stay: Indicator {
                current: round1(self.rng.f64_in(4.5, 6.0)),
                target: 5.0,
                tolerance: Some(1.0),
            },
        })
    }

    /// Twelve monthly complication-rate samples ending this month, oldest first.
    ///
    /// The regional series improves by 0.05 points per month from 2.8 and never
    /// drops below 1.5; the national baseline hovers around 2.4.
    pub fn quality_trends(&mut self, service_group: &str) -> Option<QualityTrend> {
        if !self.catalog.has_service_group(service_group) {
            warn!(service_group = %service_group, "trend requested for unknown group");
            return None;
        }

        let mut points = Vec::with_capacity(TREND_MONTHS);
        for i in 0..TREND_MONTHS {
            let months_back = (TREND_MONTHS - 1 - i) as u64;
            let date = self
                .today
                .checked_sub_days(Days::new(30 * months_back))
                .unwrap_or(self.today);
            let regional = (2.8 - 0.05 * i as f64 + self.rng.f64_in(-0.2, 0.2)).max(1.5);
            let national = 2.4 + self.rng.f64_in(-0.1, 0.1);
            points.push(TrendPoint {
                month: date.format("%b %Y").to_string(),
                regional,
                national,
            });
        }

        Some(QualityTrend {
            service_group: service_group.to_string(),
            points,
        })
    }

    /// Ratings of the first eight catalog hospitals for `service_group`.
    pub fn hospital_comparison(&mut self, service_group: &str) -> Vec<ComparisonRow> {
        let catalog = self.catalog;
        if !catalog.has_service_group(service_group) {
            warn!(service_group = %service_group, "comparison requested for unknown group");
            return Vec::new();
        }
        catalog
            .hospitals()
            .take(COMPARISON_LIMIT)
            .map(|hospital| ComparisonRow {
                hospital: hospital.name.clone(),
                complication: self.biased_rating(),
                mortality: self.biased_rating(),
                satisfaction: self.biased_rating(),
                stay_duration: Status::Success,
            })
            .collect()
    }

    /// Success two times out of three, warning otherwise.
    fn biased_rating(&mut self) -> Status {
        if self.rng.chance(2, 3) {
            Status::Success
        } else {
            Status::Warning
        }
    }

    // ── Planning ──────────────────────────────────────────────────────────────

    /// Program milestones in chronological order.
    ///
    /// Sorting is stable, so grouping the result by quarter keeps both the
    /// quarters and the events inside each quarter in date order.
    pub fn timeline_events(&self) -> Vec<TimelineEvent> {
        let mut events = self.catalog.milestones().to_vec();
        events.sort_by_key(|e| e.date);
        events
    }
}

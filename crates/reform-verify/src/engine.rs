//! Record verifier for generated dashboard data.
//!
//! `RecordVerifier` checks provider output in two phases:
//!
//! 1. **Structural**: the record is serialized and validated against its
//!    JSON Schema (see [`crate::schemas`]) with the `jsonschema` crate.
//! 2. **Semantic**: cross-field and cross-table rules that a schema cannot
//!    express, such as disjoint service-group sets or region references.
//!
//! Failures are accumulated, never short-circuited, so one report shows
//! every broken rule of a run.

use std::collections::{HashMap, HashSet};

use jsonschema::Validator;
use serde::Serialize;
use tracing::{debug, warn};

use reform_catalog::Catalog;
use reform_contracts::{
    error::{ReformError, ReformResult},
    hospital::{HospitalDetail, HospitalSummary},
    overview::{Alert, RegionalStatus},
    planning::{CoverageAnalysis, TimelineEvent},
    quality::{ComparisonRow, QualityMetrics, QualityTrend},
    verify::{VerificationFailure, VerificationReport},
};
use reform_core::{derive_hospital_status, min_approved, DataProvider, TREND_MONTHS};

use crate::schemas;

/// Upper bound on rows in the hospital comparison table.
const COMPARISON_MAX_ROWS: usize = 8;

/// Verifies provider output against the catalog it was generated from.
pub struct RecordVerifier<'a> {
    catalog: &'a Catalog,
    validators: HashMap<&'static str, Validator>,
}

impl<'a> RecordVerifier<'a> {
    /// Compile every record schema. Fails only if a schema document is invalid.
    pub fn new(catalog: &'a Catalog) -> ReformResult<Self> {
        let mut validators = HashMap::new();
        for (schema_id, document) in schemas::all() {
            let validator =
                jsonschema::validator_for(&document).map_err(|e| ReformError::SchemaValidation {
                    reason: format!("schema '{schema_id}' does not compile: {e}"),
                })?;
            validators.insert(schema_id, validator);
        }
        debug!(schemas = validators.len(), "record verifier ready");
        Ok(Self {
            catalog,
            validators,
        })
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn fail(rule_id: &str, subject: &str, message: String) -> VerificationFailure {
        warn!(rule_id, subject, %message, "record check failed");
        VerificationFailure {
            rule_id: rule_id.to_string(),
            subject: subject.to_string(),
            message,
        }
    }

    /// Phase 1 for a single record.
    fn structural<T: Serialize>(
        &self,
        schema_id: &str,
        subject: &str,
        record: &T,
        failures: &mut Vec<VerificationFailure>,
    ) {
        let Some(validator) = self.validators.get(schema_id) else {
            failures.push(Self::fail(
                "json-schema",
                subject,
                format!("no schema registered under '{schema_id}'"),
            ));
            return;
        };
        let instance = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(e) => {
                failures.push(Self::fail(
                    "json-schema",
                    subject,
                    format!("record does not serialize: {e}"),
                ));
                return;
            }
        };
        for error in validator.iter_errors(&instance) {
            failures.push(Self::fail(
                "json-schema",
                subject,
                format!("JSON Schema violation at {}: {}", error.instance_path, error),
            ));
        }
    }

    fn check_region_ref(&self, region: &str, subject: &str, failures: &mut Vec<VerificationFailure>) {
        if self.catalog.region(region).is_none() {
            failures.push(Self::fail(
                "region-exists",
                subject,
                format!("references unknown region '{region}'"),
            ));
        }
    }

    fn check_service_group_ref(
        &self,
        group: &str,
        subject: &str,
        failures: &mut Vec<VerificationFailure>,
    ) {
        if !self.catalog.has_service_group(group) {
            failures.push(Self::fail(
                "catalog-membership",
                subject,
                format!("service group '{group}' is not in the catalog"),
            ));
        }
    }

    // ── Overview ──────────────────────────────────────────────────────────────

    /// Every catalog region must appear exactly once, with its catalog
    /// hospital count.
    pub fn check_regional_status(&self, records: &[RegionalStatus]) -> VerificationReport {
        let mut failures = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            self.structural(schemas::REGIONAL_STATUS, &record.region, record, &mut failures);
            self.check_region_ref(&record.region, &record.region, &mut failures);
            if !seen.insert(record.region.as_str()) {
                failures.push(Self::fail(
                    "region-coverage",
                    &record.region,
                    "region listed more than once".to_string(),
                ));
            }
            let expected = self.catalog.hospitals_in(&record.region).count();
            if record.hospitals != expected {
                failures.push(Self::fail(
                    "region-hospital-count",
                    &record.region,
                    format!("reports {} hospitals, catalog has {expected}", record.hospitals),
                ));
            }
        }

        for region in self.catalog.region_names() {
            if !seen.contains(region) {
                failures.push(Self::fail(
                    "region-coverage",
                    region,
                    "region missing from status list".to_string(),
                ));
            }
        }

        VerificationReport {
            checked: records.len(),
            failures,
        }
    }

    pub fn check_alerts(&self, alerts: &[Alert]) -> VerificationReport {
        let mut failures = Vec::new();
        for alert in alerts {
            self.check_region_ref(&alert.region, &alert.issue, &mut failures);
            if let Some(hospital) = &alert.hospital {
                let in_region = self
                    .catalog
                    .hospital(hospital)
                    .is_some_and(|h| h.region == alert.region);
                if !in_region {
                    failures.push(Self::fail(
                        "hospital-in-region",
                        hospital,
                        format!("alert '{}' places hospital outside region '{}'", alert.issue, alert.region),
                    ));
                }
            }
        }
        VerificationReport {
            checked: alerts.len(),
            failures,
        }
    }

    // ── Regional ──────────────────────────────────────────────────────────────

    /// Summaries must list exactly the catalog hospitals of `region`, in
    /// catalog order, with consistent counts and status.
    pub fn check_hospital_summaries(
        &self,
        region: &str,
        summaries: &[HospitalSummary],
    ) -> VerificationReport {
        let mut failures = Vec::new();

        let expected: Vec<&str> = self
            .catalog
            .hospitals_in(region)
            .map(|h| h.name.as_str())
            .collect();
        let actual: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        if expected != actual {
            failures.push(Self::fail(
                "hospital-in-region",
                region,
                format!("expected hospitals {expected:?}, got {actual:?}"),
            ));
        }

        for summary in summaries {
            let subject = summary.name.as_str();
            self.structural(schemas::HOSPITAL_SUMMARY, subject, summary, &mut failures);
            self.check_region_ref(&summary.region, subject, &mut failures);

            let floor = min_approved(summary.lg_total);
            if summary.lg_approved < floor || summary.lg_approved > summary.lg_total {
                failures.push(Self::fail(
                    "lg-bounds",
                    subject,
                    format!(
                        "approved {} outside [{floor}, {}]",
                        summary.lg_approved, summary.lg_total
                    ),
                ));
            }

            let derived = derive_hospital_status(
                summary.quality_fulfilled,
                summary.lg_approved,
                summary.lg_total,
            );
            if summary.status != derived {
                failures.push(Self::fail(
                    "status-derivation",
                    subject,
                    format!(
                        "status '{}' but criteria imply '{}'",
                        summary.status.as_str(),
                        derived.as_str()
                    ),
                ));
            }

            let expected_warnings = usize::from(summary.lg_approved < summary.lg_total)
                + usize::from(!summary.quality_fulfilled);
            if summary.warnings.len() != expected_warnings {
                failures.push(Self::fail(
                    "warnings-consistent",
                    subject,
                    format!(
                        "{} warnings, expected {expected_warnings}",
                        summary.warnings.len()
                    ),
                ));
            }
        }

        VerificationReport {
            checked: summaries.len(),
            failures,
        }
    }

    pub fn check_coverage(&self, analysis: &CoverageAnalysis) -> VerificationReport {
        let mut failures = Vec::new();
        self.structural(schemas::COVERAGE, &analysis.region, analysis, &mut failures);
        self.check_region_ref(&analysis.region, &analysis.region, &mut failures);
        VerificationReport {
            checked: 1,
            failures,
        }
    }

    // ── Locations ─────────────────────────────────────────────────────────────

    /// The approved, in-progress and rejected groups must be disjoint catalog
    /// members whose counts respect the approval floor.
    pub fn check_hospital_detail(&self, detail: &HospitalDetail) -> VerificationReport {
        let mut failures = Vec::new();
        let subject = detail.name.as_str();

        self.structural(schemas::HOSPITAL_DETAIL, subject, detail, &mut failures);

        match self.catalog.hospital(&detail.name) {
            Some(hospital) if hospital.region != detail.region => failures.push(Self::fail(
                "hospital-in-region",
                subject,
                format!(
                    "detail names region '{}', catalog has '{}'",
                    detail.region, hospital.region
                ),
            )),
            Some(_) => {}
            None => failures.push(Self::fail(
                "hospital-exists",
                subject,
                "hospital is not in the catalog".to_string(),
            )),
        }

        let groups = detail
            .approved
            .iter()
            .chain(detail.in_progress.iter().map(|p| &p.service_group))
            .chain(detail.rejected.iter().map(|r| &r.service_group));
        let mut seen = HashSet::new();
        for group in groups {
            self.check_service_group_ref(group, subject, &mut failures);
            if !seen.insert(group.as_str()) {
                failures.push(Self::fail(
                    "lg-disjoint",
                    subject,
                    format!("service group '{group}' appears in more than one list"),
                ));
            }
        }

        let total = detail.lg_total();
        if !(10..=15).contains(&total) {
            failures.push(Self::fail(
                "lg-total-range",
                subject,
                format!("{total} service groups applied for, expected 10 to 15"),
            ));
        }
        // Counts are at most 15, the cast is lossless.
        let floor = min_approved(total as u32) as usize;
        if detail.approved.len() < floor {
            failures.push(Self::fail(
                "lg-bounds",
                subject,
                format!("{} approved, at least {floor} required", detail.approved.len()),
            ));
        }

        VerificationReport {
            checked: 1,
            failures,
        }
    }

    // ── Quality ───────────────────────────────────────────────────────────────

    pub fn check_quality(
        &self,
        metrics: &QualityMetrics,
        trend: &QualityTrend,
        comparison: &[ComparisonRow],
    ) -> VerificationReport {
        let mut failures = Vec::new();
        let subject = metrics.service_group.as_str();

        self.structural(schemas::QUALITY_METRICS, subject, metrics, &mut failures);
        self.structural(schemas::QUALITY_TREND, subject, trend, &mut failures);
        self.check_service_group_ref(subject, subject, &mut failures);

        if trend.points.len() != TREND_MONTHS {
            failures.push(Self::fail(
                "trend-length",
                subject,
                format!("{} trend points, expected {TREND_MONTHS}", trend.points.len()),
            ));
        }

        if comparison.len() > COMPARISON_MAX_ROWS {
            failures.push(Self::fail(
                "comparison-limit",
                subject,
                format!("{} comparison rows, at most {COMPARISON_MAX_ROWS}", comparison.len()),
            ));
        }
        for row in comparison {
            if self.catalog.hospital(&row.hospital).is_none() {
                failures.push(Self::fail(
                    "hospital-exists",
                    &row.hospital,
                    "comparison row names a hospital outside the catalog".to_string(),
                ));
            }
        }

        VerificationReport {
            checked: 2 + comparison.len(),
            failures,
        }
    }

    // ── Planning ──────────────────────────────────────────────────────────────

    pub fn check_timeline(&self, events: &[TimelineEvent]) -> VerificationReport {
        let mut failures = Vec::new();
        for pair in events.windows(2) {
            if pair[1].date < pair[0].date {
                failures.push(Self::fail(
                    "timeline-order",
                    &pair[1].title,
                    format!("dated {} but follows an event dated {}", pair[1].date, pair[0].date),
                ));
            }
        }
        VerificationReport {
            checked: events.len(),
            failures,
        }
    }

    // ── Full round ────────────────────────────────────────────────────────────

    /// Draw every record the dashboard can show once and check all of them.
    ///
    /// A known selector for which the provider returns nothing is itself a
    /// failure (`missing-record`).
    pub fn verify_round(&self, provider: &mut DataProvider<'_>) -> VerificationReport {
        let catalog = provider.catalog();
        let mut report = VerificationReport::default();

        report.merge(self.check_regional_status(&provider.regional_status()));
        report.merge(self.check_alerts(&provider.critical_alerts()));

        for region in catalog.region_names() {
            report.merge(self.check_hospital_summaries(region, &provider.hospitals_for_region(region)));
            match provider.coverage_analysis(region) {
                Some(analysis) => report.merge(self.check_coverage(&analysis)),
                None => report.merge(missing("coverage analysis", region)),
            }
        }

        for hospital in catalog.hospitals() {
            match provider.hospital_details(&hospital.name) {
                Some(detail) => report.merge(self.check_hospital_detail(&detail)),
                None => report.merge(missing("hospital detail", &hospital.name)),
            }
        }

        for group in catalog.service_groups() {
            let metrics = provider.quality_metrics(group);
            let trend = provider.quality_trends(group);
            let comparison = provider.hospital_comparison(group);
            match (metrics, trend) {
                (Some(metrics), Some(trend)) => {
                    report.merge(self.check_quality(&metrics, &trend, &comparison))
                }
                _ => report.merge(missing("quality record", group)),
            }
        }

        report.merge(self.check_timeline(&provider.timeline_events()));

        debug!(
            checked = report.checked,
            failure_count = report.failures.len(),
            "verification round complete"
        );
        report
    }
}

fn missing(what: &str, subject: &str) -> VerificationReport {
    VerificationReport {
        checked: 1,
        failures: vec![RecordVerifier::fail(
            "missing-record",
            subject,
            format!("provider returned no {what} for a catalog selector"),
        )],
    }
}

//! Per-hospital records for the regional and locations pages.

use serde::{Deserialize, Serialize};

use crate::{overview::percent_of, reference::CareLevel, status::Status};

/// Condensed view of a hospital within its region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalSummary {
    pub name: String,
    pub care_level: CareLevel,
    pub beds: u32,
    pub region: String,
    pub staff: u32,
    /// Service groups applied for.
    pub lg_total: u32,
    /// Service groups approved; never exceeds `lg_total`.
    pub lg_approved: u32,
    pub quality_fulfilled: bool,
    pub status: Status,
    pub warnings: Vec<String>,
}

impl HospitalSummary {
    pub fn lg_percentage(&self) -> u32 {
        percent_of(self.lg_approved, self.lg_total)
    }
}

/// A service group whose application is still being processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAssignment {
    pub service_group: String,
    /// Current processing step, e.g. "Audit geplant".
    pub step: String,
    /// Date of the next step, already formatted for display.
    pub date: String,
}

/// A service group whose application was turned down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedAssignment {
    pub service_group: String,
    pub reason: String,
}

/// Structural quality criteria (Qualitätskriterien).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCriteria {
    pub staffing_ok: bool,
    pub equipment_ok: bool,
    pub related_groups_ok: bool,
}

/// Outcome indicators over the last six months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalIndicators {
    /// Percent.
    pub complication_rate: f64,
    /// 30-day mortality, percent.
    pub mortality_rate: f64,
    /// Patient satisfaction on a 1–5 scale.
    pub satisfaction: f64,
}

/// Full profile of one hospital.
///
/// `approved`, `in_progress` and `rejected` are pairwise disjoint subsets of
/// the service-group catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalDetail {
    pub name: String,
    pub region: String,
    pub care_level: CareLevel,
    pub beds: u32,
    pub staff: u32,
    pub approved: Vec<String>,
    pub in_progress: Vec<PendingAssignment>,
    pub rejected: Vec<RejectedAssignment>,
    pub criteria: QualityCriteria,
    pub indicators: HospitalIndicators,
}

impl HospitalDetail {
    /// Total number of service groups applied for.
    pub fn lg_total(&self) -> usize {
        self.approved.len() + self.in_progress.len() + self.rejected.len()
    }
}

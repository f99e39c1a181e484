//! State-level records shown on the overview page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::{AlertPriority, Status};

/// A KPI measured as progress of `current` towards `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiProgress {
    pub current: u32,
    pub total: u32,
    /// Target percentage.
    pub target: u32,
    /// Short trend label, e.g. "+3pp" or "→ stabil".
    pub trend: String,
}

impl KpiProgress {
    /// Integer percentage of `current / total`, truncated. Zero when `total` is zero.
    pub fn percentage(&self) -> u32 {
        percent_of(self.current, self.total)
    }
}

/// A KPI that should stay inside a target band rather than reach a total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiBand {
    pub current: u32,
    pub target_min: u32,
    pub target_max: u32,
    pub trend: String,
}

impl KpiBand {
    pub fn in_band(&self) -> bool {
        (self.target_min..=self.target_max).contains(&self.current)
    }
}

/// The five state-level KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateKpis {
    /// Service-group (Leistungsgruppe) assignments approved.
    pub lg_approved: KpiProgress,
    pub quality_fulfilled: KpiProgress,
    /// Transformation fund allocation, in million euro.
    pub funds_allocated: KpiProgress,
    pub emergency_accessible: KpiProgress,
    /// Average bed occupancy in percent.
    pub bed_occupancy: KpiBand,
}

/// Derived status of one region for the overview map and table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalStatus {
    pub region: String,
    pub status: Status,
    /// Number of catalog hospitals in the region.
    pub hospitals: usize,
    pub lg_approved_pct: u32,
    pub quality_fulfilled_pct: u32,
    pub population: u32,
}

/// An open item requiring attention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub priority: AlertPriority,
    pub region: String,
    /// Set when the item concerns a single hospital rather than the whole region.
    #[serde(default)]
    pub hospital: Option<String>,
    pub issue: String,
    pub deadline: NaiveDate,
    /// Category label, e.g. "Personal" or "Mindestmenge".
    pub category: String,
}

/// Integer percentage `part * 100 / whole`, truncated; zero for an empty whole.
///
/// `part` is clamped to `whole`, so the result never exceeds 100.
pub fn percent_of(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let pct = u64::from(part.min(whole)) * 100 / u64::from(whole);
    u32::try_from(pct).unwrap_or(100)
}

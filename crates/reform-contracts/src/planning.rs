//! Program timeline and regional coverage records.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::status::{GapSeverity, MilestoneStatus};

/// A milestone on the reform timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub status: MilestoneStatus,
    pub title: String,
    pub description: String,
}

impl TimelineEvent {
    /// Grouping key, e.g. "Q4 2025".
    pub fn quarter(&self) -> String {
        quarter_label(self.date)
    }
}

/// Calendar quarter label for `date`.
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{} {}", (date.month0() / 3) + 1, date.year())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub population: u32,
    pub avg_age: u32,
    /// Projected population change until 2030, percent.
    pub forecast_2030_pct: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessibility {
    /// Share of population reaching emergency care within 30 minutes.
    pub emergency_30min_pct: u32,
    /// Share reaching specialised care within 60 minutes.
    pub specialized_60min_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    pub service_group: String,
    pub severity: GapSeverity,
}

/// Share of patients crossing the region boundary towards or from `counterpart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationFlow {
    pub counterpart: String,
    pub percent: u32,
}

/// Coverage analysis (Versorgungsanalyse) for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageAnalysis {
    pub region: String,
    pub demographics: Demographics,
    pub accessibility: Accessibility,
    pub gaps: Vec<CoverageGap>,
    pub outbound: Vec<MigrationFlow>,
    pub inbound: Vec<MigrationFlow>,
}

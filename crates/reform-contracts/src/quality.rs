//! Clinical quality records for one service group.

use serde::{Deserialize, Serialize};

use crate::status::Status;

/// A measured indicator compared against its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub current: f64,
    pub target: f64,
    /// When set, the indicator is on target within `target ± tolerance`;
    /// otherwise it is on target at or below `target`.
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl Indicator {
    pub fn on_target(&self) -> bool {
        match self.tolerance {
            Some(tol) => (self.current - self.target).abs() <= tol,
            None => self.current <= self.target,
        }
    }
}

/// Headline indicators for a service group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub service_group: String,
    pub complication_rate: Indicator,
    pub mortality_rate: Indicator,
    /// Average length of stay in days.
    pub avg_stay: Indicator,
}

/// One month of the complication-rate trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Month label, e.g. "Mar 2026".
    pub month: String,
    /// Regional (Schleswig-Holstein) value.
    pub regional: f64,
    /// National baseline.
    pub national: f64,
}

/// Monthly samples, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityTrend {
    pub service_group: String,
    pub points: Vec<TrendPoint>,
}

/// Per-hospital ratings for one service group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub hospital: String,
    pub complication: Status,
    pub mortality: Status,
    pub satisfaction: Status,
    pub stay_duration: Status,
}

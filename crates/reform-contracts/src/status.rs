//! Enumerated status values shared by records and directives.

use serde::{Deserialize, Serialize};

/// Traffic-light classification used across the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
    Critical,
    Pending,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Warning => "warning",
            Status::Critical => "critical",
            Status::Pending => "pending",
        }
    }
}

/// Priority of an open item on the overview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Critical,
    Warning,
}

/// Lifecycle state of a program milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Completed,
    InProgress,
    Upcoming,
    Planned,
    Goal,
}

/// How badly a service group is missing from a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    Missing,
    UnderCapacity,
}

//! Verification report types for generated records.
//!
//! The record verifier runs every generated structure through structural and
//! semantic checks. A report collects all failures of a run rather than
//! stopping at the first one.

use serde::{Deserialize, Serialize};

/// The result of verifying one or more generated records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Number of records inspected.
    pub checked: usize,
    /// All failures collected during this run. Empty on pass.
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fold `other` into this report.
    pub fn merge(&mut self, other: VerificationReport) {
        self.checked += other.checked;
        self.failures.extend(other.failures);
    }
}

/// A single rule failure within a `VerificationReport`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Identifier of the rule that failed, e.g. "lg-disjoint".
    pub rule_id: String,
    /// The record the failure concerns (hospital, region, service group).
    pub subject: String,
    pub message: String,
}

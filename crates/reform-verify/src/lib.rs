//! # reform-verify
//!
//! Structural and semantic checks over records produced by
//! `reform_core::DataProvider`.
//!
//! `RecordVerifier` validates each record against an embedded JSON Schema,
//! then applies cross-record rules: disjoint service-group sets, the 60 %
//! approval floor, status derivation, region and hospital references,
//! chronological timelines and trend length. `verify_round` draws every
//! record once and returns a single merged report.

pub mod engine;
pub mod schemas;

pub use engine::RecordVerifier;

// ── Tests ─────────────────────────────────────────────────────────────────────

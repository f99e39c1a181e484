//! # reform-catalog
//!
//! Static reference tables for the hospital reform dashboard, loaded from
//! TOML.
//!
//! ## Overview
//!
//! [`Catalog`] holds the region table, the hospital catalog, the
//! service-group (Leistungsgruppe) catalog, and the static scenario content
//! (open items and program milestones). It is constructed once at startup and
//! shared read-only afterwards.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use reform_catalog::Catalog;
//!
//! let catalog = Catalog::builtin()?;
//! let custom = Catalog::from_file(Path::new("catalog/bayern.toml"))?;
//! ```

pub mod catalog;
pub mod tables;

pub use catalog::{Catalog, MIN_SERVICE_GROUPS};
pub use tables::CatalogConfig;

// ── Tests ─────────────────────────────────────────────────────────────────────

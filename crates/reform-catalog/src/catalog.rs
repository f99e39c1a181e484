//! The loaded, validated reference catalog.
//!
//! `Catalog` wraps a `CatalogConfig` after checking referential integrity.
//! Once constructed it is read-only; every provider and page composer borrows
//! the same instance for the lifetime of the process.
//!
//! Validation rules:
//!
//! 1. Region, hospital and service-group names are unique and non-empty.
//! 2. Every hospital belongs to a known region.
//! 3. At least `MIN_SERVICE_GROUPS` service groups exist, so a hospital
//!    profile can always draw its full set of assignments without replacement.
//! 4. Every alert names a known region, and its hospital (if any) lies in
//!    that region.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use reform_contracts::{
    error::{ReformError, ReformResult},
    overview::Alert,
    planning::TimelineEvent,
    reference::{Hospital, Region},
};

use crate::tables::CatalogConfig;

/// Embedded default catalog for Schleswig-Holstein.
const BUILTIN_CATALOG: &str = include_str!("../catalog/schleswig-holstein.toml");

/// Lower bound on the service-group table size.
pub const MIN_SERVICE_GROUPS: usize = 15;

/// Immutable reference tables.
///
/// ```rust,ignore
/// use reform_catalog::Catalog;
///
/// let catalog = Catalog::builtin()?;
/// let kiel: Vec<_> = catalog.hospitals_in("Kiel").collect();
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    config: CatalogConfig,
}

impl Catalog {
    /// Parse the embedded Schleswig-Holstein catalog.
    pub fn builtin() -> ReformResult<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse `s` as TOML and build a validated `Catalog`.
    ///
    /// Returns `ReformError::ConfigError` if the TOML is malformed, or
    /// `ReformError::CatalogInvariant` if the tables are inconsistent.
    pub fn from_toml_str(s: &str) -> ReformResult<Self> {
        let config: CatalogConfig = toml::from_str(s).map_err(|e| ReformError::ConfigError {
            reason: format!("failed to parse catalog TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a catalog.
    pub fn from_file(path: &Path) -> ReformResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ReformError::ConfigError {
            reason: format!("failed to read catalog file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate an already-deserialized configuration.
    pub fn from_config(config: CatalogConfig) -> ReformResult<Self> {
        validate(&config)?;
        info!(
            regions = config.regions.len(),
            hospitals = config.hospitals.len(),
            service_groups = config.service_groups.len(),
            alerts = config.alerts.len(),
            milestones = config.milestones.len(),
            "catalog loaded"
        );
        Ok(Self { config })
    }

    // ── Regions ───────────────────────────────────────────────────────────────

    pub fn regions(&self) -> &[Region] {
        &self.config.regions
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.config.regions.iter().find(|r| r.name == name)
    }

    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.config.regions.iter().map(|r| r.name.as_str())
    }

    // ── Hospitals ─────────────────────────────────────────────────────────────

    /// All hospitals, grouped by region in region-table order.
    pub fn hospitals(&self) -> impl Iterator<Item = &Hospital> {
        self.config
            .regions
            .iter()
            .flat_map(move |r| self.hospitals_in(&r.name))
    }

    /// Hospitals of `region` in declaration order. Empty for an unknown region.
    pub fn hospitals_in<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a Hospital> + 'a {
        self.config.hospitals.iter().filter(move |h| h.region == region)
    }

    pub fn hospital(&self, name: &str) -> Option<&Hospital> {
        let found = self.config.hospitals.iter().find(|h| h.name == name);
        if found.is_none() {
            debug!(hospital = %name, "hospital not in catalog");
        }
        found
    }

    // ── Service groups ────────────────────────────────────────────────────────

    pub fn service_groups(&self) -> &[String] {
        &self.config.service_groups
    }

    pub fn has_service_group(&self, name: &str) -> bool {
        self.config.service_groups.iter().any(|g| g == name)
    }

    // ── Scenario content ──────────────────────────────────────────────────────

    pub fn alerts(&self) -> &[Alert] {
        &self.config.alerts
    }

    /// Milestones in file order. The data provider sorts them by date.
    pub fn milestones(&self) -> &[TimelineEvent] {
        &self.config.milestones
    }
}

fn invariant(reason: String) -> ReformError {
    ReformError::CatalogInvariant { reason }
}

/// Check that every name is non-empty and unique within its table.
fn unique_names<'a>(table: &str, names: impl Iterator<Item = &'a str>) -> ReformResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(invariant(format!("{} table contains an empty name", table)));
        }
        if !seen.insert(name) {
            return Err(invariant(format!("duplicate {} name '{}'", table, name)));
        }
    }
    Ok(())
}

fn validate(config: &CatalogConfig) -> ReformResult<()> {
    if config.regions.is_empty() {
        return Err(invariant("region table is empty".to_string()));
    }
    unique_names("region", config.regions.iter().map(|r| r.name.as_str()))?;
    unique_names("hospital", config.hospitals.iter().map(|h| h.name.as_str()))?;
    unique_names("service group", config.service_groups.iter().map(String::as_str))?;

    if config.service_groups.len() < MIN_SERVICE_GROUPS {
        return Err(invariant(format!(
            "service group table has {} entries; at least {} required",
            config.service_groups.len(),
            MIN_SERVICE_GROUPS
        )));
    }

    let regions: HashSet<&str> = config.regions.iter().map(|r| r.name.as_str()).collect();

    for hospital in &config.hospitals {
        if !regions.contains(hospital.region.as_str()) {
            return Err(invariant(format!(
                "hospital '{}' references unknown region '{}'",
                hospital.name, hospital.region
            )));
        }
    }

    for alert in &config.alerts {
        if !regions.contains(alert.region.as_str()) {
            return Err(invariant(format!(
                "alert '{}' references unknown region '{}'",
                alert.issue, alert.region
            )));
        }
        if let Some(name) = &alert.hospital {
            let in_region = config
                .hospitals
                .iter()
                .any(|h| &h.name == name && h.region == alert.region);
            if !in_region {
                return Err(invariant(format!(
                    "alert '{}' references hospital '{}' outside region '{}'",
                    alert.issue, name, alert.region
                )));
            }
        }
    }

    Ok(())
}

//! Catalog file schema.
//!
//! A `CatalogConfig` is deserialized from TOML and holds every static table
//! the dashboard draws from. Table order is significant: regions, hospitals
//! and service groups are presented in declaration order.

use serde::{Deserialize, Serialize};

use reform_contracts::{
    overview::Alert,
    planning::TimelineEvent,
    reference::{Hospital, Region},
};

/// The top-level structure deserialized from a catalog TOML file.
///
/// Example:
/// ```toml
/// service_groups = ["Urologie", "HNO"]
///
/// [[regions]]
/// name = "Kiel"
/// lat = 54.3
/// lon = 10.1
///
/// [[hospitals]]
/// name = "UKSH Campus Kiel"
/// care_level = "Maximalversorgung"
/// beds = 850
/// region = "Kiel"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Service groups (Leistungsgruppen), in display order.
    pub service_groups: Vec<String>,

    pub regions: Vec<Region>,

    /// Hospitals of all regions. Each `region` must name an entry of `regions`.
    pub hospitals: Vec<Hospital>,

    /// Open items shown on the overview page.
    #[serde(default)]
    pub alerts: Vec<Alert>,

    /// Program milestones shown on the planning page.
    #[serde(default)]
    pub milestones: Vec<TimelineEvent>,
}

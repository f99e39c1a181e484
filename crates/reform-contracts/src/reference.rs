//! Static reference records: regions, care levels, hospitals.
//!
//! These are loaded once by `reform-catalog` and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// A planning region (Planungsbereich).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    /// Approximate latitude used to place the region on the overview map.
    pub lat: f64,
    pub lon: f64,
}

/// Hospital tier (Versorgungsstufe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareLevel {
    /// Basic care.
    Regelversorgung,
    /// Focused care.
    Schwerpunktversorgung,
    /// Maximum / tertiary care.
    Maximalversorgung,
}

impl CareLevel {
    pub fn label(self) -> &'static str {
        match self {
            CareLevel::Regelversorgung => "Regelversorgung",
            CareLevel::Schwerpunktversorgung => "Schwerpunktversorgung",
            CareLevel::Maximalversorgung => "Maximalversorgung",
        }
    }
}

/// A catalog hospital. `region` always names an entry of the region table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    pub care_level: CareLevel,
    /// Planned bed count (Planbetten).
    pub beds: u32,
    pub region: String,
}

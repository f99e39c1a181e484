//! Page routing and selector state.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use tracing::debug;

use reform_catalog::Catalog;
use reform_contracts::{
    directive::Directive,
    error::{ReformError, ReformResult},
};
use reform_core::DataProvider;

use crate::{pages, widgets};

pub const DASHBOARD_TITLE: &str = "🏥 Krankenhausreform Schleswig-Holstein Dashboard";

/// The five dashboard pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Overview,
    Regional,
    Locations,
    Quality,
    Planning,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Overview,
        Page::Regional,
        Page::Locations,
        Page::Quality,
        Page::Planning,
    ];

    /// Navigation label.
    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "📊 Überblick",
            Page::Regional => "🗺️ Regional",
            Page::Locations => "🏥 Standorte",
            Page::Quality => "📈 Qualität",
            Page::Planning => "🗓️ Planung",
        }
    }

    /// Identifier accepted on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::Regional => "regional",
            Page::Locations => "locations",
            Page::Quality => "quality",
            Page::Planning => "planning",
        }
    }

    /// The selector the page offers, if any.
    pub fn selector(self) -> Option<SelectorKind> {
        match self {
            Page::Regional => Some(SelectorKind::Region),
            Page::Locations => Some(SelectorKind::Hospital),
            Page::Quality => Some(SelectorKind::ServiceGroup),
            Page::Overview | Page::Planning => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Page {
    type Err = ReformError;

    /// Accepts the slug (case-insensitive) or the 1-based navigation index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if let Ok(index) = wanted.parse::<usize>() {
            if let Some(page) = index.checked_sub(1).and_then(|i| Page::ALL.get(i)) {
                return Ok(*page);
            }
        }
        Page::ALL
            .into_iter()
            .find(|page| page.slug() == wanted)
            .ok_or_else(|| ReformError::UnknownPage {
                name: s.to_string(),
            })
    }
}

/// Which reference table a page selector draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Region,
    Hospital,
    ServiceGroup,
}

impl SelectorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectorKind::Region => "region",
            SelectorKind::Hospital => "hospital",
            SelectorKind::ServiceGroup => "service group",
        }
    }

    /// Select-box prompt.
    pub fn prompt(self) -> &'static str {
        match self {
            SelectorKind::Region => "Region auswählen:",
            SelectorKind::Hospital => "Krankenhaus auswählen:",
            SelectorKind::ServiceGroup => "Leistungsgruppe auswählen:",
        }
    }

    /// All selectable values in catalog order.
    pub fn options(self, catalog: &Catalog) -> Vec<String> {
        match self {
            SelectorKind::Region => catalog.region_names().map(str::to_string).collect(),
            SelectorKind::Hospital => catalog.hospitals().map(|h| h.name.clone()).collect(),
            SelectorKind::ServiceGroup => catalog.service_groups().to_vec(),
        }
    }
}

/// Current selector values. An unset field means the first catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub region: Option<String>,
    pub hospital: Option<String>,
    pub service_group: Option<String>,
}

impl Selection {
    pub fn get(&self, kind: SelectorKind) -> Option<&str> {
        match kind {
            SelectorKind::Region => self.region.as_deref(),
            SelectorKind::Hospital => self.hospital.as_deref(),
            SelectorKind::ServiceGroup => self.service_group.as_deref(),
        }
    }

    pub fn set(&mut self, kind: SelectorKind, value: impl Into<String>) {
        let value = Some(value.into());
        match kind {
            SelectorKind::Region => self.region = value,
            SelectorKind::Hospital => self.hospital = value,
            SelectorKind::ServiceGroup => self.service_group = value,
        }
    }

    /// The effective value for `kind`: the explicit one, or the first option.
    ///
    /// `None` only when the catalog table is empty.
    pub fn resolve(&self, kind: SelectorKind, catalog: &Catalog) -> Option<String> {
        match self.get(kind) {
            Some(value) => Some(value.to_string()),
            None => kind.options(catalog).into_iter().next(),
        }
    }

    /// Reject explicit values that are not in the catalog.
    pub fn validate(&self, catalog: &Catalog) -> ReformResult<()> {
        for kind in [
            SelectorKind::Region,
            SelectorKind::Hospital,
            SelectorKind::ServiceGroup,
        ] {
            let Some(value) = self.get(kind) else {
                continue;
            };
            let known = match kind {
                SelectorKind::Region => catalog.region(value).is_some(),
                SelectorKind::Hospital => catalog.hospital(value).is_some(),
                SelectorKind::ServiceGroup => catalog.has_service_group(value),
            };
            if !known {
                return Err(ReformError::UnknownSelection {
                    kind: kind.as_str().to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Compose one page.
///
/// The output starts with the dashboard banner ("Stand" date taken from
/// `now`), followed by the directives of exactly one page composer.
pub fn render_page(
    page: Page,
    selection: &Selection,
    provider: &mut DataProvider<'_>,
    now: NaiveDateTime,
) -> Vec<Directive> {
    let catalog = provider.catalog();
    let selected = page
        .selector()
        .and_then(|kind| selection.resolve(kind, catalog))
        .unwrap_or_default();

    let mut directives = vec![
        Directive::header(DASHBOARD_TITLE),
        Directive::caption(format!("Stand: {}", widgets::format_date(now.date()))),
    ];
    directives.extend(match page {
        Page::Overview => pages::overview::compose(provider),
        Page::Regional => pages::regional::compose(provider, &selected),
        Page::Locations => pages::locations::compose(provider, &selected),
        Page::Quality => pages::quality::compose(provider, &selected),
        Page::Planning => pages::planning::compose(provider, now),
    });

    debug!(page = page.slug(), selection = %selected, directives = directives.len(), "page rendered");
    directives
}

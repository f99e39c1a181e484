//! Side panel shown next to every page: regional conferences, a short
//! description of the dashboard and the program goal.

use reform_catalog::Catalog;
use reform_contracts::{
    directive::{Directive, Tone},
    status::MilestoneStatus,
};

use crate::widgets::format_date;

const INFO: &str =
    "Dieses Dashboard zeigt den aktuellen Stand der Krankenhausreform in Schleswig-Holstein.";

pub fn compose(catalog: &Catalog) -> Vec<Directive> {
    let mut out = vec![Directive::subheader("📍 Regionalkonferenzen")];
    out.extend(catalog.region_names().map(|name| Directive::text(format!("• {name}"))));
    out.push(Directive::Divider);

    out.push(Directive::subheader("ℹ️ Info"));
    out.push(Directive::callout(Tone::Info, INFO));

    // The goal date comes from the milestone table; a catalog without a
    // goal milestone simply has no goal caption.
    if let Some(goal) = catalog
        .milestones()
        .iter()
        .find(|event| event.status == MilestoneStatus::Goal)
    {
        out.push(Directive::caption(format!(
            "Ziel: {} - Alle Leistungsgruppen zugewiesen",
            format_date(goal.date)
        )));
    }
    out
}

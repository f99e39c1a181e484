//! Program timeline ("Planung").

use chrono::{DurationRound, NaiveDateTime, TimeDelta};

use reform_contracts::{directive::Directive, status::MilestoneStatus};
use reform_core::DataProvider;

use crate::widgets::{format_date, group_by_quarter, milestone_icon, milestone_tone};

const DATA_SOURCES: &str = "Ministerium, Landesverband der Krankenkassen, MDK, Routinedaten";

pub fn compose(provider: &mut DataProvider<'_>, now: NaiveDateTime) -> Vec<Directive> {
    let events = provider.timeline_events();

    let mut out = vec![
        Directive::header("🗓️ Planung - Zeitstrahl & Meilensteine"),
        Directive::subheader("Krankenhausreform Schleswig-Holstein: Zeitstrahl"),
    ];

    for (quarter, members) in group_by_quarter(&events) {
        out.push(Directive::subheader(quarter));
        for event in members {
            let current = if event.status == MilestoneStatus::InProgress {
                " (aktuell)"
            } else {
                ""
            };
            out.push(Directive::callout(
                milestone_tone(event.status),
                format!(
                    "{} {} - {}{current}",
                    milestone_icon(event.status),
                    format_date(event.date),
                    event.title
                ),
            ));
            out.push(Directive::caption(event.description.clone()));
        }
        out.push(Directive::Divider);
    }

    out.push(Directive::caption(format!(
        "Letzte Aktualisierung: {} Uhr",
        now.format("%d.%m.%Y %H:%M")
    )));
    out.push(Directive::caption(format!(
        "Nächste Auto-Refresh: {} Uhr",
        next_refresh(now).format("%d.%m.%Y %H:%M")
    )));
    out.push(Directive::caption(format!("Datenquellen: {DATA_SOURCES}")));
    out
}

/// Data is regenerated on the full hour.
fn next_refresh(now: NaiveDateTime) -> NaiveDateTime {
    let hour = TimeDelta::hours(1);
    now.duration_trunc(hour).unwrap_or(now) + hour
}

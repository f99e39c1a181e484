//! Regional detail page: hospitals, coverage analysis and patient flows.

use chrono::NaiveDate;

use reform_contracts::{
    directive::{Directive, Tone},
    hospital::HospitalSummary,
    planning::{CoverageAnalysis, MigrationFlow, TimelineEvent},
    status::{GapSeverity, MilestoneStatus},
};
use reform_core::DataProvider;

use crate::widgets::{check_callout, format_date, progress, status_marker, thousands};

/// Number of milestones listed under "Anstehende Termine".
const UPCOMING_LIMIT: usize = 3;

pub fn compose(provider: &mut DataProvider<'_>, region: &str) -> Vec<Directive> {
    let mut out = vec![
        Directive::header("🗺️ Regional - Detailansicht"),
        Directive::subheader(format!("Region: {region}")),
    ];

    let Some(coverage) = provider.coverage_analysis(region) else {
        out.push(Directive::caption(format!("Region '{region}' nicht gefunden.")));
        return out;
    };
    let hospitals = provider.hospitals_for_region(region);

    out.push(Directive::subheader("🏥 Krankenhäuser"));
    for hospital in &hospitals {
        hospital_card(&mut out, hospital);
    }

    coverage_section(&mut out, &coverage);

    out.push(Directive::subheader("📈 Patientenstrom"));
    out.push(Directive::text("Abwanderung:"));
    out.extend(flow_lines(&coverage.outbound, "→"));
    out.push(Directive::text("Zuwanderung:"));
    out.extend(flow_lines(&coverage.inbound, "←"));
    out.push(Directive::Divider);

    out.push(Directive::subheader("🗓️ Anstehende Termine"));
    let events = provider.timeline_events();
    for event in upcoming(&events, provider.today()) {
        let (tone, icon) = match event.status {
            MilestoneStatus::Upcoming => (Tone::Warning, "⚠️"),
            _ => (Tone::Info, "📅"),
        };
        out.push(Directive::callout(
            tone,
            format!("{icon} {}: {}", format_date(event.date), event.title),
        ));
    }
    out
}

fn hospital_card(out: &mut Vec<Directive>, hospital: &HospitalSummary) {
    out.push(Directive::text(format!(
        "{} {}",
        status_marker(hospital.status),
        hospital.name
    )));
    out.push(Directive::text(format!(
        "Versorgungsstufe: {}",
        hospital.care_level.label()
    )));
    out.push(Directive::text(format!("Planbetten: {}", hospital.beds)));
    out.push(Directive::text(format!("Mitarbeiter: {}", hospital.staff)));
    out.push(progress("Leistungsgruppen", hospital.lg_approved, hospital.lg_total));
    out.push(check_callout(
        hospital.quality_fulfilled,
        "Qualitätskriterien erfüllt",
        "Qualitätskriterien nicht erfüllt",
    ));
    for warning in &hospital.warnings {
        out.push(Directive::callout(Tone::Warning, format!("⚠️ {warning}")));
    }
}

fn coverage_section(out: &mut Vec<Directive>, coverage: &CoverageAnalysis) {
    let demo = &coverage.demographics;
    let access = &coverage.accessibility;

    out.push(Directive::subheader("📊 Versorgungsanalyse"));
    out.push(Directive::text("Demographie:"));
    out.push(Directive::metric("Bevölkerung", thousands(demo.population), None));
    out.push(Directive::metric(
        "Durchschnittsalter",
        format!("{} Jahre", demo.avg_age),
        None,
    ));
    out.push(Directive::metric(
        "Prognose 2030",
        format!("{:+}%", demo.forecast_2030_pct),
        None,
    ));

    out.push(Directive::text("Erreichbarkeit:"));
    out.push(Directive::metric(
        "Notfallversorgung (<30 min)",
        format!("{}%", access.emergency_30min_pct),
        None,
    ));
    out.push(Directive::metric(
        "Spezialisierte Leistungen (<60 min)",
        format!("{}%", access.specialized_60min_pct),
        None,
    ));

    out.push(Directive::text("Versorgungslücken:"));
    for gap in &coverage.gaps {
        out.push(match gap.severity {
            GapSeverity::Missing => Directive::callout(
                Tone::Error,
                format!("🔴 {}: Fehlt komplett", gap.service_group),
            ),
            GapSeverity::UnderCapacity => Directive::callout(
                Tone::Warning,
                format!("🟡 {}: Unterversorgt", gap.service_group),
            ),
        });
    }
}

fn flow_lines<'f>(flows: &'f [MigrationFlow], arrow: &'f str) -> impl Iterator<Item = Directive> + 'f {
    flows
        .iter()
        .map(move |flow| Directive::text(format!("{arrow} {}: +{}%", flow.counterpart, flow.percent)))
}

/// The next open milestones from `today` on; the last few overall when none remain.
pub fn upcoming(events: &[TimelineEvent], today: NaiveDate) -> Vec<&TimelineEvent> {
    let next: Vec<&TimelineEvent> = events
        .iter()
        .filter(|e| e.status != MilestoneStatus::Completed && e.date >= today)
        .take(UPCOMING_LIMIT)
        .collect();
    if !next.is_empty() {
        return next;
    }
    let skip = events.len().saturating_sub(UPCOMING_LIMIT);
    events.iter().skip(skip).collect()
}

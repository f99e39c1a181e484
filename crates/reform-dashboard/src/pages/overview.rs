//! State-level overview ("Landesebene").

use reform_contracts::{
    directive::{Directive, GeoPoint},
    overview::{Alert, RegionalStatus, StateKpis},
};
use reform_core::DataProvider;

use crate::widgets::{format_date, progress, status_marker};

/// Target date of the service-group assignment.
const ASSIGNMENT_DEADLINE: &str = "01.01.2027";

pub fn compose(provider: &mut DataProvider<'_>) -> Vec<Directive> {
    let kpis = provider.state_kpis();
    let regions = provider.regional_status();
    let alerts = provider.critical_alerts();

    let mut out = vec![Directive::header("📊 Überblick - Landesebene")];
    reform_progress(&mut out, &kpis);
    out.push(Directive::Divider);
    regional_overview(&mut out, provider, &regions);
    open_items(&mut out, &alerts);
    out.push(Directive::Divider);
    out.push(Directive::subheader("📈 KPI-Scoreboard"));
    out.push(scoreboard(&kpis));
    out
}

fn reform_progress(out: &mut Vec<Directive>, kpis: &StateKpis) {
    out.push(Directive::subheader("Reform-Fortschrittsanzeige"));

    let lg = &kpis.lg_approved;
    out.push(progress("LEISTUNGSGRUPPEN-ZUWEISUNG", lg.current, lg.total));
    out.push(Directive::caption(format!(
        "Ziel: {}% bis {ASSIGNMENT_DEADLINE} | Trend: {}",
        lg.target, lg.trend
    )));

    let quality = &kpis.quality_fulfilled;
    out.push(progress("QUALITÄTSKRITERIEN-ERFÜLLUNG", quality.current, quality.total));
    out.push(Directive::caption(format!(
        "Ziel: {}%+ | Trend: {}",
        quality.target, quality.trend
    )));

    let funds = &kpis.funds_allocated;
    out.push(progress("TRANSFORMATIONSFONDS (in Mio. €)", funds.current, funds.total));
    out.push(Directive::caption(format!(
        "Ziel: {}% | Trend: {}",
        funds.target, funds.trend
    )));

    let emergency = &kpis.emergency_accessible;
    out.push(Directive::metric(
        "Notfallversorgung erreichbar",
        format!("{}%", emergency.percentage()),
        Some(emergency.trend.clone()),
    ));
    let beds = &kpis.bed_occupancy;
    out.push(Directive::metric(
        "Bettenauslastung (Ø)",
        format!("{}%", beds.current),
        Some(beds.trend.clone()),
    ));
    out.push(Directive::caption(format!(
        "Zielbereich: {}-{}%",
        beds.target_min, beds.target_max
    )));
}

fn regional_overview(out: &mut Vec<Directive>, provider: &DataProvider<'_>, regions: &[RegionalStatus]) {
    let catalog = provider.catalog();
    out.push(Directive::subheader("🗺️ Regionale Übersicht"));

    let points = regions
        .iter()
        .filter_map(|status| {
            let region = catalog.region(&status.region)?;
            Some(GeoPoint {
                label: status.region.clone(),
                lat: region.lat,
                lon: region.lon,
                status: status.status,
                hover: vec![
                    status.region.clone(),
                    format!("Status: {}", status_marker(status.status)),
                    format!("Krankenhäuser: {}", status.hospitals),
                    format!("LG genehmigt: {}%", status.lg_approved_pct),
                ],
            })
        })
        .collect();
    out.push(Directive::GeoScatter { points });

    out.push(Directive::text("Status nach Regionen:"));
    out.push(Directive::Table {
        columns: ["Region", "Standorte", "LG", "Qualität"]
            .map(String::from)
            .to_vec(),
        rows: regions
            .iter()
            .map(|status| {
                vec![
                    format!("{} {}", status_marker(status.status), status.region),
                    format!("{} Standorte", status.hospitals),
                    format!("{}% LG", status.lg_approved_pct),
                    format!("{}% Qualität", status.quality_fulfilled_pct),
                ]
            })
            .collect(),
    });
}

fn open_items(out: &mut Vec<Directive>, alerts: &[Alert]) {
    out.push(Directive::subheader("⚠️ Offene Punkte"));
    for alert in alerts {
        out.push(Directive::AlertBox {
            priority: alert.priority,
            region: alert.region.clone(),
            issue: alert.issue.clone(),
            hospital: alert.hospital.clone(),
            deadline: format_date(alert.deadline),
        });
    }
}

fn scoreboard(kpis: &StateKpis) -> Directive {
    let row = |metric: &str, current: String, target: String, trend: &str| {
        vec![metric.to_string(), current, target, trend.to_string()]
    };
    let beds = &kpis.bed_occupancy;
    let mut rows: Vec<Vec<String>> = [
        ("LG genehmigt (%)", &kpis.lg_approved),
        ("Qualität erfüllt (%)", &kpis.quality_fulfilled),
        ("Fonds allokiert (%)", &kpis.funds_allocated),
        ("Notfallversorgung erreichbar (%)", &kpis.emergency_accessible),
    ]
    .into_iter()
    .map(|(metric, kpi)| {
        row(
            metric,
            format!("{}%", kpi.percentage()),
            format!("{}%", kpi.target),
            &kpi.trend,
        )
    })
    .collect();
    rows.push(row(
        "Bettenauslastung (Ø)",
        format!("{}%", beds.current),
        format!("{}-{}%", beds.target_min, beds.target_max),
        &beds.trend,
    ));

    Directive::Table {
        columns: ["Metrik", "Aktuell", "Ziel", "Trend"]
            .map(String::from)
            .to_vec(),
        rows,
    }
}

//! Hospital profile page ("Standorte").

use reform_contracts::{
    directive::{Directive, Tone},
    hospital::HospitalDetail,
};
use reform_core::DataProvider;

use crate::widgets::{check_callout, progress};

pub fn compose(provider: &mut DataProvider<'_>, hospital: &str) -> Vec<Directive> {
    let mut out = vec![Directive::header("🏥 Standorte - Krankenhausprofile")];

    let Some(detail) = provider.hospital_details(hospital) else {
        out.push(Directive::caption(format!(
            "Krankenhaus '{hospital}' nicht gefunden."
        )));
        return out;
    };

    master_data(&mut out, &detail);
    service_groups(&mut out, &detail);
    out
}

fn master_data(out: &mut Vec<Directive>, detail: &HospitalDetail) {
    out.push(Directive::subheader("Stammdaten"));
    out.push(Directive::text(format!("Name: {}", detail.name)));
    out.push(Directive::text(format!(
        "Versorgungsstufe: {}",
        detail.care_level.label()
    )));
    out.push(Directive::text(format!("Planungsbereich: {}", detail.region)));
    out.push(Directive::text(format!("Planbetten: {}", detail.beds)));
    out.push(Directive::text(format!("Mitarbeiter: {}", detail.staff)));
    out.push(Directive::Divider);

    let criteria = &detail.criteria;
    out.push(Directive::text("Qualitätskriterien:"));
    out.push(check_callout(
        criteria.staffing_ok,
        "Personalausstattung erfüllt",
        "Personalausstattung: 2 Ärzte fehlen",
    ));
    out.push(check_callout(
        criteria.equipment_ok,
        "Sachausstattung erfüllt",
        "Sachausstattung nicht erfüllt",
    ));
    out.push(check_callout(
        criteria.related_groups_ok,
        "Verwandte LG vorhanden",
        "Verwandte LG fehlen",
    ));
    out.push(Directive::Divider);

    let indicators = &detail.indicators;
    out.push(Directive::text("Qualitätsindikatoren (letzte 6 Monate):"));
    out.push(Directive::metric(
        "Komplikationsrate",
        format!("{:.1}%", indicators.complication_rate),
        Some("Ziel: <2.5%".to_string()),
    ));
    out.push(Directive::metric(
        "30-Tage-Sterberate",
        format!("{:.1}%", indicators.mortality_rate),
        Some("Ziel: <1.5%".to_string()),
    ));
    out.push(Directive::metric(
        "Patientenzufriedenheit",
        format!("{:.1}/5.0", indicators.satisfaction),
        Some("Ziel: ≥3.5".to_string()),
    ));
}

fn service_groups(out: &mut Vec<Directive>, detail: &HospitalDetail) {
    // At most 15 groups, so the counts fit u32.
    let total = detail.lg_total() as u32;
    let approved = detail.approved.len() as u32;

    out.push(Directive::subheader("Leistungsgruppen-Status"));
    out.push(progress(
        format!("Gesamt: {approved}/{total}"),
        approved,
        total,
    ));
    out.push(Directive::Divider);

    out.push(Directive::text(format!("✅ Genehmigt ({approved}):")));
    for group in &detail.approved {
        out.push(Directive::callout(Tone::Success, format!("✓ {group}")));
    }
    out.push(Directive::Divider);

    if !detail.in_progress.is_empty() {
        out.push(Directive::text(format!(
            "🕐 In Bearbeitung ({}):",
            detail.in_progress.len()
        )));
        for pending in &detail.in_progress {
            out.push(Directive::callout(
                Tone::Warning,
                format!(
                    "⟳ {}\nStatus: {} ({})",
                    pending.service_group, pending.step, pending.date
                ),
            ));
        }
        out.push(Directive::Divider);
    }

    if !detail.rejected.is_empty() {
        out.push(Directive::text(format!(
            "❌ Abgelehnt ({}):",
            detail.rejected.len()
        )));
        for rejected in &detail.rejected {
            out.push(Directive::callout(
                Tone::Error,
                format!("✗ {}\nGrund: {}", rejected.service_group, rejected.reason),
            ));
        }
    }
}

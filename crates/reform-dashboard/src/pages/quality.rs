//! Clinical quality indicators for one service group.

use reform_contracts::{
    directive::{ChartPoint, ChartSeries, Directive, LineStyle, Threshold, Tone},
    quality::{ComparisonRow, Indicator, QualityTrend, TrendPoint},
};
use reform_core::DataProvider;

use crate::widgets::status_marker;

pub fn compose(provider: &mut DataProvider<'_>, service_group: &str) -> Vec<Directive> {
    let mut out = vec![
        Directive::header("📊 Qualität - Klinische Indikatoren"),
        Directive::subheader(format!("Leistungsgruppe: {service_group}")),
    ];

    let (Some(metrics), Some(trend)) = (
        provider.quality_metrics(service_group),
        provider.quality_trends(service_group),
    ) else {
        out.push(Directive::caption(format!(
            "Leistungsgruppe '{service_group}' nicht gefunden."
        )));
        return out;
    };
    let comparison = provider.hospital_comparison(service_group);

    let complication = &metrics.complication_rate;
    out.push(Directive::metric(
        "Komplikationsrate",
        format!("{:.1}%", complication.current),
        Some(format!("Ziel: <{:.1}%", complication.target)),
    ));
    out.push(target_callout(complication));

    let mortality = &metrics.mortality_rate;
    out.push(Directive::metric(
        "30-Tage-Mortalität",
        format!("{:.1}%", mortality.current),
        Some(format!("Ziel: <{:.1}%", mortality.target)),
    ));
    out.push(target_callout(mortality));

    let stay = &metrics.avg_stay;
    out.push(Directive::metric(
        "Verweildauer (Ø)",
        format!("{:.1} Tage", stay.current),
        Some(format!(
            "Ziel: {:.1}±{:.1} Tag",
            stay.target,
            stay.tolerance.unwrap_or_default()
        )),
    ));
    out.push(target_callout(stay));
    out.push(Directive::Divider);

    out.push(Directive::subheader("📈 Trend-Entwicklung (12 Monate)"));
    out.push(trend_chart(&trend, complication.target));
    out.push(Directive::Divider);

    out.push(Directive::subheader("🏥 Standort-Vergleich"));
    out.push(Directive::text(format!(
        "Qualitätsindikatoren für {service_group} - Vergleich aller Standorte"
    )));
    out.push(comparison_table(&comparison));
    out.push(Directive::caption(
        "Legende: 🟢 Über Ziel | 🟡 Im Plan | 🔴 Unter Ziel",
    ));
    out
}

/// Banded indicators deviate in either direction, so a miss is only a warning.
fn target_callout(indicator: &Indicator) -> Directive {
    match (indicator.on_target(), indicator.tolerance.is_some()) {
        (true, _) => Directive::callout(Tone::Success, "✓ Im Plan"),
        (false, true) => Directive::callout(Tone::Warning, "⚠ Abweichung"),
        (false, false) => Directive::callout(Tone::Error, "✗ Über Ziel"),
    }
}

fn trend_chart(trend: &QualityTrend, target: f64) -> Directive {
    Directive::LineChart {
        title: "Komplikationsrate über Zeit".to_string(),
        x_label: "Monat".to_string(),
        y_label: "Komplikationsrate (%)".to_string(),
        series: vec![
            chart_series(trend, "Schleswig-Holstein", LineStyle::Solid, |p| p.regional),
            chart_series(trend, "Bundesweit (Baseline)", LineStyle::Dashed, |p| p.national),
        ],
        threshold: Some(Threshold {
            value: target,
            label: "Zielwert".to_string(),
        }),
    }
}

fn chart_series(
    trend: &QualityTrend,
    name: &str,
    style: LineStyle,
    value: impl Fn(&TrendPoint) -> f64,
) -> ChartSeries {
    ChartSeries {
        name: name.to_string(),
        style,
        points: trend
            .points
            .iter()
            .map(|p| ChartPoint {
                x: p.month.clone(),
                y: value(p),
            })
            .collect(),
    }
}

fn comparison_table(rows: &[ComparisonRow]) -> Directive {
    Directive::Table {
        columns: [
            "Standort",
            "Komplikationen",
            "Mortalität",
            "Zufriedenheit",
            "Verweildauer",
        ]
        .map(String::from)
        .to_vec(),
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.hospital.clone(),
                    status_marker(row.complication).to_string(),
                    status_marker(row.mortality).to_string(),
                    status_marker(row.satisfaction).to_string(),
                    status_marker(row.stay_duration).to_string(),
                ]
            })
            .collect(),
    }
}

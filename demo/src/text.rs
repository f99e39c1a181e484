//! Plain-text rendering of a directive stream.

use reform_contracts::directive::{Directive, LineStyle, ProgressTier, Tone};
use reform_dashboard::widgets::{priority_marker, status_marker};

const RULE_WIDTH: usize = 72;
const BAR_WIDTH: usize = 24;

/// Render `directives` as terminal text, one block per directive.
pub fn render(directives: &[Directive]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for directive in directives {
        render_one(&mut lines, directive);
    }
    lines.join("\n")
}

fn render_one(lines: &mut Vec<String>, directive: &Directive) {
    match directive {
        Directive::Header { text } => {
            lines.push(String::new());
            lines.push(text.clone());
            lines.push("=".repeat(RULE_WIDTH));
        }
        Directive::Subheader { text } => {
            lines.push(String::new());
            lines.push(text.clone());
            lines.push("-".repeat(text.chars().count()));
        }
        Directive::Text { text } => lines.push(text.clone()),
        Directive::Caption { text } => lines.push(format!("  {text}")),
        Directive::Metric {
            label,
            value,
            delta,
        } => match delta {
            Some(delta) => lines.push(format!("{label}: {value}  ({delta})")),
            None => lines.push(format!("{label}: {value}")),
        },
        Directive::Progress {
            label,
            current,
            total,
            percent,
            tier,
        } => {
            lines.push(label.clone());
            lines.push(format!(
                "  [{}] {current}/{total} ({percent}%) {}",
                bar(*percent),
                tier_marker(*tier)
            ));
        }
        Directive::Callout { tone, text } => {
            let indented = text.replace('\n', "\n       ");
            lines.push(format!("{} {indented}", tone_tag(*tone)));
        }
        Directive::AlertBox {
            priority,
            region,
            issue,
            hospital,
            deadline,
        } => {
            lines.push(format!("{} {region}: {issue}", priority_marker(*priority)));
            if let Some(hospital) = hospital {
                lines.push(format!("    Krankenhaus: {hospital}"));
            }
            lines.push(format!("    Frist: {deadline}"));
        }
        Directive::GeoScatter { points } => {
            for point in points {
                lines.push(format!(
                    "  {} {:<12} {:.1}°N {:.1}°E  {}",
                    status_marker(point.status),
                    point.label,
                    point.lat,
                    point.lon,
                    point.hover.iter().skip(2).cloned().collect::<Vec<_>>().join(" | ")
                ));
            }
        }
        Directive::LineChart {
            title,
            x_label,
            y_label,
            series,
            threshold,
        } => {
            lines.push(format!("{title} ({y_label})"));
            let mut columns = vec![x_label.clone()];
            columns.extend(series.iter().map(|s| match s.style {
                LineStyle::Solid => s.name.clone(),
                LineStyle::Dashed => format!("{} ┄", s.name),
            }));
            let months = series.first().map(|s| s.points.len()).unwrap_or_default();
            let rows: Vec<Vec<String>> = (0..months)
                .map(|i| {
                    let mut row = vec![series[0].points[i].x.clone()];
                    row.extend(
                        series
                            .iter()
                            .map(|s| s.points.get(i).map(|p| format!("{:.2}", p.y)).unwrap_or_default()),
                    );
                    row
                })
                .collect();
            table(lines, &columns, &rows);
            if let Some(threshold) = threshold {
                lines.push(format!("  ··· {}: {:.1}", threshold.label, threshold.value));
            }
        }
        Directive::Table { columns, rows } => table(lines, columns, rows),
        Directive::Divider => lines.push("─".repeat(RULE_WIDTH)),
    }
}

fn bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn tier_marker(tier: ProgressTier) -> &'static str {
    match tier {
        ProgressTier::Green => "🟢",
        ProgressTier::Yellow => "🟡",
        ProgressTier::Red => "🔴",
    }
}

fn tone_tag(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => "[ok]  ",
        Tone::Info => "[info]",
        Tone::Warning => "[warn]",
        Tone::Error => "[err] ",
        Tone::Plain => "      ",
    }
}

/// Left-aligned columns padded to the widest cell (by `char` count).
fn table(lines: &mut Vec<String>, columns: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    lines.push(format!("  {}", format_row(columns)));
    lines.push(format!(
        "  {}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ")
    ));
    for row in rows {
        lines.push(format!("  {}", format_row(row.as_slice())));
    }
}

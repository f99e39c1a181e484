//! # reform-dashboard
//!
//! The view composer of the hospital reform dashboard.
//!
//! A render takes a [`Page`], the current [`Selection`] and a
//! `reform_core::DataProvider`, and returns an ordered list of
//! `reform_contracts::directive::Directive` values. Renderers draw that list
//! top to bottom; composition never touches a terminal or writes output.
//!
//! Pages:
//!
//! 1. **Überblick**: state KPIs, regional map and status table, open items,
//!    KPI scoreboard.
//! 2. **Regional**: hospitals of one region, coverage analysis, patient flows
//!    and upcoming dates.
//! 3. **Standorte**: profile of one hospital with its service-group status.
//! 4. **Qualität**: indicators, trend chart and hospital comparison for one
//!    service group.
//! 5. **Planung**: program milestones grouped by quarter.
//!
//! [`sidebar::compose`] builds the side panel shared by all pages.

pub mod page;
pub mod pages;
pub mod sidebar;
pub mod widgets;

pub use page::{render_page, Page, Selection, SelectorKind, DASHBOARD_TITLE};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use reform_catalog::Catalog;
    use reform_contracts::{
        directive::{Directive, ProgressTier, Tone},
        error::ReformError,
        status::Status,
    };
    use reform_core::{DataProvider, EdgeSource, StdRandom};

    use super::*;
    use crate::pages::{locations, overview, planning, quality, regional};
    use crate::widgets::{progress, status_marker, thousands};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::builtin().expect("builtin catalog must load")
    }

    fn edge(catalog: &Catalog, source: EdgeSource) -> DataProvider<'_> {
        DataProvider::new(catalog, Box::new(source), now().date())
    }

    fn texts(directives: &[Directive]) -> Vec<&str> {
        directives
            .iter()
            .filter_map(|d| match d {
                Directive::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn subheaders(directives: &[Directive]) -> Vec<&str> {
        directives
            .iter()
            .filter_map(|d| match d {
                Directive::Subheader { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn captions(directives: &[Directive]) -> Vec<&str> {
        directives
            .iter()
            .filter_map(|d| match d {
                Directive::Caption { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn callouts(directives: &[Directive]) -> Vec<(Tone, &str)> {
        directives
            .iter()
            .filter_map(|d| match d {
                Directive::Callout { tone, text } => Some((*tone, text.as_str())),
                _ => None,
            })
            .collect()
    }

    fn count_kind(directives: &[Directive], kind: &str) -> usize {
        directives.iter().filter(|d| d.kind() == kind).count()
    }

    // ── Routing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_page_from_str() {
        assert_eq!("overview".parse::<Page>().unwrap(), Page::Overview);
        assert_eq!("QUALITY".parse::<Page>().unwrap(), Page::Quality);
        assert_eq!("3".parse::<Page>().unwrap(), Page::Locations);

        for bad in ["0", "6", "settings"] {
            match bad.parse::<Page>() {
                Err(ReformError::UnknownPage { name }) => assert_eq!(name, bad),
                other => panic!("expected UnknownPage for '{bad}', got {other:?}"),
            }
        }
    }

    #[test]
    fn test_page_selectors() {
        assert_eq!(Page::Overview.selector(), None);
        assert_eq!(Page::Regional.selector(), Some(SelectorKind::Region));
        assert_eq!(Page::Locations.selector(), Some(SelectorKind::Hospital));
        assert_eq!(Page::Quality.selector(), Some(SelectorKind::ServiceGroup));
        assert_eq!(Page::Planning.selector(), None);
    }

    /// An unset selector falls back to the first catalog entry.
    #[test]
    fn test_selection_defaults_to_first_entry() {
        let catalog = catalog();
        let selection = Selection::default();

        assert_eq!(
            selection.resolve(SelectorKind::Region, &catalog).as_deref(),
            Some("Flensburg")
        );
        assert_eq!(
            selection.resolve(SelectorKind::Hospital, &catalog).as_deref(),
            Some("Malteser Krankenhaus St. Franziskus-Hospital")
        );
        assert_eq!(
            selection.resolve(SelectorKind::ServiceGroup, &catalog),
            catalog.service_groups().first().cloned()
        );
    }

    #[test]
    fn test_selection_validation() {
        let catalog = catalog();
        let mut selection = Selection::default();
        selection.set(SelectorKind::Region, "Kiel");
        assert!(selection.validate(&catalog).is_ok());

        selection.set(SelectorKind::Hospital, "Klinik am Meer");
        match selection.validate(&catalog) {
            Err(ReformError::UnknownSelection { kind, value }) => {
                assert_eq!(kind, "hospital");
                assert_eq!(value, "Klinik am Meer");
            }
            other => panic!("expected UnknownSelection, got {other:?}"),
        }
    }

    /// Every page starts with the banner and its "Stand" date, then the page header.
    #[test]
    fn test_render_page_banner() {
        let catalog = catalog();
        for page in Page::ALL {
            let mut provider = DataProvider::new(&catalog, Box::new(StdRandom::seeded(7)), now().date());
            let directives = render_page(page, &Selection::default(), &mut provider, now());

            assert_eq!(directives[0], Directive::header(DASHBOARD_TITLE));
            assert_eq!(directives[1], Directive::caption("Stand: 19.10.2026"));
            assert_eq!(directives[2].kind(), "header", "{page:?}");
        }
    }

    // ── Overview ──────────────────────────────────────────────────────────────

    #[test]
    fn test_overview_layout() {
        let catalog = catalog();
        let directives = overview::compose(&mut edge(&catalog, EdgeSource::Low));

        match &directives[2] {
            Directive::Progress {
                current,
                total,
                percent,
                tier,
                ..
            } => {
                assert_eq!((*current, *total, *percent), (47, 61, 77));
                assert_eq!(*tier, ProgressTier::Yellow);
            }
            other => panic!("expected LG progress bar, got {other:?}"),
        }
        assert_eq!(count_kind(&directives, "progress"), 3);
        assert_eq!(count_kind(&directives, "alert_box"), 3);

        let scatter = directives.iter().find_map(|d| match d {
            Directive::GeoScatter { points } => Some(points),
            _ => None,
        });
        assert_eq!(scatter.map(Vec::len), Some(5));

        match directives.last() {
            Some(Directive::Table { columns, rows }) => {
                assert_eq!(columns, &["Metrik", "Aktuell", "Ziel", "Trend"]);
                assert_eq!(rows.len(), 5);
                assert_eq!(rows[4], ["Bettenauslastung (Ø)", "78%", "75-85%", "+2pp"]);
            }
            other => panic!("expected scoreboard table last, got {other:?}"),
        }
    }

    // ── Regional ──────────────────────────────────────────────────────────────

    /// Kiel lists exactly its three catalog hospitals, each with a progress bar.
    #[test]
    fn test_regional_kiel_hospitals() {
        let catalog = catalog();
        let directives = regional::compose(&mut edge(&catalog, EdgeSource::Low), "Kiel");
        let texts = texts(&directives);

        // Low edge: quality fulfilled with unapproved groups, always warning.
        for name in [
            "UKSH Campus Kiel",
            "Städtisches Krankenhaus Kiel",
            "Helios Klinik Kiel",
        ] {
            assert!(texts.contains(&format!("🟡 {name}").as_str()), "{name} missing");
        }
        let bars = directives
            .iter()
            .filter(|d| matches!(d, Directive::Progress { label, .. } if label == "Leistungsgruppen"))
            .count();
        assert_eq!(bars, 3);
        assert!(texts.contains(&"→ Bremen: +12%"));
        assert!(texts.contains(&"← Hamburg: +3%"));
    }

    #[test]
    fn test_regional_unknown_region() {
        let catalog = catalog();
        let directives = regional::compose(&mut edge(&catalog, EdgeSource::Low), "Helgoland");

        assert_eq!(captions(&directives), ["Region 'Helgoland' nicht gefunden."]);
        assert_eq!(count_kind(&directives, "progress"), 0);
    }

    #[test]
    fn test_upcoming_milestones() {
        let catalog = catalog();
        let events = edge(&catalog, EdgeSource::Low).timeline_events();
        let titles = |today: NaiveDate| -> Vec<String> {
            regional::upcoming(&events, today)
                .into_iter()
                .map(|e| e.title.clone())
                .collect()
        };

        assert_eq!(
            titles(NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()),
            [
                "Audits Qualitätskriterien",
                "Frist: Qualitätskriterien-Erfüllung",
                "Regionalkonferenzen (5 Regionen)",
            ]
        );
        assert_eq!(
            titles(now().date()),
            ["Alle Leistungsgruppen in Kraft"]
        );
        // Nothing left after the goal date: fall back to the last three.
        assert_eq!(
            titles(NaiveDate::from_ymd_opt(2027, 6, 1).unwrap()),
            [
                "Regionalkonferenzen (5 Regionen)",
                "Evaluation 1. Reformphase",
                "Alle Leistungsgruppen in Kraft",
            ]
        );
    }

    // ── Locations ─────────────────────────────────────────────────────────────

    #[test]
    fn test_locations_unknown_hospital() {
        let catalog = catalog();
        let directives = locations::compose(&mut edge(&catalog, EdgeSource::Low), "Klinik am Meer");

        assert_eq!(directives.len(), 2);
        assert_eq!(
            directives[1],
            Directive::caption("Krankenhaus 'Klinik am Meer' nicht gefunden.")
        );
    }

    /// Empty in-progress or rejected lists drop their whole section.
    #[test]
    fn test_locations_sections() {
        let catalog = catalog();

        let low = locations::compose(&mut edge(&catalog, EdgeSource::Low), "UKSH Campus Kiel");
        let low_texts = texts(&low);
        assert!(low_texts.contains(&"✅ Genehmigt (6):"));
        assert!(low_texts.contains(&"🕐 In Bearbeitung (1):"));
        assert!(low_texts.contains(&"❌ Abgelehnt (3):"));

        let high = locations::compose(&mut edge(&catalog, EdgeSource::High), "UKSH Campus Kiel");
        let high_texts = texts(&high);
        assert!(high_texts.contains(&"🕐 In Bearbeitung (2):"));
        assert!(!high_texts.iter().any(|t| t.starts_with("❌ Abgelehnt")));
        assert!(high.iter().any(|d| matches!(
            d,
            Directive::Progress { label, percent: 86, .. } if label == "Gesamt: 13/15"
        )));
        assert!(callouts(&high).contains(&(Tone::Error, "✗ Personalausstattung: 2 Ärzte fehlen")));
    }

    // ── Quality ───────────────────────────────────────────────────────────────

    /// Each indicator metric is directly followed by its on-target callout.
    #[test]
    fn test_quality_metrics_followed_by_callouts() {
        let catalog = catalog();
        let group = catalog.service_groups()[0].clone();
        let directives = quality::compose(&mut edge(&catalog, EdgeSource::High), &group);

        let metric_positions: Vec<usize> = directives
            .iter()
            .enumerate()
            .filter(|(_, d)| d.kind() == "metric")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(metric_positions.len(), 3);
        for i in metric_positions {
            assert_eq!(directives[i + 1].kind(), "callout");
        }

        // High edge: complication 2.8 misses, mortality 1.4 and stay 6.0 hold.
        let tones: Vec<(Tone, &str)> = callouts(&directives);
        assert_eq!(
            tones,
            [
                (Tone::Error, "✗ Über Ziel"),
                (Tone::Success, "✓ Im Plan"),
                (Tone::Success, "✓ Im Plan"),
            ]
        );
    }

    #[test]
    fn test_quality_chart_and_comparison() {
        let catalog = catalog();
        let group = catalog.service_groups()[0].clone();
        let directives = quality::compose(&mut edge(&catalog, EdgeSource::Low), &group);

        let chart = directives.iter().find(|d| d.kind() == "line_chart");
        match chart {
            Some(Directive::LineChart {
                series, threshold, ..
            }) => {
                assert_eq!(series.len(), 2);
                assert!(series.iter().all(|s| s.points.len() == 12));
                let threshold = threshold.as_ref().unwrap();
                assert_eq!(threshold.value, 2.5);
                assert_eq!(threshold.label, "Zielwert");
            }
            other => panic!("expected line chart, got {other:?}"),
        }

        match directives.iter().find(|d| d.kind() == "table") {
            Some(Directive::Table { rows, .. }) => {
                assert_eq!(rows.len(), 8);
                assert!(rows.iter().all(|r| r[1..].iter().all(|m| m == "🟢")));
            }
            other => panic!("expected comparison table, got {other:?}"),
        }
    }

    #[test]
    fn test_quality_unknown_group() {
        let catalog = catalog();
        let directives = quality::compose(&mut edge(&catalog, EdgeSource::Low), "Zahnmedizin");

        assert_eq!(captions(&directives), ["Leistungsgruppe 'Zahnmedizin' nicht gefunden."]);
        assert_eq!(count_kind(&directives, "metric"), 0);
    }

    // ── Planning ──────────────────────────────────────────────────────────────

    #[test]
    fn test_planning_quarters_in_order() {
        let catalog = catalog();
        let directives = planning::compose(&mut edge(&catalog, EdgeSource::Low), now());

        assert_eq!(
            subheaders(&directives),
            [
                "Krankenhausreform Schleswig-Holstein: Zeitstrahl",
                "Q4 2025",
                "Q1 2026",
                "Q1 2027",
            ]
        );
        assert_eq!(count_kind(&directives, "divider"), 3);
        assert!(callouts(&directives).contains(&(
            Tone::Info,
            "🕐 15.12.2025 - Audits Qualitätskriterien (aktuell)"
        )));
        assert!(callouts(&directives).contains(&(
            Tone::Error,
            "🎯 01.01.2027 - Alle Leistungsgruppen in Kraft"
        )));

        let captions = captions(&directives);
        let footer = &captions[captions.len() - 3..];
        assert_eq!(footer[0], "Letzte Aktualisierung: 19.10.2026 14:30 Uhr");
        assert_eq!(footer[1], "Nächste Auto-Refresh: 19.10.2026 15:00 Uhr");
        assert!(footer[2].starts_with("Datenquellen:"));
    }

    /// The next refresh is the following full hour, also across midnight.
    #[test]
    fn test_planning_next_refresh_rolls_over_midnight() {
        let catalog = catalog();
        let late = NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 10)
            .unwrap();
        let directives = planning::compose(&mut edge(&catalog, EdgeSource::High), late);
        assert!(captions(&directives).contains(&"Nächste Auto-Refresh: 01.01.2027 00:00 Uhr"));
    }

    // ── Sidebar ───────────────────────────────────────────────────────────────

    #[test]
    fn test_sidebar_lists_conferences_info_and_goal() {
        let catalog = catalog();
        let directives = sidebar::compose(&catalog);

        assert_eq!(subheaders(&directives), ["📍 Regionalkonferenzen", "ℹ️ Info"]);
        assert_eq!(
            texts(&directives),
            ["• Flensburg", "• Kiel", "• Lübeck", "• Neumünster", "• Rendsburg"]
        );
        assert_eq!(count_kind(&directives, "divider"), 1);
        assert!(matches!(
            callouts(&directives).as_slice(),
            [(Tone::Info, text)] if text.starts_with("Dieses Dashboard zeigt")
        ));
        assert_eq!(
            captions(&directives),
            ["Ziel: 01.01.2027 - Alle Leistungsgruppen zugewiesen"]
        );
    }

    // ── Widgets ───────────────────────────────────────────────────────────────

    #[test]
    fn test_progress_helper() {
        assert_eq!(
            progress("leer", 0, 0),
            Directive::Progress {
                label: "leer".to_string(),
                current: 0,
                total: 0,
                percent: 0,
                tier: ProgressTier::Red,
            }
        );
        match progress("voll", 9, 10) {
            Directive::Progress { percent, tier, .. } => {
                assert_eq!(percent, 90);
                assert_eq!(tier, ProgressTier::Green);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_markers_and_numbers() {
        assert_eq!(status_marker(Status::Success), "🟢");
        assert_eq!(status_marker(Status::Warning), "🟡");
        assert_eq!(status_marker(Status::Critical), "🔴");
        assert_eq!(status_marker(Status::Pending), "⚪");

        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(245_000), "245,000");
    }
}

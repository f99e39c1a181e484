//! Krankenhausreform Schleswig-Holstein: interactive Ratatui dashboard
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  [1] Überblick  [2] Regional  [3] Standorte  [4] Qualität  [5] ...  │
//!   ├─── selector ────────────────────────────────────────────────────────┤
//!   │  Region auswählen:  ◀ Kiel ▶  (2/5)                                 │
//!   ├─── page ──────────────────────────────────────────┬─── sidebar ─────┤
//!   │  directive stream of the selected page, scrollable │  conferences,   │
//!   │  (line charts drawn in a chart panel below)        │  info, goal     │
//!   ├────────────────────────────────────────────────────┴─────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘

use std::{io, path::PathBuf, time::Duration};

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame, Terminal,
};

use reform_catalog::Catalog;
use reform_contracts::{
    directive::{ChartSeries, Directive, LineStyle, ProgressTier, Threshold, Tone},
    error::ReformResult,
    status::{AlertPriority, Status},
};
use reform_core::{DataProvider, RandomSource, StdRandom};
use reform_dashboard::{
    render_page, sidebar,
    widgets::{priority_marker, status_marker},
    Page, Selection,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "reform-tui",
    about = "Interactive terminal dashboard for the Krankenhausreform Schleswig-Holstein"
)]
struct Args {
    /// Load reference tables from this TOML file instead of the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Seed the random source for reproducible figures.
    #[arg(long)]
    seed: Option<u64>,
}

// ── App state ─────────────────────────────────────────────────────────────────

struct App<'a> {
    catalog: &'a Catalog,
    provider: DataProvider<'a>,
    page: Page,
    selection: Selection,

    // Output of the most recent render.
    directives: Vec<Directive>,
    // Side panel; depends on the catalog only.
    sidebar: Vec<Directive>,
    rendered_at: NaiveDateTime,

    // First visible line of the page panel.
    scroll: u16,
}

impl<'a> App<'a> {
    fn new(catalog: &'a Catalog, rng: Box<dyn RandomSource + 'a>) -> Self {
        let now = Local::now().naive_local();
        let mut app = Self {
            catalog,
            provider: DataProvider::new(catalog, rng, now.date()),
            page: Page::Overview,
            selection: Selection::default(),
            directives: Vec::new(),
            sidebar: sidebar::compose(catalog),
            rendered_at: now,
            scroll: 0,
        };
        app.refresh();
        app
    }

    /// Render the current page with fresh figures.
    fn refresh(&mut self) {
        self.rendered_at = Local::now().naive_local();
        self.directives = render_page(
            self.page,
            &self.selection,
            &mut self.provider,
            self.rendered_at,
        );
        self.scroll = 0;
    }

    fn select_page(&mut self, page: Page) {
        self.page = page;
        self.refresh();
    }

    /// Move the page's selector `step` entries forward (negative: backward), wrapping.
    fn cycle_selector(&mut self, step: isize) {
        let Some(kind) = self.page.selector() else {
            return;
        };
        let options = kind.options(self.catalog);
        if options.is_empty() {
            return;
        }
        let current = self
            .selection
            .resolve(kind, self.catalog)
            .and_then(|value| options.iter().position(|o| *o == value))
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(options.len() as isize) as usize;
        self.selection.set(kind, options[next].clone());
        self.refresh();
    }

    /// Prompt, current value, 1-based position and option count.
    fn selector_state(&self) -> Option<(&'static str, String, usize, usize)> {
        let kind = self.page.selector()?;
        let options = kind.options(self.catalog);
        let value = self.selection.resolve(kind, self.catalog)?;
        let position = options.iter().position(|o| *o == value).map_or(0, |i| i + 1);
        Some((kind.prompt(), value, position, options.len()))
    }

    fn scroll_by(&mut self, delta: i32) {
        self.scroll = (i32::from(self.scroll) + delta).clamp(0, i32::from(u16::MAX)) as u16;
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    // Split into: header, selector, page body, footer.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // selector
            Constraint::Min(10),   // page
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_header(f, chunks[0], app);
    render_selector(f, chunks[1], app);
    // Page body on the left, sidebar on the right.
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(SIDEBAR_WIDTH)])
        .split(chunks[2]);

    render_page_body(f, middle[0], app);
    render_sidebar(f, middle[1], app);
    render_footer(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span> = vec![Span::styled("Krankenhausreform SH    ", title_style)];

    for (i, page) in Page::ALL.into_iter().enumerate() {
        let style = if app.page == page {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}] {}  ", i + 1, page.title()), style));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_selector(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.selector_state() {
        Some((prompt, value, position, count)) => Line::from(vec![
            Span::styled(format!(" {prompt}  "), Style::default().fg(Color::Gray)),
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  ({position}/{count})"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        None => Line::from(Span::styled(
            " Keine Auswahl auf dieser Seite",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let selector = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(selector, area);
}

fn render_page_body(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app.directives.iter().flat_map(directive_lines).collect();

    // Pages with a line chart get a chart panel under the text.
    let chart = app.directives.iter().find_map(|d| match d {
        Directive::LineChart {
            title,
            x_label,
            y_label,
            series,
            threshold,
        } => Some((title, x_label, y_label, series, threshold.as_ref())),
        _ => None,
    });
    let (text_area, chart_area) = match chart {
        Some(_) => {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(6), Constraint::Length(CHART_HEIGHT)])
                .split(area);
            (split[0], Some(split[1]))
        }
        None => (area, None),
    };

    let block = Block::default()
        .title(format!(
            " {}  ·  {} ",
            app.page.title(),
            app.rendered_at.format("%d.%m.%Y %H:%M:%S")
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(paragraph, text_area);

    if let (Some((title, x_label, y_label, series, threshold)), Some(chart_area)) =
        (chart, chart_area)
    {
        render_line_chart(f, chart_area, title, x_label, y_label, series, threshold);
    }
}

fn render_line_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[ChartSeries],
    threshold: Option<&Threshold>,
) {
    let lines = plot_lines(series, threshold);
    let datasets: Vec<Dataset> = lines
        .iter()
        .map(|line| {
            Dataset::default()
                .name(line.name.clone())
                .marker(line.marker)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(line.color))
                .data(&line.points)
        })
        .collect();

    let (low, high) = value_range(series, threshold);
    let last_x = series
        .iter()
        .map(|s| s.points.len().saturating_sub(1))
        .max()
        .unwrap_or(0) as f64;
    let x_labels: Vec<String> = series
        .first()
        .map(|s| {
            [s.points.first(), s.points.last()]
                .into_iter()
                .flatten()
                .map(|p| p.x.clone())
                .collect()
        })
        .unwrap_or_default();
    let gray = Style::default().fg(Color::Gray);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .x_axis(
            Axis::default()
                .title(x_label.to_string())
                .style(gray)
                .bounds([0.0, last_x.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(y_label.to_string())
                .style(gray)
                .bounds([low, high])
                .labels(vec![format!("{low:.1}"), format!("{high:.1}")]),
        );
    f.render_widget(chart, area);
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app.sidebar.iter().flat_map(directive_lines).collect();
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Navigation ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = vec![
        Span::styled(" [1-5] ", Style::default().fg(Color::Cyan)),
        Span::raw("Seite  "),
    ];
    if app.page.selector().is_some() {
        spans.push(Span::styled("[←/→] ", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw("Auswahl  "));
    }
    spans.extend([
        Span::styled("[↑/↓] ", Style::default().fg(Color::Cyan)),
        Span::raw("Scrollen  "),
        Span::styled("[r] ", Style::default().fg(Color::Cyan)),
        Span::raw("Neu generieren  "),
        Span::styled("[q] ", Style::default().fg(Color::Cyan)),
        Span::raw("Beenden"),
    ]);

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

// ── Directive → text lines ────────────────────────────────────────────────────

const BAR_WIDTH: usize = 30;
const SIDEBAR_WIDTH: u16 = 34;
const CHART_HEIGHT: u16 = 14;

fn status_color(status: Status) -> Color {
    match status {
        Status::Success => Color::Green,
        Status::Warning => Color::Yellow,
        Status::Critical => Color::Red,
        Status::Pending => Color::Gray,
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Info => Color::Blue,
        Tone::Warning => Color::Yellow,
        Tone::Error => Color::Red,
        Tone::Plain => Color::White,
    }
}

fn tier_color(tier: ProgressTier) -> Color {
    match tier {
        ProgressTier::Green => Color::Green,
        ProgressTier::Yellow => Color::Yellow,
        ProgressTier::Red => Color::Red,
    }
}

fn directive_lines(directive: &Directive) -> Vec<Line<'static>> {
    let gray = Style::default().fg(Color::Gray);
    match directive {
        Directive::Header { text } => vec![
            Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ],
        Directive::Subheader { text } => vec![
            Line::from(""),
            Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ],
        Directive::Text { text } => vec![Line::from(format!("  {text}"))],
        Directive::Caption { text } => vec![Line::from(Span::styled(
            format!("  {text}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))],
        Directive::Metric {
            label,
            value,
            delta,
        } => {
            let mut spans = vec![
                Span::styled(format!("  {label}: "), gray),
                Span::styled(value.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ];
            if let Some(delta) = delta {
                let color = if delta.starts_with('+') {
                    Color::Green
                } else {
                    Color::Gray
                };
                spans.push(Span::styled(format!("  {delta}"), Style::default().fg(color)));
            }
            vec![Line::from(spans)]
        }
        Directive::Progress {
            label,
            current,
            total,
            percent,
            tier,
        } => {
            let filled = (*percent).min(100) as usize * BAR_WIDTH / 100;
            vec![
                Line::from(Span::styled(format!("  {label}"), gray)),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled("█".repeat(filled), Style::default().fg(tier_color(*tier))),
                    Span::styled(
                        "░".repeat(BAR_WIDTH - filled),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!(" {current}/{total} ({percent}%)"),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
            ]
        }
        Directive::Callout { tone, text } => {
            let style = Style::default().fg(tone_color(*tone));
            text.lines()
                .map(|line| {
                    Line::from(vec![
                        Span::styled("  ▌ ", style),
                        Span::styled(line.to_string(), style),
                    ])
                })
                .collect()
        }
        Directive::AlertBox {
            priority,
            region,
            issue,
            hospital,
            deadline,
        } => {
            let color = match priority {
                AlertPriority::Critical => Color::Red,
                AlertPriority::Warning => Color::Yellow,
            };
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("  {} {region}", priority_marker(*priority)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("     {issue}")),
            ];
            if let Some(hospital) = hospital {
                lines.push(Line::from(Span::styled(format!("     Krankenhaus: {hospital}"), gray)));
            }
            lines.push(Line::from(Span::styled(format!("     Frist: {deadline}"), gray)));
            lines
        }
        Directive::GeoScatter { points } => points
            .iter()
            .map(|point| {
                Line::from(vec![
                    Span::styled("  ● ", Style::default().fg(status_color(point.status))),
                    Span::styled(
                        format!("{:<12}", point.label),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("{:.1}°N {:.1}°E  ", point.lat, point.lon), gray),
                    Span::raw(point.hover.iter().skip(2).cloned().collect::<Vec<_>>().join(" · ")),
                ])
            })
            .collect(),
        Directive::LineChart {
            title,
            series,
            threshold,
            ..
        } => {
            let mut lines = vec![Line::from(Span::styled(
                format!("  📈 {title}"),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            for line in plot_lines(series, threshold.as_ref()) {
                lines.push(Line::from(vec![
                    Span::styled("  ━━ ", Style::default().fg(line.color)),
                    Span::styled(line.name, gray),
                ]));
            }
            lines
        }
        Directive::Table { columns, rows } => table_lines(columns, rows),
        Directive::Divider => vec![Line::from(Span::styled(
            "─".repeat(60),
            Style::default().fg(Color::DarkGray),
        ))],
    }
}

/// One dataset of the chart panel; x is the point index.
struct PlotLine {
    name: String,
    color: Color,
    marker: Marker,
    points: Vec<(f64, f64)>,
}

/// Series in order, followed by the threshold drawn across the full x range.
fn plot_lines(series: &[ChartSeries], threshold: Option<&Threshold>) -> Vec<PlotLine> {
    let mut lines: Vec<PlotLine> = series
        .iter()
        .map(|s| {
            let (color, marker) = match s.style {
                LineStyle::Solid => (Color::Cyan, Marker::Braille),
                LineStyle::Dashed => (Color::Gray, Marker::Dot),
            };
            PlotLine {
                name: s.name.clone(),
                color,
                marker,
                points: s
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (i as f64, p.y))
                    .collect(),
            }
        })
        .collect();

    if let Some(threshold) = threshold {
        let last_x = series
            .iter()
            .map(|s| s.points.len().saturating_sub(1))
            .max()
            .unwrap_or(0) as f64;
        lines.push(PlotLine {
            name: format!("{} ({:.1})", threshold.label, threshold.value),
            color: Color::Red,
            marker: Marker::Dot,
            points: vec![(0.0, threshold.value), (last_x, threshold.value)],
        });
    }
    lines
}

/// Y-axis bounds covering every point and the threshold, padded by 10 %.
fn value_range(series: &[ChartSeries], threshold: Option<&Threshold>) -> (f64, f64) {
    let (low, high) = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.y))
        .chain(threshold.map(|t| t.value))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((high - low) * 0.1).max(0.1);
    (low - pad, high + pad)
}

fn table_lines(columns: &[String], rows: &[Vec<String>]) -> Vec<Line<'static>> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }
    let pad = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("  {}", pad(columns)),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))];
    lines.extend(rows.iter().map(|row| Line::from(format!("  {}", pad(row.as_slice())))));
    lines
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> ReformResult<()> {
    let args = Args::parse();

    // Load the catalog before touching the terminal so errors print normally.
    let catalog = match &args.catalog {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin()?,
    };
    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(StdRandom::seeded(seed)),
        None => Box::new(StdRandom::from_entropy()),
    };

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Best-effort terminal restore on panic.
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(&catalog, rng);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            // Quit.
            KeyCode::Char('q') | KeyCode::Char('Q') => break,
            // Ctrl-C also quits.
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,

            // Page selection.
            KeyCode::Char(c @ '1'..='5') => {
                if let Ok(page) = c.to_string().parse::<Page>() {
                    app.select_page(page);
                }
            }

            // Selector.
            KeyCode::Left => app.cycle_selector(-1),
            KeyCode::Right => app.cycle_selector(1),

            // Regenerate figures.
            KeyCode::Char('r') | KeyCode::Char('R') => app.refresh(),

            // Scrolling.
            KeyCode::Up => app.scroll_by(-1),
            KeyCode::Down => app.scroll_by(1),
            KeyCode::PageUp => app.scroll_by(-10),
            KeyCode::PageDown => app.scroll_by(10),
            KeyCode::Home => app.scroll = 0,

            _ => {}
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

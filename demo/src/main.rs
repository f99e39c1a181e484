//! Krankenhausreform Schleswig-Holstein: dashboard CLI
//!
//! Renders dashboard pages as text or JSON directive streams and runs the
//! record verifier over generated data.
//!
//! Usage:
//!   cargo run -p demo -- render regional --region Kiel
//!   cargo run -p demo -- render quality --service-group Urologie --format json
//!   cargo run -p demo -- render-all --seed 42
//!   cargo run -p demo -- sidebar
//!   cargo run -p demo -- check --rounds 50

mod text;

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reform_catalog::Catalog;
use reform_contracts::{
    directive::Directive,
    error::{ReformError, ReformResult},
};
use reform_core::{DataProvider, RandomSource, StdRandom};
use reform_dashboard::{render_page, sidebar, Page, Selection, SelectorKind};
use reform_verify::RecordVerifier;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Hospital reform dashboard on the command line.
///
/// All figures are synthetic and regenerated on every run unless `--seed`
/// is given.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Krankenhausreform Schleswig-Holstein dashboard CLI",
    long_about = "Prints dashboard pages as text or JSON directive streams and checks\n\
                  generated records against the structural and semantic rules."
)]
struct Cli {
    /// Load reference tables from this TOML file instead of the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Seed the random source for reproducible output.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one page.
    Render {
        /// overview, regional, locations, quality, planning (or 1-5).
        page: String,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        hospital: Option<String>,
        #[arg(long = "service-group")]
        service_group: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Render all five pages with their default selections.
    RenderAll {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the side panel (regional conferences, info, program goal).
    Sidebar {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Generate every record `rounds` times and verify it. Exits 1 on any failure.
    Check {
        #[arg(long, default_value_t = 10)]
        rounds: u64,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when a verification round failed.
fn run(cli: Cli) -> ReformResult<bool> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin()?,
    };
    let now = Local::now().naive_local();

    match cli.command {
        Command::Render {
            page,
            region,
            hospital,
            service_group,
            format,
        } => {
            let page: Page = page.parse()?;
            let selection = Selection {
                region,
                hospital,
                service_group,
            };
            selection.validate(&catalog)?;
            let mut provider = provider(&catalog, cli.seed, now);
            let directives = render_page(page, &selection, &mut provider, now);
            emit(&[(page, directives)], format)?;
            Ok(true)
        }
        Command::RenderAll { format } => {
            let mut provider = provider(&catalog, cli.seed, now);
            let selection = Selection::default();
            let rendered: Vec<(Page, Vec<Directive>)> = Page::ALL
                .into_iter()
                .map(|page| (page, render_page(page, &selection, &mut provider, now)))
                .collect();
            emit(&rendered, format)?;
            Ok(true)
        }
        Command::Sidebar { format } => {
            let directives = sidebar::compose(&catalog);
            match format {
                Format::Text => println!("{}", text::render(&directives)),
                Format::Json => println!("{}", to_json(&directives)?),
            }
            Ok(true)
        }
        Command::Check { rounds } => check(&catalog, cli.seed, rounds, now),
    }
}

fn provider(catalog: &Catalog, seed: Option<u64>, now: NaiveDateTime) -> DataProvider<'_> {
    let rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(StdRandom::seeded(seed)),
        None => Box::new(StdRandom::from_entropy()),
    };
    DataProvider::new(catalog, rng, now.date())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn emit(pages: &[(Page, Vec<Directive>)], format: Format) -> ReformResult<()> {
    match format {
        Format::Text => {
            for (page, directives) in pages {
                println!("{}", "#".repeat(72));
                println!("# {page}");
                println!("{}", text::render(directives));
                println!();
            }
        }
        Format::Json => {
            let document: Vec<_> = pages
                .iter()
                .map(|(page, directives)| {
                    json!({
                        "page": page.slug(),
                        "selector": page.selector().map(SelectorKind::as_str),
                        "directives": directives,
                    })
                })
                .collect();
            println!("{}", to_json(&document)?);
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> ReformResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ReformError::Io {
        reason: format!("failed to serialize directives: {e}"),
    })
}

// ── Verification ──────────────────────────────────────────────────────────────

fn check(catalog: &Catalog, seed: Option<u64>, rounds: u64, now: NaiveDateTime) -> ReformResult<bool> {
    let verifier = RecordVerifier::new(catalog)?;
    let mut failed_rounds = 0;
    let mut checked = 0;

    for round in 0..rounds {
        let mut provider = provider(catalog, seed.map(|s| s.wrapping_add(round)), now);
        let report = verifier.verify_round(&mut provider);
        checked += report.checked;
        if !report.passed() {
            failed_rounds += 1;
            println!("Round {round}: FAIL ({} failures)", report.failures.len());
            for failure in &report.failures {
                println!("  [{}] {}: {}", failure.rule_id, failure.subject, failure.message);
            }
        }
    }

    info!(rounds, checked, failed_rounds, "verification finished");
    println!(
        "{rounds} rounds, {checked} records checked, {failed_rounds} rounds failed."
    );
    Ok(failed_rounds == 0)
}

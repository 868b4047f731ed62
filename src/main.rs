//! u-timetable - weekly course timetable generator
//!
//! Wires together:
//! - Catalog configuration (TOML, or the built-in reference catalog)
//! - Course ingestion (JSON, CSV, or a branch/semester tree of CSV files)
//! - The generation pipeline
//! - Terminal or JSON output, plus an optional spreadsheet per run
//!
//! Scheduling shortfalls are logged and reported, never fatal. Only I/O and
//! configuration problems produce a non-zero exit status.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::num::NonZeroU32;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_timetable::catalog::SlotCatalog;
use u_timetable::config::load_config;
use u_timetable::ingest::load_courses;
use u_timetable::render::{to_json, write_workbook, CatalogView, TimetableView};
use u_timetable::scheduler::{RandomDays, TimetablePipeline, TimetableReport};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Terminal grid per group, with course details
    Grid,
    /// JSON export of timetable, allocations, warnings and report
    Json,
}

/// u-timetable - Generate weekly course timetables per branch and semester
#[derive(Parser, Debug)]
#[command(name = "u-timetable", version)]
#[command(about = "Generate weekly course timetables per branch and semester", long_about = None)]
struct Args {
    /// Course records: JSON array, CSV file, or a `<branch>/semN/*.csv` tree
    #[arg(long, required_unless_present = "check_config")]
    courses: Option<PathBuf>,

    /// Catalog configuration file (default: built-in reference catalog)
    #[arg(short, long, env = "U_TIMETABLE_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for the day selector (default: OS entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the catalog's retry budget (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_retries: Option<u32>,

    /// Also write the timetable to this spreadsheet, one sheet per group
    #[arg(long)]
    workbook: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Grid)]
    format: Format,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Validate the configuration, print a summary and exit
    #[arg(long)]
    check_config: bool,
}

fn load_catalog(args: &Args) -> Result<SlotCatalog> {
    let Some(path) = &args.config else {
        info!("Using reference catalog");
        return Ok(SlotCatalog::reference());
    };

    let catalog = load_config(path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;

    info!(
        config_path = %path.display(),
        days = catalog.days().len(),
        slots = catalog.slot_count(),
        "Configuration loaded"
    );
    Ok(catalog)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so JSON output stays clean
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let catalog = load_catalog(&args)?;

    if args.check_config {
        print!("{}", CatalogView(&catalog));
        return Ok(());
    }

    let Some(courses_path) = &args.courses else {
        anyhow::bail!("--courses is required");
    };
    let courses = load_courses(courses_path)
        .with_context(|| format!("Failed to load courses from {:?}", courses_path))?;

    info!(
        courses_path = %courses_path.display(),
        course_count = courses.len(),
        "Courses loaded"
    );

    let mut selector = match args.seed {
        Some(seed) => RandomDays::seeded(seed),
        None => RandomDays::from_entropy(),
    };

    let mut pipeline = TimetablePipeline::new(&catalog);
    if let Some(max_retries) = args.max_retries.and_then(NonZeroU32::new) {
        pipeline = pipeline.with_max_retries(max_retries);
    }
    let outcome = pipeline.generate(&courses, &mut selector);

    match args.format {
        Format::Grid => print!("{}", TimetableView::new(&outcome.timetable, &catalog)),
        Format::Json => {
            let json = to_json(&outcome, &catalog).context("Failed to encode JSON")?;
            println!("{json}");
        }
    }

    if let Some(path) = &args.workbook {
        write_workbook(&outcome.timetable, &catalog, path)
            .with_context(|| format!("Failed to write workbook to {:?}", path))?;
        info!(workbook_path = %path.display(), "Workbook written");
    }

    let report = TimetableReport::calculate(&outcome, &catalog);
    let unmet: u32 = report
        .groups
        .iter()
        .flat_map(|g| g.unmet.iter())
        .map(|u| u.unmet)
        .sum();
    if unmet > 0 {
        warn!(unmet, "Some sessions could not be placed");
    }

    info!(
        groups = report.groups.len(),
        fill_rate = report.fill_rate,
        warnings = report.warning_count,
        "Done"
    );

    Ok(())
}

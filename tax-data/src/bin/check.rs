use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_data::TaxBracketLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validate a rate schedule CSV and compare it with the builtin tables.
///
/// The CSV file should have the following columns:
/// - tax_year: The tax year (e.g., 2025)
/// - schedule: The IRS schedule code (X, Y-1, Y-2, Z)
/// - min_income: First whole dollar of the bracket
/// - max_income: Last whole dollar of the bracket (empty for unlimited)
/// - rate: The marginal tax rate as a decimal (e.g., 0.10)
#[derive(Parser, Debug)]
#[command(name = "tax-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing tax bracket data
    #[arg(short, long)]
    file: PathBuf,

    /// Exit with an error when a schedule differs from the builtin tables
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = TaxBracketLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;
    info!("Parsed {} records from CSV", records.len());

    let schedules = TaxBracketLoader::into_schedules(&records)
        .with_context(|| format!("Invalid schedules in: {}", args.file.display()))?;
    info!("{} schedules are valid partitions", schedules.len());

    let differences = TaxBracketLoader::differences_from_builtin(&schedules);
    for (year, status) in &differences {
        info!("{year} {status} differs from the builtin schedule");
    }

    if args.strict && !differences.is_empty() {
        anyhow::bail!(
            "{} schedule(s) differ from the builtin tables",
            differences.len()
        );
    }

    println!(
        "{}: {} schedules checked, {} differ from builtin tables",
        args.file.display(),
        schedules.len(),
        differences.len()
    );

    Ok(())
}

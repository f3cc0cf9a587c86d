use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tax_core::{FilingStatus, TaxCalculationParams, TaxYear};

use crate::{
    config::{OutputFormat, Overrides},
    utils::parse_decimal,
};

/// Federal income tax calculator for tax years 2024 and 2025.
///
/// Computes AGI, the larger of the standard or itemized deduction, bracket
/// tax, the child tax credit, the earned income credit, and the refund or
/// amount owed.
#[derive(Debug, Parser)]
#[command(name = "taxcalc", version)]
pub struct Cli {
    /// TOML config file supplying defaults for the flags below.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter such as `debug` or `warn,tax_core=trace`. `RUST_LOG` wins.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append logs to this file as well as stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Bracket CSV replacing the built-in schedules for the selected year.
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Report format.
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Shorthand for `--output json`.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate one return.
    Calculate(CalculateArgs),

    /// Calculate every return in a CSV file.
    Batch {
        /// CSV of returns (`tax_year,filing_status,wages,...`).
        #[arg(long)]
        file: PathBuf,
    },

    /// Print the bracket schedule for a year and filing status.
    Brackets {
        #[arg(long, value_parser = parse_year)]
        year: Option<TaxYear>,

        #[arg(long, value_parser = parse_status)]
        status: Option<FilingStatus>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CalculateArgs {
    /// Tax year (2024 or 2025). Defaults to the config file, then 2025.
    #[arg(long, value_parser = parse_year)]
    pub year: Option<TaxYear>,

    /// Filing status: S, MFJ, MFS or HOH.
    #[arg(long, value_parser = parse_status)]
    pub status: Option<FilingStatus>,

    /// W-2 wages, e.g. `50000` or `$50,000.00`.
    #[arg(long, value_parser = parse_decimal)]
    pub wages: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub other_income: Decimal,

    /// Above-the-line adjustments.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub adjustments: Decimal,

    /// Itemized deductions; the standard deduction is used when larger.
    #[arg(long, value_parser = parse_decimal)]
    pub itemized: Option<Decimal>,

    /// Qualifying children.
    #[arg(long, default_value_t = 0)]
    pub dependents: u32,

    /// Federal income tax already withheld.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub withholding: Decimal,
}

impl CalculateArgs {
    pub fn to_params(
        &self,
        tax_year: TaxYear,
        filing_status: FilingStatus,
    ) -> TaxCalculationParams {
        TaxCalculationParams {
            tax_year,
            filing_status,
            wages: self.wages,
            other_income: self.other_income,
            adjustments: self.adjustments,
            itemized_deductions: self.itemized,
            dependents: self.dependents,
            withholding: self.withholding,
        }
    }
}

fn parse_year(s: &str) -> Result<TaxYear, String> {
    s.parse::<TaxYear>().map_err(|e| e.to_string())
}

fn parse_status(s: &str) -> Result<FilingStatus, String> {
    FilingStatus::parse(s).map_err(|e| e.to_string())
}

impl Cli {
    /// Flag values that take precedence over the config file.
    pub fn overrides(&self) -> Overrides {
        let (tax_year, filing_status) = match &self.command {
            Command::Calculate(args) => (args.year, args.status),
            Command::Brackets { year, status } => (*year, *status),
            Command::Batch { .. } => (None, None),
        };

        Overrides {
            tax_year,
            filing_status,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            brackets_file: self.brackets.clone(),
            output: if self.json {
                Some(OutputFormat::Json)
            } else {
                self.output
            },
        }
    }
}

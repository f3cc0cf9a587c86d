//! CSV loader for batches of returns.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column                | Required | Type    | Notes                                   |
//! |-----------------------|----------|---------|-----------------------------------------|
//! | `tax_year`            | yes      | integer | `2024` or `2025`                        |
//! | `filing_status`       | yes      | string  | One of: `S`, `MFJ`, `MFS`, `HOH`        |
//! | `wages`               | yes      | decimal | e.g. `50000.00`                         |
//! | `other_income`        | no       | decimal | Empty or missing means 0                |
//! | `adjustments`         | no       | decimal | Empty or missing means 0                |
//! | `itemized_deductions` | no       | decimal | Empty means the standard deduction      |
//! | `dependents`          | no       | integer | Empty or missing means 0                |
//! | `withholding`         | no       | decimal | Empty or missing means 0                |
//!
//! ### Minimal example
//!
//! ```csv
//! tax_year,filing_status,wages
//! 2024,S,50000.00
//! ```
//!
//! ### Full example
//!
//! ```csv
//! tax_year,filing_status,wages,other_income,adjustments,itemized_deductions,dependents,withholding
//! 2024,MFJ,30000.00,5000.00,,,2,1200.00
//! 2025,S,100000.00,,2500.00,18000.00,0,14000.00
//! ```
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{FilingStatus, InvalidInputError, TaxCalculationParams, TaxYear};
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    tax_year: i32,
    filing_status: String,
    wages: Decimal,
    #[serde(default)]
    other_income: Option<Decimal>,
    #[serde(default)]
    adjustments: Option<Decimal>,
    #[serde(default)]
    itemized_deductions: Option<Decimal>,
    #[serde(default)]
    dependents: Option<u32>,
    #[serde(default)]
    withholding: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
///
/// Row numbers are 1-based (header = row 0).
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },

    #[error("unsupported tax year {year} on row {row}")]
    UnsupportedYear { year: i32, row: usize },

    #[error("row {row}: {source}")]
    InvalidInput {
        row: usize,
        #[source]
        source: InvalidInputError,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into validated calculation params.
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<TaxCalculationParams, CsvLoadError> {
    let filing_status = FilingStatus::parse(&row.filing_status).map_err(|_| {
        CsvLoadError::InvalidFilingStatus {
            status: row.filing_status.clone(),
            row: row_number,
        }
    })?;

    let tax_year =
        TaxYear::try_from(row.tax_year).map_err(|_| CsvLoadError::UnsupportedYear {
            year: row.tax_year,
            row: row_number,
        })?;

    let params = TaxCalculationParams {
        tax_year,
        filing_status,
        wages: row.wages,
        other_income: row.other_income.unwrap_or_default(),
        adjustments: row.adjustments.unwrap_or_default(),
        itemized_deductions: row.itemized_deductions,
        dependents: row.dependents.unwrap_or_default(),
        withholding: row.withholding.unwrap_or_default(),
    };

    params
        .validate()
        .map_err(|source| CsvLoadError::InvalidInput {
            row: row_number,
            source,
        })?;

    Ok(params)
}

/// Parse CSV text and return one [`TaxCalculationParams`] per row, in file
/// order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [CsvLoadError::InvalidFilingStatus] / [CsvLoadError::UnsupportedYear] –
///   if a row names an unknown status or year.
/// * [CsvLoadError::InvalidInput] – if a row holds a negative amount.
pub fn load_from_str(input: &str) -> Result<Vec<TaxCalculationParams>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    let params = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = params.len(), "loaded returns from CSV");
    Ok(params)
}

/// Reads a file from disk and delegates to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<TaxCalculationParams>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

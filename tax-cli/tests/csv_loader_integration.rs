//! Integration tests that exercise the loader against an on-disk fixture file.
//!
//! These complement the unit tests inside csv_loader.rs (which all use
//! inline string literals) by verifying that the full read-from-disk path
//! works end-to-end.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_cli::csv_loader;
use tax_core::{FilingStatus, TaxYear};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_returns.csv")
}

#[test]
fn test_load_fixture_file_succeeds() {
    let returns =
        csv_loader::load_from_file(&fixture_path()).expect("fixture file should load without error");

    assert_eq!(returns.len(), 3);
}

#[test]
fn test_load_fixture_first_row_single() {
    let returns = csv_loader::load_from_file(&fixture_path()).unwrap();
    let r = &returns[0];

    assert_eq!(r.tax_year, TaxYear::Y2024);
    assert_eq!(r.filing_status, FilingStatus::Single);
    assert_eq!(r.wages, dec!(50000.00));
    assert_eq!(r.other_income, dec!(0));
    assert!(r.itemized_deductions.is_none());
    assert_eq!(r.withholding, dec!(6000.00));
}

#[test]
fn test_load_fixture_second_row_mfj() {
    let returns = csv_loader::load_from_file(&fixture_path()).unwrap();
    let r = &returns[1];

    assert_eq!(r.tax_year, TaxYear::Y2025);
    assert_eq!(r.filing_status, FilingStatus::MarriedJoint);
    assert_eq!(r.dependents, 1);
}

#[test]
fn test_load_fixture_third_row_hoh() {
    let returns = csv_loader::load_from_file(&fixture_path()).unwrap();
    let r = &returns[2];

    assert_eq!(r.filing_status, FilingStatus::HeadOfHousehold);
    assert_eq!(r.dependents, 2);
    assert_eq!(r.withholding, dec!(1500.00));
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let bad_path = Path::new("/this/path/does/not/exist.csv");
    let result = csv_loader::load_from_file(bad_path);
    assert!(result.is_err());
}

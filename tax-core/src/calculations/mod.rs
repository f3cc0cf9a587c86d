//! Federal income tax calculation.
//!
//! The calculators are pure functions over [`crate::tables::YearTables`]
//! values; [`federal`] sequences them into a full return.

pub mod brackets;
pub mod child_tax_credit;
pub mod common;
pub mod deduction;
pub mod eitc;
pub mod federal;

pub use brackets::{BracketScheduleError, BracketTaxResult, calculate_bracket_tax, validate_schedule};
pub use child_tax_credit::child_tax_credit;
pub use deduction::{DeductionChoice, select_deduction};
pub use eitc::earned_income_credit;
pub use federal::{FederalTaxCalculator, calculate_federal_tax};

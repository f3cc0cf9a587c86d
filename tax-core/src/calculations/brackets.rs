//! Progressive tax over a marginal rate schedule.
//!
//! Bracket bounds are inclusive whole dollars, so a bounded bracket absorbs
//! `max - min + 1` dollars of taxable income. The walk stops as soon as the
//! income is used up and only brackets that taxed something are reported.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::brackets::calculate_bracket_tax;
//! use tax_core::TaxBracket;
//!
//! let brackets = vec![
//!     TaxBracket::new(dec!(0), Some(dec!(9999)), dec!(0.10)),
//!     TaxBracket::new(dec!(10000), None, dec!(0.20)),
//! ];
//!
//! let result = calculate_bracket_tax(dec!(15000), &brackets);
//!
//! assert_eq!(result.gross_tax, dec!(2000.00));
//! assert_eq!(result.breakdown.len(), 2);
//! assert_eq!(result.marginal_rate(), dec!(0.20));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::{BracketBreakdown, TaxBracket};

/// Reasons a rate schedule does not partition `[0, ∞)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    #[error("rate schedule is empty")]
    Empty,

    #[error("first bracket must start at 0, starts at {0}")]
    FirstBracketNotZero(Decimal),

    #[error("bracket {index} starts at {found}, expected {expected}")]
    Discontinuous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} has max {max} below min {min}")]
    InvertedBounds {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),

    #[error("last bracket must be unbounded")]
    BoundedTopBracket,

    #[error("bracket {index} has rate {rate} outside 0..=1")]
    InvalidRate { index: usize, rate: Decimal },
}

/// Checks that `brackets` is ascending, gap-free and ends unbounded.
pub fn validate_schedule(brackets: &[TaxBracket]) -> Result<(), BracketScheduleError> {
    let first = brackets.first().ok_or(BracketScheduleError::Empty)?;
    if !first.min_income.is_zero() {
        return Err(BracketScheduleError::FirstBracketNotZero(first.min_income));
    }

    let last_index = brackets.len() - 1;
    let mut expected_min = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(BracketScheduleError::InvalidRate {
                index,
                rate: bracket.tax_rate,
            });
        }

        if bracket.min_income != expected_min {
            return Err(BracketScheduleError::Discontinuous {
                index,
                expected: expected_min,
                found: bracket.min_income,
            });
        }

        match bracket.max_income {
            Some(max) if max < bracket.min_income => {
                return Err(BracketScheduleError::InvertedBounds {
                    index,
                    min: bracket.min_income,
                    max,
                });
            }
            Some(_) if index == last_index => return Err(BracketScheduleError::BoundedTopBracket),
            Some(max) => expected_min = max + Decimal::ONE,
            None if index != last_index => {
                return Err(BracketScheduleError::UnboundedBeforeEnd(index));
            }
            None => {}
        }
    }

    Ok(())
}

/// Gross tax and the per-bracket split that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTaxResult {
    pub gross_tax: Decimal,
    pub breakdown: Vec<BracketBreakdown>,
}

impl BracketTaxResult {
    /// Rate of the highest bracket that taxed any income, zero if none did.
    pub fn marginal_rate(&self) -> Decimal {
        self.breakdown
            .last()
            .map(|entry| entry.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Computes tax on `taxable_income` over `brackets`.
///
/// `brackets` must be ascending by `min_income`. Each bracket's tax is
/// rounded to cents and `gross_tax` is their sum, so the breakdown always
/// adds up to the totals.
///
/// # Arguments
///
/// * `taxable_income` - Income after deductions; zero or less taxes nothing
/// * `brackets` - A schedule accepted by [`validate_schedule`]
///
/// # Returns
///
/// Gross tax plus one [`BracketBreakdown`] per bracket that taxed income.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::calculate_bracket_tax;
/// use tax_core::{FilingStatus, TaxYear, YearTables};
///
/// let brackets = YearTables::builtin(TaxYear::Y2024).brackets(FilingStatus::Single);
/// let result = calculate_bracket_tax(dec!(35400), brackets);
///
/// assert_eq!(result.gross_tax, dec!(4015.98));
/// assert_eq!(result.breakdown.len(), 2);
/// assert_eq!(result.marginal_rate(), dec!(0.12));
/// ```
pub fn calculate_bracket_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> BracketTaxResult {
    let mut remaining = taxable_income;
    let mut gross_tax = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxed = match bracket.width() {
            Some(width) => width.min(remaining),
            None => remaining,
        };
        if taxed <= Decimal::ZERO {
            continue;
        }

        let tax = round_half_up(taxed * bracket.tax_rate);
        gross_tax += tax;
        remaining -= taxed;
        breakdown.push(BracketBreakdown {
            rate: bracket.tax_rate,
            income: taxed,
            tax,
        });
    }

    BracketTaxResult {
        gross_tax,
        breakdown,
    }
}

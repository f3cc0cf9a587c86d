//! Per-year bracket, deduction and credit tables.
//!
//! Each supported [`TaxYear`] maps to one [`YearTables`] value. The builtin
//! tables are built once on first use and never mutated; callers that need
//! a different schedule clone a builtin set and call
//! [`YearTables::replace_brackets`].

mod y2024;
mod y2025;

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::brackets::{BracketScheduleError, validate_schedule};
use crate::{ByFilingStatus, FilingStatus, TaxBracket, TaxYear};

static TABLES_2024: LazyLock<YearTables> = LazyLock::new(y2024::tables);
static TABLES_2025: LazyLock<YearTables> = LazyLock::new(y2025::tables);

/// Child tax credit parameters for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaxCreditParams {
    pub max_credit_per_child: Decimal,
    pub phase_out_threshold_joint: Decimal,
    /// Applies to every status other than married filing jointly.
    pub phase_out_threshold_other: Decimal,
    /// Credit reduction per dollar of AGI over the threshold, applied in
    /// whole $1,000 steps.
    pub phase_out_rate: Decimal,
}

impl ChildTaxCreditParams {
    pub fn phase_out_threshold(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        if status.is_joint() {
            self.phase_out_threshold_joint
        } else {
            self.phase_out_threshold_other
        }
    }
}

/// Earned income credit limits for one dependent count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EitcTier {
    pub max_credit: Decimal,
    pub income_limit_joint: Decimal,
    pub income_limit_other: Decimal,
}

impl EitcTier {
    pub fn new(
        max_credit: i64,
        income_limit_joint: i64,
        income_limit_other: i64,
    ) -> Self {
        Self {
            max_credit: dollars(max_credit),
            income_limit_joint: dollars(income_limit_joint),
            income_limit_other: dollars(income_limit_other),
        }
    }

    pub fn income_limit(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        if status.is_joint() {
            self.income_limit_joint
        } else {
            self.income_limit_other
        }
    }
}

/// Earned income credit tiers for 0, 1, 2 and 3-or-more dependents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EitcParams {
    pub tiers: [EitcTier; 4],
}

impl EitcParams {
    pub fn tier(
        &self,
        dependents: u32,
    ) -> &EitcTier {
        let index = (dependents as usize).min(self.tiers.len() - 1);
        &self.tiers[index]
    }
}

/// Everything the federal calculation needs for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTables {
    pub year: TaxYear,
    brackets: ByFilingStatus<Vec<TaxBracket>>,
    pub standard_deduction: ByFilingStatus<Decimal>,
    pub child_tax_credit: ChildTaxCreditParams,
    pub earned_income_credit: EitcParams,
}

impl YearTables {
    /// Returns the builtin tables for `year`.
    pub fn builtin(year: TaxYear) -> &'static YearTables {
        match year {
            TaxYear::Y2024 => &TABLES_2024,
            TaxYear::Y2025 => &TABLES_2025,
        }
    }

    /// Rate schedule for `status`, ascending by `min_income`.
    pub fn brackets(
        &self,
        status: FilingStatus,
    ) -> &[TaxBracket] {
        self.brackets.get(status)
    }

    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        *self.standard_deduction.get(status)
    }

    /// Swaps in a different rate schedule for one filing status.
    ///
    /// The schedule is sorted by `min_income` and must partition `[0, ∞)`.
    pub fn replace_brackets(
        &mut self,
        status: FilingStatus,
        mut brackets: Vec<TaxBracket>,
    ) -> Result<(), BracketScheduleError> {
        brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
        validate_schedule(&brackets)?;

        debug!(
            year = %self.year,
            status = status.as_str(),
            brackets = brackets.len(),
            "replacing rate schedule"
        );
        *self.brackets.get_mut(status) = brackets;
        Ok(())
    }
}

fn dollars(amount: i64) -> Decimal {
    Decimal::from(amount)
}

/// Builds a schedule from `(min, max, rate percent)` rows.
fn schedule(rows: &[(i64, Option<i64>, i64)]) -> Vec<TaxBracket> {
    rows.iter()
        .map(|&(min, max, percent)| {
            TaxBracket::new(dollars(min), max.map(dollars), Decimal::new(percent, 2))
        })
        .collect()
}

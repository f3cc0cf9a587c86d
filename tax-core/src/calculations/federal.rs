//! Federal income tax for a single return.
//!
//! # Calculation order
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Total income (wages + other income) |
//! | 2    | AGI (total income − adjustments, minimum 0) |
//! | 3    | Deduction (larger of standard and itemized) |
//! | 4    | Taxable income (AGI − deduction, minimum 0) |
//! | 5    | Gross tax and bracket breakdown |
//! | 6    | Effective rate (gross tax ÷ AGI, 0 when AGI is 0) and marginal rate |
//! | 7    | Child tax credit |
//! | 8    | Earned income credit |
//! | 9    | Total credits (line 7 + line 8) |
//! | 10   | Final liability (gross tax − credits, minimum 0) |
//! | 11   | Refund or owed (withholding − final liability) |
//!
//! Inputs are never rejected: negative intermediate values are floored at
//! zero. Use [`TaxCalculationParams::validate`] to reject bad input first.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{FilingStatus, TaxCalculationParams, TaxYear, calculate_federal_tax};
//!
//! let mut params = TaxCalculationParams::new(TaxYear::Y2024, FilingStatus::Single, dec!(50000));
//! params.withholding = dec!(6000);
//!
//! let result = calculate_federal_tax(&params);
//!
//! assert_eq!(result.taxable_income, dec!(35400));
//! assert_eq!(result.gross_tax, dec!(4015.98));
//! assert_eq!(result.refund_or_owed, dec!(1984.02));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::brackets::{BracketTaxResult, calculate_bracket_tax};
use crate::calculations::child_tax_credit::child_tax_credit;
use crate::calculations::common::{non_negative, ratio_or_zero};
use crate::calculations::deduction::{DeductionChoice, select_deduction};
use crate::calculations::eitc::earned_income_credit;
use crate::tables::YearTables;
use crate::{FilingStatus, TaxCalculationParams, TaxCalculationResult, TaxYear};

/// Calculates a federal return using the builtin tables for
/// `params.tax_year`.
pub fn calculate_federal_tax(params: &TaxCalculationParams) -> TaxCalculationResult {
    FederalTaxCalculator::for_year(params.tax_year).calculate(params)
}

/// Federal income tax calculator bound to one year's tables.
#[derive(Debug, Clone, Copy)]
pub struct FederalTaxCalculator<'a> {
    tables: &'a YearTables,
}

impl<'a> FederalTaxCalculator<'a> {
    pub fn new(tables: &'a YearTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a YearTables {
        self.tables
    }
}

impl FederalTaxCalculator<'static> {
    pub fn for_year(year: TaxYear) -> Self {
        Self::new(YearTables::builtin(year))
    }
}

impl FederalTaxCalculator<'_> {
    /// Runs every step of the calculation.
    ///
    /// The calculator's own tables are used even when `params.tax_year`
    /// names a different year; the mismatch is logged.
    pub fn calculate(
        &self,
        params: &TaxCalculationParams,
    ) -> TaxCalculationResult {
        if params.tax_year != self.tables.year {
            warn!(
                requested = %params.tax_year,
                tables = %self.tables.year,
                "tax year does not match calculator tables"
            );
        }

        let total_income = self.total_income(params.wages, params.other_income);
        let agi = self.adjusted_gross_income(total_income, params.adjustments);

        let standard_deduction = self.tables.standard_deduction(params.filing_status);
        let DeductionChoice {
            amount: deduction,
            used_itemized,
        } = select_deduction(standard_deduction, params.itemized_deductions);

        let taxable_income = self.taxable_income(agi, deduction);
        let bracket_tax = self.bracket_tax(taxable_income, params.filing_status);
        let marginal_rate = bracket_tax.marginal_rate();
        let BracketTaxResult {
            gross_tax,
            breakdown,
        } = bracket_tax;
        let effective_rate = ratio_or_zero(gross_tax, agi);

        let child_credit = child_tax_credit(
            agi,
            params.dependents,
            params.filing_status,
            &self.tables.child_tax_credit,
        );
        let eitc = earned_income_credit(
            agi,
            params.dependents,
            params.filing_status,
            &self.tables.earned_income_credit,
        );
        let total_credits = child_credit + eitc;

        let final_tax_liability = self.final_tax_liability(gross_tax, total_credits);
        let refund_or_owed = params.withholding - final_tax_liability;

        debug!(
            year = %self.tables.year,
            status = params.filing_status.as_str(),
            %agi,
            %taxable_income,
            %gross_tax,
            %total_credits,
            %refund_or_owed,
            "federal tax calculated"
        );

        TaxCalculationResult {
            total_income,
            adjusted_gross_income: agi,
            standard_deduction,
            total_deductions: deduction,
            used_itemized_deduction: used_itemized,
            taxable_income,
            gross_tax,
            bracket_breakdown: breakdown,
            effective_rate,
            marginal_rate,
            child_tax_credit: child_credit,
            earned_income_credit: eitc,
            total_credits,
            final_tax_liability,
            withholding: params.withholding,
            refund_or_owed,
        }
    }

    fn total_income(
        &self,
        wages: Decimal,
        other_income: Decimal,
    ) -> Decimal {
        wages + other_income
    }

    fn adjusted_gross_income(
        &self,
        total_income: Decimal,
        adjustments: Decimal,
    ) -> Decimal {
        let agi = total_income - adjustments;
        if agi < Decimal::ZERO {
            debug!(%total_income, %adjustments, "adjusted gross income floored at zero");
        }
        non_negative(agi)
    }

    fn taxable_income(
        &self,
        agi: Decimal,
        deduction: Decimal,
    ) -> Decimal {
        non_negative(agi - deduction)
    }

    fn bracket_tax(
        &self,
        taxable_income: Decimal,
        status: FilingStatus,
    ) -> BracketTaxResult {
        calculate_bracket_tax(taxable_income, self.tables.brackets(status))
    }

    /// Credits are non-refundable here: liability never drops below zero.
    fn final_tax_liability(
        &self,
        gross_tax: Decimal,
        total_credits: Decimal,
    ) -> Decimal {
        let liability = gross_tax - total_credits;
        if liability < Decimal::ZERO {
            debug!(
                %gross_tax,
                %total_credits,
                unused = %(total_credits - gross_tax),
                "credits exceed gross tax"
            );
        }
        non_negative(liability)
    }
}

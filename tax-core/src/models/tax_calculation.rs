use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FilingStatus, TaxYear};

/// Largest amount [`TaxCalculationParams::validate`] accepts in any field:
/// one trillion dollars.
///
/// Sums and products of amounts below this stay far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Error describing the first input field that holds an unusable value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("invalid input: {field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    #[error("invalid input: {field} must not exceed {max}, got {value}", max = MAX_AMOUNT)]
    TooLarge { field: &'static str, value: Decimal },
}

impl InvalidInputError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Negative { field, .. } | Self::TooLarge { field, .. } => field,
        }
    }
}

/// Inputs for a federal income tax calculation.
///
/// Monetary amounts are expected to be non-negative; see
/// [`TaxCalculationParams::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationParams {
    pub tax_year: TaxYear,
    pub filing_status: FilingStatus,
    pub wages: Decimal,
    #[serde(default)]
    pub other_income: Decimal,
    /// Above-the-line adjustments subtracted from total income.
    #[serde(default)]
    pub adjustments: Decimal,
    /// Total itemized deductions. `None` means the standard deduction applies.
    #[serde(default)]
    pub itemized_deductions: Option<Decimal>,
    #[serde(default)]
    pub dependents: u32,
    #[serde(default)]
    pub withholding: Decimal,
}

impl TaxCalculationParams {
    /// Builds params with every amount other than wages set to zero.
    pub fn new(
        tax_year: TaxYear,
        filing_status: FilingStatus,
        wages: Decimal,
    ) -> Self {
        Self {
            tax_year,
            filing_status,
            wages,
            other_income: Decimal::ZERO,
            adjustments: Decimal::ZERO,
            itemized_deductions: None,
            dependents: 0,
            withholding: Decimal::ZERO,
        }
    }

    /// Rejects monetary amounts that are negative or above [`MAX_AMOUNT`].
    ///
    /// The calculation itself clamps instead of failing, so callers taking
    /// input from loosely typed sources should run this first.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let fields = [
            ("wages", Some(self.wages)),
            ("other_income", Some(self.other_income)),
            ("adjustments", Some(self.adjustments)),
            ("itemized_deductions", self.itemized_deductions),
            ("withholding", Some(self.withholding)),
        ];

        for (field, value) in fields {
            let Some(value) = value else {
                continue;
            };
            if value < Decimal::ZERO {
                return Err(InvalidInputError::Negative { field, value });
            }
            if value > MAX_AMOUNT {
                return Err(InvalidInputError::TooLarge { field, value });
            }
        }

        Ok(())
    }
}

/// Income and tax attributed to a single bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    pub rate: Decimal,
    /// Portion of taxable income that fell into this bracket.
    pub income: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub total_income: Decimal,
    pub adjusted_gross_income: Decimal,
    pub standard_deduction: Decimal,
    /// The deduction actually applied (larger of standard and itemized).
    pub total_deductions: Decimal,
    pub used_itemized_deduction: bool,
    pub taxable_income: Decimal,
    pub gross_tax: Decimal,
    pub bracket_breakdown: Vec<BracketBreakdown>,
    /// Gross tax divided by AGI, as a fraction.
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub child_tax_credit: Decimal,
    pub earned_income_credit: Decimal,
    pub total_credits: Decimal,
    pub final_tax_liability: Decimal,
    pub withholding: Decimal,
    /// Positive when the taxpayer is owed a refund, negative when they owe.
    pub refund_or_owed: Decimal,
}

impl TaxCalculationResult {
    pub fn is_refund(&self) -> bool {
        self.refund_or_owed > Decimal::ZERO
    }

    /// Balance due from the taxpayer, zero when a refund is owed.
    pub fn amount_owed(&self) -> Decimal {
        if self.refund_or_owed < Decimal::ZERO {
            -self.refund_or_owed
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn params() -> TaxCalculationParams {
        TaxCalculationParams::new(TaxYear::Y2024, FilingStatus::Single, dec!(50000))
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_zero_and_positive_amounts() {
        let mut input = params();
        input.itemized_deductions = Some(dec!(0));

        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn validate_names_negative_wages() {
        let mut input = params();
        input.wages = dec!(-1);

        assert_eq!(
            input.validate(),
            Err(InvalidInputError::Negative {
                field: "wages",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_names_negative_itemized_deductions() {
        let mut input = params();
        input.itemized_deductions = Some(dec!(-250.50));

        let err = input.validate().unwrap_err();

        assert_eq!(err.field(), "itemized_deductions");
        assert_eq!(
            err.to_string(),
            "invalid input: itemized_deductions must not be negative, got -250.50"
        );
    }

    #[test]
    fn validate_reports_first_bad_field() {
        let mut input = params();
        input.adjustments = dec!(-5);
        input.withholding = dec!(-10);

        assert_eq!(input.validate().unwrap_err().field(), "adjustments");
    }

    #[test]
    fn max_amount_is_one_trillion() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000));
    }

    #[test]
    fn validate_accepts_max_amount() {
        let mut input = params();
        input.wages = MAX_AMOUNT;
        input.other_income = MAX_AMOUNT;

        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_amount_above_max() {
        let mut input = params();
        input.wages = Decimal::MAX;
        input.other_income = dec!(1);

        let err = input.validate().unwrap_err();

        assert_eq!(
            err,
            InvalidInputError::TooLarge {
                field: "wages",
                value: Decimal::MAX,
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid input: wages must not exceed 1000000000000, got 79228162514264337593543950335"
        );
    }

    #[test]
    fn validate_rejects_large_withholding() {
        let mut input = params();
        input.withholding = MAX_AMOUNT + dec!(0.01);

        assert_eq!(input.validate().unwrap_err().field(), "withholding");
    }

    #[test]
    fn validate_treats_negative_zero_as_zero() {
        let mut input = params();
        input.withholding = -dec!(0);

        assert_eq!(input.validate(), Ok(()));
    }

    // =========================================================================
    // serde tests
    // =========================================================================

    #[test]
    fn params_deserialize_with_defaults() {
        let json = r#"{"tax_year":2024,"filing_status":"married_joint","wages":"85000"}"#;

        let parsed: TaxCalculationParams = serde_json::from_str(json).unwrap();

        let mut expected =
            TaxCalculationParams::new(TaxYear::Y2024, FilingStatus::MarriedJoint, dec!(85000));
        expected.dependents = 0;
        assert_eq!(parsed, expected);
    }

    // =========================================================================
    // result helper tests
    // =========================================================================

    fn result_with(refund_or_owed: Decimal) -> TaxCalculationResult {
        TaxCalculationResult {
            total_income: dec!(0),
            adjusted_gross_income: dec!(0),
            standard_deduction: dec!(0),
            total_deductions: dec!(0),
            used_itemized_deduction: false,
            taxable_income: dec!(0),
            gross_tax: dec!(0),
            bracket_breakdown: Vec::new(),
            effective_rate: dec!(0),
            marginal_rate: dec!(0),
            child_tax_credit: dec!(0),
            earned_income_credit: dec!(0),
            total_credits: dec!(0),
            final_tax_liability: dec!(0),
            withholding: dec!(0),
            refund_or_owed,
        }
    }

    #[test]
    fn amount_owed_is_positive_balance_due() {
        let result = result_with(dec!(-1234.56));

        assert!(!result.is_refund());
        assert_eq!(result.amount_owed(), dec!(1234.56));
    }

    #[test]
    fn amount_owed_is_zero_for_refund() {
        let result = result_with(dec!(500));

        assert!(result.is_refund());
        assert_eq!(result.amount_owed(), dec!(0));
    }
}

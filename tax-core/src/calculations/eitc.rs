//! Earned income tax credit, simplified.
//!
//! The tier is picked by dependent count (0, 1, 2, 3+) and the income limit
//! by joint vs. not-joint filing. Up to 70% of the limit the full tier credit
//! applies; from there it falls linearly to zero at the limit. There is no
//! phase-in region.

use rust_decimal::Decimal;
use tracing::trace;

use crate::FilingStatus;
use crate::calculations::common::{non_negative, round_half_up};
use crate::tables::EitcParams;

/// Share of the income limit at which the phase-out begins.
pub const PHASE_OUT_START_FRACTION: Decimal = Decimal::from_parts(70, 0, 0, false, 2);

/// Earned income credit on the simplified curve.
///
/// # Arguments
///
/// * `agi` - Adjusted gross income, standing in for earned income
/// * `dependents` - Qualifying children; three or more share the top tier
/// * `status` - Filing status, selecting the joint or the other income limit
/// * `params` - The year's credit tiers
///
/// # Returns
///
/// The tier maximum up to 70% of the income limit, then a linear decline
/// rounded to cents, and zero above the limit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::earned_income_credit;
/// use tax_core::{FilingStatus, TaxYear, YearTables};
///
/// let params = &YearTables::builtin(TaxYear::Y2024).earned_income_credit;
///
/// assert_eq!(earned_income_credit(dec!(10000), 0, FilingStatus::Single, params), dec!(632));
/// assert_eq!(earned_income_credit(dec!(15000), 0, FilingStatus::Single, params), dec!(406.92));
/// assert_eq!(earned_income_credit(dec!(20000), 0, FilingStatus::Single, params), dec!(0));
/// ```
pub fn earned_income_credit(
    agi: Decimal,
    dependents: u32,
    status: FilingStatus,
    params: &EitcParams,
) -> Decimal {
    let tier = params.tier(dependents);
    let income_limit = tier.income_limit(status);

    if agi > income_limit {
        return Decimal::ZERO;
    }

    let phase_out_start = income_limit * PHASE_OUT_START_FRACTION;
    if agi <= phase_out_start {
        return tier.max_credit;
    }

    let remaining_share = (income_limit - agi) / (income_limit - phase_out_start);
    let credit = round_half_up(tier.max_credit * remaining_share);
    trace!(%agi, %income_limit, %phase_out_start, %credit, "earned income credit phase-out");

    non_negative(credit)
}

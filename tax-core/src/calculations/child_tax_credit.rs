//! Child tax credit with a stepped phase-out.
//!
//! The credit shrinks by `phase_out_rate × $1,000` for every started $1,000
//! of AGI above the threshold. Joint filers have their own threshold; all
//! other statuses share one.

use rust_decimal::Decimal;
use tracing::trace;

use crate::FilingStatus;
use crate::calculations::common::non_negative;
use crate::tables::ChildTaxCreditParams;

const PHASE_OUT_STEP: Decimal = Decimal::ONE_THOUSAND;

/// Child tax credit for `dependents` qualifying children.
///
/// # Arguments
///
/// * `agi` - Adjusted gross income
/// * `dependents` - Number of qualifying children
/// * `status` - Filing status, selecting the joint or the shared threshold
/// * `params` - The year's credit amounts and phase-out parameters
///
/// # Returns
///
/// `dependents × max_credit_per_child`, less the stepped phase-out, floored
/// at zero. The credit is non-refundable; capping it at the tax owed is left
/// to the caller.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::child_tax_credit;
/// use tax_core::{FilingStatus, TaxYear, YearTables};
///
/// let params = &YearTables::builtin(TaxYear::Y2024).child_tax_credit;
///
/// // $10,500 over the $400,000 joint threshold is 11 started steps of $50.
/// let credit = child_tax_credit(dec!(410500), 2, FilingStatus::MarriedJoint, params);
/// assert_eq!(credit, dec!(3450));
/// ```
pub fn child_tax_credit(
    agi: Decimal,
    dependents: u32,
    status: FilingStatus,
    params: &ChildTaxCreditParams,
) -> Decimal {
    let base_credit = Decimal::from(dependents) * params.max_credit_per_child;
    if base_credit.is_zero() {
        return Decimal::ZERO;
    }

    let threshold = params.phase_out_threshold(status);
    if agi <= threshold {
        return base_credit;
    }

    let steps = ((agi - threshold) / PHASE_OUT_STEP).ceil();
    let reduction = steps * (params.phase_out_rate * PHASE_OUT_STEP);
    trace!(%agi, %threshold, %steps, %reduction, "child tax credit phase-out");

    non_negative(base_credit - reduction)
}

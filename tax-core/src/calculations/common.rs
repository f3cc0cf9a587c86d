//! Rounding and clamping shared by the calculators.
//!
//! Every calculator rounds and floors through these helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, halves away from zero.
///
/// # Arguments
///
/// * `value` - The amount to round
///
/// # Returns
///
/// `value` with at most two decimal places; `0.005` rounds to `0.01`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors `value` at zero.
///
/// # Arguments
///
/// * `value` - The amount to clamp
///
/// # Returns
///
/// `value` when positive, otherwise `0`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-0.01)), dec!(0));
/// assert_eq!(non_negative(dec!(42.50)), dec!(42.50));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    if value > Decimal::ZERO { value } else { Decimal::ZERO }
}

/// `numerator / denominator`, or zero when the denominator is zero.
///
/// # Arguments
///
/// * `numerator` - Amount being measured, e.g. gross tax
/// * `denominator` - Base it is measured against, e.g. AGI
///
/// # Returns
///
/// The unrounded quotient as a fraction, or `0` for a zero denominator.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::ratio_or_zero;
///
/// assert_eq!(ratio_or_zero(dec!(25), dec!(100)), dec!(0.25));
/// assert_eq!(ratio_or_zero(dec!(25), dec!(0)), dec!(0));
/// ```
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

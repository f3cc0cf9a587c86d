//! Display helpers for amounts and rates.

use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_PERCENTAGE_DECIMALS: u32 = 1;

/// Formats `amount` as whole US dollars, e.g. `$1,234` or `-$56`.
///
/// Cents are rounded half away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format_currency;
///
/// assert_eq!(format_currency(dec!(50000)), "$50,000");
/// assert_eq!(format_currency(dec!(-4015.98)), "-$4,016");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let dollars = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = group_thousands(&dollars.abs().trunc().to_string());

    if dollars < Decimal::ZERO {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Formats a fractional `rate` as a percentage with exactly `decimals`
/// places, e.g. `0.0803196` with one decimal is `8.0%`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format_percentage;
///
/// assert_eq!(format_percentage(dec!(0.0803196), 1), "8.0%");
/// assert_eq!(format_percentage(dec!(0.22), 0), "22%");
/// ```
pub fn format_percentage(
    rate: Decimal,
    decimals: u32,
) -> String {
    let mut percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(decimals);
    format!("{percent}%")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

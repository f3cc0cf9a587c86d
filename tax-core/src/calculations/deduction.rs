use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The deduction applied against AGI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionChoice {
    pub amount: Decimal,
    pub used_itemized: bool,
}

/// Picks the larger of the standard deduction and the itemized total.
///
/// Without an itemized total the standard deduction applies. Ties go to the
/// standard deduction. The itemized figure is taken as given.
pub fn select_deduction(
    standard: Decimal,
    itemized: Option<Decimal>,
) -> DeductionChoice {
    match itemized {
        Some(itemized) if itemized > standard => DeductionChoice {
            amount: itemized,
            used_itemized: true,
        },
        _ => DeductionChoice {
            amount: standard,
            used_itemized: false,
        },
    }
}

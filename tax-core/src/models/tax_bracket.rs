use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal bracket of a rate schedule.
///
/// Bounds are inclusive whole dollars: a bracket covering `11601..=47150`
/// holds `47150 - 11601 + 1` dollars. The top bracket has no `max_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }

    /// Number of dollars this bracket can absorb, `None` for the top bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income
            .map(|max| max - self.min_income + Decimal::ONE)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_income.is_none()
    }
}

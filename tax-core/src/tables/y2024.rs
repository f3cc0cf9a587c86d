//! Tax year 2024 (Rev. Proc. 2023-34).

use rust_decimal::Decimal;

use super::{ChildTaxCreditParams, EitcParams, EitcTier, YearTables, dollars, schedule};
use crate::{ByFilingStatus, TaxYear};

pub(super) fn tables() -> YearTables {
    YearTables {
        year: TaxYear::Y2024,
        brackets: ByFilingStatus {
            single: schedule(&[
                (0, Some(11_600), 10),
                (11_601, Some(47_150), 12),
                (47_151, Some(100_525), 22),
                (100_526, Some(191_950), 24),
                (191_951, Some(243_725), 32),
                (243_726, Some(609_350), 35),
                (609_351, None, 37),
            ]),
            married_joint: schedule(&[
                (0, Some(23_200), 10),
                (23_201, Some(94_300), 12),
                (94_301, Some(201_050), 22),
                (201_051, Some(383_900), 24),
                (383_901, Some(487_450), 32),
                (487_451, Some(731_200), 35),
                (731_201, None, 37),
            ]),
            married_separate: schedule(&[
                (0, Some(11_600), 10),
                (11_601, Some(47_150), 12),
                (47_151, Some(100_525), 22),
                (100_526, Some(191_950), 24),
                (191_951, Some(243_725), 32),
                (243_726, Some(365_600), 35),
                (365_601, None, 37),
            ]),
            head_of_household: schedule(&[
                (0, Some(16_550), 10),
                (16_551, Some(63_100), 12),
                (63_101, Some(100_500), 22),
                (100_501, Some(191_950), 24),
                (191_951, Some(243_700), 32),
                (243_701, Some(609_350), 35),
                (609_351, None, 37),
            ]),
        },
        standard_deduction: ByFilingStatus {
            single: dollars(14_600),
            married_joint: dollars(29_200),
            married_separate: dollars(14_600),
            head_of_household: dollars(21_900),
        },
        child_tax_credit: ChildTaxCreditParams {
            max_credit_per_child: dollars(2_000),
            phase_out_threshold_joint: dollars(400_000),
            phase_out_threshold_other: dollars(200_000),
            phase_out_rate: Decimal::new(5, 2),
        },
        earned_income_credit: EitcParams {
            tiers: [
                EitcTier::new(632, 25_511, 18_591),
                EitcTier::new(4_213, 56_004, 49_084),
                EitcTier::new(6_960, 62_688, 55_768),
                EitcTier::new(7_830, 66_819, 59_899),
            ],
        },
    }
}

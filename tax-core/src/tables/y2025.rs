//! Tax year 2025.
//!
//! Brackets and earned income credit from Rev. Proc. 2024-40; standard
//! deduction and child tax credit as amended by Pub. L. 119-21.

use rust_decimal::Decimal;

use super::{ChildTaxCreditParams, EitcParams, EitcTier, YearTables, dollars, schedule};
use crate::{ByFilingStatus, TaxYear};

pub(super) fn tables() -> YearTables {
    YearTables {
        year: TaxYear::Y2025,
        brackets: ByFilingStatus {
            single: schedule(&[
                (0, Some(11_925), 10),
                (11_926, Some(48_475), 12),
                (48_476, Some(103_350), 22),
                (103_351, Some(197_300), 24),
                (197_301, Some(250_525), 32),
                (250_526, Some(626_350), 35),
                (626_351, None, 37),
            ]),
            married_joint: schedule(&[
                (0, Some(23_850), 10),
                (23_851, Some(96_950), 12),
                (96_951, Some(206_700), 22),
                (206_701, Some(394_600), 24),
                (394_601, Some(501_050), 32),
                (501_051, Some(751_600), 35),
                (751_601, None, 37),
            ]),
            married_separate: schedule(&[
                (0, Some(11_925), 10),
                (11_926, Some(48_475), 12),
                (48_476, Some(103_350), 22),
                (103_351, Some(197_300), 24),
                (197_301, Some(250_525), 32),
                (250_526, Some(375_800), 35),
                (375_801, None, 37),
            ]),
            head_of_household: schedule(&[
                (0, Some(17_000), 10),
                (17_001, Some(64_850), 12),
                (64_851, Some(103_350), 22),
                (103_351, Some(197_300), 24),
                (197_301, Some(250_500), 32),
                (250_501, Some(626_350), 35),
                (626_351, None, 37),
            ]),
        },
        standard_deduction: ByFilingStatus {
            single: dollars(15_750),
            married_joint: dollars(31_500),
            married_separate: dollars(15_750),
            head_of_household: dollars(23_625),
        },
        child_tax_credit: ChildTaxCreditParams {
            max_credit_per_child: dollars(2_200),
            phase_out_threshold_joint: dollars(400_000),
            phase_out_threshold_other: dollars(200_000),
            phase_out_rate: Decimal::new(5, 2),
        },
        earned_income_credit: EitcParams {
            tiers: [
                EitcTier::new(649, 26_214, 19_104),
                EitcTier::new(4_328, 57_554, 50_434),
                EitcTier::new(7_152, 64_430, 57_310),
                EitcTier::new(8_046, 68_675, 61_555),
            ],
        },
    }
}

mod by_filing_status;
mod filing_status;
mod tax_bracket;
mod tax_calculation;
mod tax_year;

pub use by_filing_status::ByFilingStatus;
pub use filing_status::{FilingStatus, ParseFilingStatusError};
pub use tax_bracket::TaxBracket;
pub use tax_calculation::{
    BracketBreakdown, InvalidInputError, MAX_AMOUNT, TaxCalculationParams, TaxCalculationResult,
};
pub use tax_year::{ParseTaxYearError, TaxYear, UnsupportedTaxYear};

pub mod calculations;
pub mod format;
pub mod models;
pub mod tables;

pub use calculations::{FederalTaxCalculator, calculate_federal_tax};
pub use format::{format_currency, format_percentage};
pub use models::*;
pub use tables::{ChildTaxCreditParams, EitcParams, EitcTier, YearTables};

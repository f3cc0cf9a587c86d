//! Rate schedules stored as CSV, in IRS schedule layout.

mod loader;

pub use loader::{BracketSchedules, TaxBracketLoader, TaxBracketLoaderError, TaxBracketRecord};

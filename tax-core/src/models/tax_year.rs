use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("tax year {0} is not supported (supported: 2024, 2025)")]
pub struct UnsupportedTaxYear(pub i32);

/// Error returned when a string does not name a supported tax year.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseTaxYearError {
    #[error("'{0}' is not a tax year (supported: 2024, 2025)")]
    NotAYear(String),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedTaxYear),
}

/// Tax years with a full set of bracket, deduction and credit tables.
///
/// Serialized as the plain integer year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum TaxYear {
    Y2024,
    Y2025,
}

impl TaxYear {
    pub const CURRENT: TaxYear = TaxYear::Y2025;
    pub const PRIOR: TaxYear = TaxYear::Y2024;
    pub const ALL: [TaxYear; 2] = [TaxYear::Y2024, TaxYear::Y2025];

    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Y2024 => 2024,
            Self::Y2025 => 2025,
        }
    }
}

impl TryFrom<i32> for TaxYear {
    type Error = UnsupportedTaxYear;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        match year {
            2024 => Ok(Self::Y2024),
            2025 => Ok(Self::Y2025),
            other => Err(UnsupportedTaxYear(other)),
        }
    }
}

impl From<TaxYear> for i32 {
    fn from(year: TaxYear) -> Self {
        year.as_i32()
    }
}

impl std::str::FromStr for TaxYear {
    type Err = ParseTaxYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year = s
            .trim()
            .parse::<i32>()
            .map_err(|_| ParseTaxYearError::NotAYear(s.to_string()))?;
        Ok(TaxYear::try_from(year)?)
    }
}

impl fmt::Display for TaxYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

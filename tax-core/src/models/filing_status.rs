use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a recognised filing status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised filing status '{0}' (expected one of S, MFJ, MFS, HOH)")]
pub struct ParseFilingStatusError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Single,
    MarriedJoint,
    MarriedSeparate,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        Self::Single,
        Self::MarriedJoint,
        Self::MarriedSeparate,
        Self::HeadOfHousehold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedJoint => "MFJ",
            Self::MarriedSeparate => "MFS",
            Self::HeadOfHousehold => "HOH",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedJoint => "Married Filing Jointly",
            Self::MarriedSeparate => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
        }
    }

    /// Parses either the short code (`MFJ`) or the snake_case name
    /// (`married_joint`). Case-insensitive.
    pub fn parse(s: &str) -> Result<Self, ParseFilingStatusError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "single" => Ok(Self::Single),
            "mfj" | "married_joint" => Ok(Self::MarriedJoint),
            "mfs" | "married_separate" => Ok(Self::MarriedSeparate),
            "hoh" | "head_of_household" => Ok(Self::HeadOfHousehold),
            _ => Err(ParseFilingStatusError(s.to_string())),
        }
    }

    /// Joint filers get their own credit thresholds; every other status
    /// shares the single-filer numbers.
    pub fn is_joint(&self) -> bool {
        matches!(self, Self::MarriedJoint)
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for FilingStatus {
    type Err = ParseFilingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

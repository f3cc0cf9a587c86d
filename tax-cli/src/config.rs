//! `taxcalc.toml` configuration.
//!
//! ```toml
//! tax_year = 2024
//! filing_status = "MFJ"
//! log_level = "debug"
//! log_file = "taxcalc.log"
//! brackets_file = "tax_brackets.csv"
//! output = "json"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use tax_core::{FilingStatus, TaxYear};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub tax_year: Option<TaxYear>,
    #[serde(deserialize_with = "deserialize_filing_status")]
    pub filing_status: Option<FilingStatus>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub brackets_file: Option<PathBuf>,
    pub output: Option<OutputFormat>,
}

/// Accepts the same spellings as the command line (`MFJ`, `married_joint`).
fn deserialize_filing_status<'de, D>(deserializer: D) -> Result<Option<FilingStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|s| FilingStatus::parse(&s).map_err(serde::de::Error::custom))
        .transpose()
}

impl CliConfig {
    pub fn from_toml_str(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

/// Effective settings after applying flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tax_year: TaxYear,
    pub filing_status: FilingStatus,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub brackets_file: Option<PathBuf>,
    pub output: OutputFormat,
}

/// Values given on the command line; `None` defers to the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub tax_year: Option<TaxYear>,
    pub filing_status: Option<FilingStatus>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub brackets_file: Option<PathBuf>,
    pub output: Option<OutputFormat>,
}

impl Settings {
    /// Flags, then config, then defaults (current year, single filer, text).
    pub fn resolve(
        overrides: Overrides,
        config: CliConfig,
    ) -> Self {
        Self {
            tax_year: overrides
                .tax_year
                .or(config.tax_year)
                .unwrap_or(TaxYear::CURRENT),
            filing_status: overrides
                .filing_status
                .or(config.filing_status)
                .unwrap_or(FilingStatus::Single),
            log_level: overrides.log_level.or(config.log_level),
            log_file: overrides.log_file.or(config.log_file),
            brackets_file: overrides.brackets_file.or(config.brackets_file),
            output: overrides.output.or(config.output).unwrap_or_default(),
        }
    }
}

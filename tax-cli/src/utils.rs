use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and strips a
/// leading `$` and comma thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    unsigned.replace(',', "")
}

/// Parses a money amount such as `"50,000"` or `"$1,234.56"`.
///
/// Empty or whitespace-only input is treated as 0. Used as a clap value
/// parser, which runs before logging is set up; clap reports the error.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|source| ParseDecimalError {
        input: s.to_string(),
        source,
    })
}

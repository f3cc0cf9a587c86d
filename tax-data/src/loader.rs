use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::calculations::{BracketScheduleError, validate_schedule};
use tax_core::{FilingStatus, TaxBracket, TaxYear, UnsupportedTaxYear, YearTables};
use thiserror::Error;
use tracing::{debug, warn};

/// Rate schedules keyed by year and filing status, ascending by `min_income`.
pub type BracketSchedules = BTreeMap<(TaxYear, FilingStatus), Vec<TaxBracket>>;

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum TaxBracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error(transparent)]
    UnsupportedYear(#[from] UnsupportedTaxYear),

    #[error("{year} {status} brackets are invalid: {source}")]
    InvalidBrackets {
        year: TaxYear,
        status: FilingStatus,
        #[source]
        source: BracketScheduleError,
    },

    #[error("no brackets for tax year {0} in input")]
    YearNotInInput(TaxYear),
}

impl From<csv::Error> for TaxBracketLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxBracketLoaderError::CsvParse(err.to_string())
    }
}

/// Maps IRS schedule codes to filing statuses.
///
/// - Schedule X → Single
/// - Schedule Y-1 → Married filing jointly
/// - Schedule Y-2 → Married filing separately
/// - Schedule Z → Head of household
fn schedule_to_filing_status(schedule: &str) -> Result<FilingStatus, TaxBracketLoaderError> {
    match schedule.trim() {
        "X" => Ok(FilingStatus::Single),
        "Y-1" => Ok(FilingStatus::MarriedJoint),
        "Y-2" => Ok(FilingStatus::MarriedSeparate),
        "Z" => Ok(FilingStatus::HeadOfHousehold),
        other => Err(TaxBracketLoaderError::InvalidSchedule(other.to_string())),
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2024)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: First whole dollar of the bracket
/// - `max_income`: Last whole dollar of the bracket (empty for unlimited)
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
///
/// Extra columns are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for rate schedules stored as CSV.
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse tax bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TaxBracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        debug!(records = records.len(), "parsed tax bracket records");
        Ok(records)
    }

    /// Groups records into one schedule per (year, filing status).
    ///
    /// Each schedule is sorted by `min_income` and must partition `[0, ∞)`.
    pub fn into_schedules(
        records: &[TaxBracketRecord]
    ) -> Result<BracketSchedules, TaxBracketLoaderError> {
        let mut schedules = BracketSchedules::new();

        for record in records {
            let year = TaxYear::try_from(record.tax_year)?;
            let status = schedule_to_filing_status(&record.schedule)?;
            schedules.entry((year, status)).or_default().push(TaxBracket::new(
                record.min_income,
                record.max_income,
                record.rate,
            ));
        }

        for ((year, status), brackets) in schedules.iter_mut() {
            brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
            validate_schedule(brackets).map_err(|source| {
                TaxBracketLoaderError::InvalidBrackets {
                    year: *year,
                    status: *status,
                    source,
                }
            })?;
        }

        Ok(schedules)
    }

    /// Replaces the schedules in `tables` with those loaded for its year.
    ///
    /// Statuses without a loaded schedule keep their current brackets.
    /// Returns the number of schedules replaced.
    pub fn apply(
        tables: &mut YearTables,
        schedules: &BracketSchedules,
    ) -> Result<usize, TaxBracketLoaderError> {
        let mut replaced = 0;

        for ((year, status), brackets) in schedules {
            if *year != tables.year {
                continue;
            }
            if tables.brackets(*status) != brackets.as_slice() {
                warn!(
                    year = %year,
                    status = status.as_str(),
                    "loaded schedule differs from the one it replaces"
                );
            }
            tables
                .replace_brackets(*status, brackets.clone())
                .map_err(|source| TaxBracketLoaderError::InvalidBrackets {
                    year: *year,
                    status: *status,
                    source,
                })?;
            replaced += 1;
        }

        Ok(replaced)
    }

    /// Builds tables for `year` from the builtin set with schedules from
    /// `reader` swapped in.
    pub fn load_year<R: Read>(
        reader: R,
        year: TaxYear,
    ) -> Result<YearTables, TaxBracketLoaderError> {
        let records = Self::parse(reader)?;
        let schedules = Self::into_schedules(&records)?;

        let mut tables = YearTables::builtin(year).clone();
        if Self::apply(&mut tables, &schedules)? == 0 {
            return Err(TaxBracketLoaderError::YearNotInInput(year));
        }
        Ok(tables)
    }

    /// Lists the loaded schedules that differ from the builtin tables.
    pub fn differences_from_builtin(schedules: &BracketSchedules) -> Vec<(TaxYear, FilingStatus)> {
        schedules
            .iter()
            .filter(|((year, status), brackets)| {
                YearTables::builtin(*year).brackets(*status) != brackets.as_slice()
            })
            .map(|(key, _)| *key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"tax_year,schedule,min_income,max_income,rate
2024,X,0,11600,0.10
2024,X,11601,47150,0.12
2024,X,47151,100525,0.22
2024,X,100526,191950,0.24
2024,X,191951,243725,0.32
2024,X,243726,609350,0.35
2024,X,609351,,0.37
2024,Z,0,16550,0.10
2024,Z,16551,63100,0.12
2024,Z,63101,100500,0.22
2024,Z,100501,191950,0.24
2024,Z,191951,243700,0.32
2024,Z,243701,609350,0.35
2024,Z,609351,,0.37
"#;

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2024,X,0,11600,0.10";

        let records = TaxBracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![TaxBracketRecord {
                tax_year: 2024,
                schedule: "X".to_string(),
                min_income: dec!(0),
                max_income: Some(dec!(11600)),
                rate: dec!(0.10),
            }]
        );
    }

    #[test]
    fn test_parse_csv_unlimited_max_income() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2024,X,609351,,0.37";

        let records = TaxBracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].min_income, dec!(609351));
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let csv = "tax_year,schedule,min_income,max_income,base_tax,rate\n2024,X,0,11600,0,0.10";

        let records = TaxBracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].rate, dec!(0.10));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "tax_year,schedule,min_income\n2024,X,0";

        let err = TaxBracketLoader::parse(csv.as_bytes()).expect_err("Should fail");

        let TaxBracketLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2024,X,0,abc,0.10";

        let err = TaxBracketLoader::parse(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, TaxBracketLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n";

        let records = TaxBracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    // =========================================================================
    // into_schedules tests
    // =========================================================================

    #[test]
    fn test_into_schedules_groups_by_year_and_status() {
        let records = TaxBracketLoader::parse(TEST_CSV.as_bytes()).unwrap();

        let schedules = TaxBracketLoader::into_schedules(&records).expect("valid schedules");

        let keys: Vec<_> = schedules.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                (TaxYear::Y2024, FilingStatus::Single),
                (TaxYear::Y2024, FilingStatus::HeadOfHousehold),
            ]
        );
        assert_eq!(schedules[&(TaxYear::Y2024, FilingStatus::Single)].len(), 7);
    }

    #[test]
    fn test_into_schedules_sorts_out_of_order_rows() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n\
                   2024,Y-2,101,,0.20\n\
                   2024,Y-2,0,100,0.10";
        let records = TaxBracketLoader::parse(csv.as_bytes()).unwrap();

        let schedules = TaxBracketLoader::into_schedules(&records).unwrap();

        let brackets = &schedules[&(TaxYear::Y2024, FilingStatus::MarriedSeparate)];
        assert_eq!(brackets[0].min_income, dec!(0));
        assert_eq!(brackets[1].min_income, dec!(101));
    }

    #[test]
    fn test_into_schedules_rejects_gap() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n\
                   2025,X,0,100,0.10\n\
                   2025,X,200,,0.20";
        let records = TaxBracketLoader::parse(csv.as_bytes()).unwrap();

        let err = TaxBracketLoader::into_schedules(&records).unwrap_err();

        match err {
            TaxBracketLoaderError::InvalidBrackets {
                year,
                status,
                source,
            } => {
                assert_eq!(year, TaxYear::Y2025);
                assert_eq!(status, FilingStatus::Single);
                assert_eq!(
                    source,
                    BracketScheduleError::Discontinuous {
                        index: 1,
                        expected: dec!(101),
                        found: dec!(200),
                    }
                );
            }
            other => panic!("expected InvalidBrackets, got {other:?}"),
        }
    }

    #[test]
    fn test_into_schedules_rejects_unsupported_year() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2019,X,0,,0.10";
        let records = TaxBracketLoader::parse(csv.as_bytes()).unwrap();

        let err = TaxBracketLoader::into_schedules(&records).unwrap_err();

        assert!(matches!(
            err,
            TaxBracketLoaderError::UnsupportedYear(UnsupportedTaxYear(2019))
        ));
    }

    // =========================================================================
    // apply / load_year tests
    // =========================================================================

    #[test]
    fn test_apply_only_touches_matching_year() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2025,X,0,,0.15";
        let records = TaxBracketLoader::parse(csv.as_bytes()).unwrap();
        let schedules = TaxBracketLoader::into_schedules(&records).unwrap();
        let mut tables = YearTables::builtin(TaxYear::Y2024).clone();

        let replaced = TaxBracketLoader::apply(&mut tables, &schedules).unwrap();

        assert_eq!(replaced, 0);
        assert_eq!(&tables, YearTables::builtin(TaxYear::Y2024));
    }

    #[test]
    fn test_load_year_replaces_schedule() {
        let csv = "tax_year,schedule,min_income,max_income,rate\n2025,Z,0,,0.15";

        let tables = TaxBracketLoader::load_year(csv.as_bytes(), TaxYear::Y2025).unwrap();

        assert_eq!(
            tables.brackets(FilingStatus::HeadOfHousehold),
            &[TaxBracket::new(dec!(0), None, dec!(0.15))]
        );
        assert_eq!(
            tables.brackets(FilingStatus::Single),
            YearTables::builtin(TaxYear::Y2025).brackets(FilingStatus::Single)
        );
    }

    #[test]
    fn test_load_year_requires_rows_for_year() {
        let err = TaxBracketLoader::load_year(TEST_CSV.as_bytes(), TaxYear::Y2025).unwrap_err();

        assert!(matches!(err, TaxBracketLoaderError::YearNotInInput(TaxYear::Y2025)));
    }

    #[test]
    fn test_differences_from_builtin() {
        let records = TaxBracketLoader::parse(TEST_CSV.as_bytes()).unwrap();
        let mut schedules = TaxBracketLoader::into_schedules(&records).unwrap();

        assert!(TaxBracketLoader::differences_from_builtin(&schedules).is_empty());

        schedules
            .get_mut(&(TaxYear::Y2024, FilingStatus::Single))
            .unwrap()[0]
            .tax_rate = dec!(0.11);

        assert_eq!(
            TaxBracketLoader::differences_from_builtin(&schedules),
            vec![(TaxYear::Y2024, FilingStatus::Single)]
        );
    }

    // =========================================================================
    // schedule_to_filing_status tests
    // =========================================================================

    #[test]
    fn test_schedule_codes_map_to_statuses() {
        assert_eq!(schedule_to_filing_status("X").unwrap(), FilingStatus::Single);
        assert_eq!(schedule_to_filing_status("Y-1").unwrap(), FilingStatus::MarriedJoint);
        assert_eq!(schedule_to_filing_status("Y-2").unwrap(), FilingStatus::MarriedSeparate);
        assert_eq!(schedule_to_filing_status("Z").unwrap(), FilingStatus::HeadOfHousehold);
    }

    #[test]
    fn test_schedule_to_filing_status_invalid() {
        match schedule_to_filing_status("INVALID") {
            Err(TaxBracketLoaderError::InvalidSchedule(ref schedule)) => {
                assert_eq!(schedule, "INVALID");
            }
            other => panic!("expected InvalidSchedule, got {other:?}"),
        }
    }
}

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::Write,
    path::Path,
};

use anyhow::{Context, Result};
use tax_core::{
    FederalTaxCalculator, TaxCalculationParams, TaxCalculationResult, TaxYear, YearTables,
};
use tax_data::{BracketSchedules, TaxBracketLoader, TaxBracketLoaderError};
use tracing::{debug, info, instrument};

use crate::{
    cli::Command,
    config::{OutputFormat, Settings},
    csv_loader,
    report::{self, ReturnReport},
};

/// Where rate schedules come from: the builtin tables, or copies of them
/// with schedules from a bracket CSV swapped in.
///
/// Overridden tables are built once, when the file is loaded, for every year
/// the file covers.
#[derive(Debug, Default)]
pub struct TableSource {
    overridden: Option<BTreeMap<TaxYear, YearTables>>,
}

impl TableSource {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open brackets file '{}'", path.display()))?;
        let records = TaxBracketLoader::parse(file)
            .with_context(|| format!("cannot read brackets file '{}'", path.display()))?;
        let schedules = TaxBracketLoader::into_schedules(&records)?;

        let overridden = Self::build_overrides(&schedules)?;
        info!(
            path = %path.display(),
            schedules = schedules.len(),
            years = overridden.len(),
            "loaded bracket overrides"
        );
        Ok(Self {
            overridden: Some(overridden),
        })
    }

    fn build_overrides(
        schedules: &BracketSchedules
    ) -> Result<BTreeMap<TaxYear, YearTables>, TaxBracketLoaderError> {
        let years: BTreeSet<TaxYear> = schedules.keys().map(|(year, _)| *year).collect();

        years
            .into_iter()
            .map(|year| {
                let mut tables = YearTables::builtin(year).clone();
                TaxBracketLoader::apply(&mut tables, schedules)?;
                Ok((year, tables))
            })
            .collect()
    }

    /// Tables for `year`. An override file must cover every year it is used for.
    pub fn tables(
        &self,
        year: TaxYear,
    ) -> Result<&YearTables, TaxBracketLoaderError> {
        match &self.overridden {
            None => Ok(YearTables::builtin(year)),
            Some(overridden) => overridden
                .get(&year)
                .ok_or(TaxBracketLoaderError::YearNotInInput(year)),
        }
    }
}

/// Validates `params` and runs the calculation against `source`.
pub fn calculate(
    source: &TableSource,
    params: &TaxCalculationParams,
) -> Result<TaxCalculationResult> {
    params.validate()?;
    let tables = source.tables(params.tax_year)?;
    Ok(FederalTaxCalculator::new(tables).calculate(params))
}

/// Runs `command`, writing its report to `out`.
#[instrument(skip_all, fields(year = %settings.tax_year, status = settings.filing_status.as_str()))]
pub fn execute(
    command: &Command,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<()> {
    let source = match &settings.brackets_file {
        Some(path) => TableSource::from_file(path)?,
        None => TableSource::builtin(),
    };

    match command {
        Command::Calculate(args) => {
            let params = args.to_params(settings.tax_year, settings.filing_status);
            let result = calculate(&source, &params)?;
            info!(
                liability = %result.final_tax_liability,
                refund_or_owed = %result.refund_or_owed,
                "calculated return"
            );

            match settings.output {
                OutputFormat::Text => report::write_text(out, &params, &result)?,
                OutputFormat::Json => report::write_json(
                    out,
                    &ReturnReport {
                        input: &params,
                        result: &result,
                    },
                )?,
            }
        }
        Command::Batch { file } => {
            let returns = csv_loader::load_from_file(file)?;
            let results = returns
                .iter()
                .enumerate()
                .map(|(index, params)| {
                    calculate(&source, params).with_context(|| format!("row {}", index + 1))
                })
                .collect::<Result<Vec<_>>>()?;
            info!(returns = results.len(), "calculated batch");

            let reports: Vec<_> = returns
                .iter()
                .zip(&results)
                .map(|(input, result)| ReturnReport { input, result })
                .collect();
            match settings.output {
                OutputFormat::Text => report::write_batch_summary(out, &reports)?,
                OutputFormat::Json => report::write_json(out, &reports)?,
            }
        }
        Command::Brackets { .. } => {
            let tables = source.tables(settings.tax_year)?;
            let brackets = tables.brackets(settings.filing_status);
            debug!(brackets = brackets.len(), "listing schedule");

            match settings.output {
                OutputFormat::Text => report::write_brackets(
                    out,
                    settings.tax_year,
                    settings.filing_status,
                    brackets,
                )?,
                OutputFormat::Json => report::write_json(out, &brackets)?,
            }
        }
    }

    Ok(())
}

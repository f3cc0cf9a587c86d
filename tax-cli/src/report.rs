//! Writes calculation results as aligned text or JSON.

use std::io::{self, Write};

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::{
    FilingStatus, TaxBracket, TaxCalculationParams, TaxCalculationResult, TaxYear,
    format::DEFAULT_PERCENTAGE_DECIMALS, format_currency, format_percentage,
};

const LABEL_WIDTH: usize = 26;
const AMOUNT_WIDTH: usize = 14;

/// One calculated return as it appears in JSON output.
#[derive(Debug, Serialize)]
pub struct ReturnReport<'a> {
    pub input: &'a TaxCalculationParams,
    pub result: &'a TaxCalculationResult,
}

fn line(
    out: &mut impl Write,
    label: &str,
    value: &str,
) -> io::Result<()> {
    writeln!(out, "  {label:<LABEL_WIDTH$}{value:>AMOUNT_WIDTH$}")
}

fn money(
    out: &mut impl Write,
    label: &str,
    amount: Decimal,
) -> io::Result<()> {
    line(out, label, &format_currency(amount))
}

/// Text report for one return.
pub fn write_text(
    out: &mut impl Write,
    params: &TaxCalculationParams,
    result: &TaxCalculationResult,
) -> io::Result<()> {
    writeln!(
        out,
        "Federal income tax {} ({})",
        params.tax_year, params.filing_status
    )?;
    writeln!(out)?;

    money(out, "Total income", result.total_income)?;
    money(out, "Adjusted gross income", result.adjusted_gross_income)?;
    let deduction_label = if result.used_itemized_deduction {
        "Itemized deduction"
    } else {
        "Standard deduction"
    };
    money(out, deduction_label, result.total_deductions)?;
    money(out, "Taxable income", result.taxable_income)?;
    writeln!(out)?;

    for bracket in &result.bracket_breakdown {
        writeln!(
            out,
            "    {:>6} of {:>12}{:>12}",
            format_percentage(bracket.rate, 0),
            format_currency(bracket.income),
            format_currency(bracket.tax)
        )?;
    }
    money(out, "Gross tax", result.gross_tax)?;
    line(
        out,
        "Effective rate",
        &format_percentage(result.effective_rate, DEFAULT_PERCENTAGE_DECIMALS),
    )?;
    line(out, "Marginal rate", &format_percentage(result.marginal_rate, 0))?;
    writeln!(out)?;

    money(out, "Child tax credit", result.child_tax_credit)?;
    money(out, "Earned income credit", result.earned_income_credit)?;
    money(out, "Total credits", result.total_credits)?;
    money(out, "Tax liability", result.final_tax_liability)?;
    money(out, "Withholding", result.withholding)?;

    if result.is_refund() {
        money(out, "Refund", result.refund_or_owed)
    } else {
        money(out, "Amount owed", result.amount_owed())
    }
}

pub fn write_json(
    out: &mut impl Write,
    report: &impl Serialize,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// One row per return, followed by the batch totals.
pub fn write_batch_summary(
    out: &mut impl Write,
    reports: &[ReturnReport<'_>],
) -> io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:>4}  {:<4}{:>14}{:>12}{:>12}{:>14}",
        "#", "Year", "FS", "Taxable", "Tax", "Credits", "Refund/Owed"
    )?;

    let mut total_liability = Decimal::ZERO;
    let mut total_balance = Decimal::ZERO;
    for (index, report) in reports.iter().enumerate() {
        let result = report.result;
        writeln!(
            out,
            "{:>4}  {:>4}  {:<4}{:>14}{:>12}{:>12}{:>14}",
            index + 1,
            report.input.tax_year,
            report.input.filing_status.as_str(),
            format_currency(result.taxable_income),
            format_currency(result.gross_tax),
            format_currency(result.total_credits),
            format_currency(result.refund_or_owed)
        )?;
        total_liability += result.final_tax_liability;
        total_balance += result.refund_or_owed;
    }

    writeln!(out)?;
    writeln!(out, "{} returns", reports.len())?;
    money(out, "Total tax liability", total_liability)?;
    money(out, "Net refund (owed)", total_balance)
}

/// Bracket schedule listing for `year` and `status`.
pub fn write_brackets(
    out: &mut impl Write,
    year: TaxYear,
    status: FilingStatus,
    brackets: &[TaxBracket],
) -> io::Result<()> {
    writeln!(out, "{year} {status} brackets")?;
    for bracket in brackets {
        let upper = match bracket.max_income {
            Some(max) => format_currency(max),
            None => "and up".to_string(),
        };
        writeln!(
            out,
            "  {:>4}  {:>12} - {}",
            format_percentage(bracket.tax_rate, 0),
            format_currency(bracket.min_income),
            upper
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{YearTables, calculate_federal_tax};

    use super::*;

    fn render(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        write(&mut out).expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("reports are UTF-8")
    }

    fn single_50k() -> TaxCalculationParams {
        TaxCalculationParams {
            withholding: dec!(6000),
            ..TaxCalculationParams::new(TaxYear::Y2024, FilingStatus::Single, dec!(50000))
        }
    }

    // =========================================================================
    // Text report tests
    // =========================================================================

    #[test]
    fn text_report_shows_key_figures() {
        let params = single_50k();
        let result = calculate_federal_tax(&params);

        let text = render(|out| write_text(out, &params, &result));

        assert!(text.starts_with("Federal income tax 2024 (Single)\n"), "{text}");
        assert!(text.contains("Standard deduction"), "{text}");
        assert!(text.contains("$35,400"), "{text}");
        assert!(text.contains("$4,016"), "{text}");
        assert!(text.contains("8.0%"), "{text}");
        assert!(text.contains("12%"), "{text}");
        assert!(text.contains("Refund"), "{text}");
        assert!(text.contains("$1,984"), "{text}");
    }

    #[test]
    fn text_report_lists_each_bracket() {
        let params = single_50k();
        let result = calculate_federal_tax(&params);

        let text = render(|out| write_text(out, &params, &result));

        let bracket_lines: Vec<_> = text.lines().filter(|l| l.contains(" of ")).collect();
        assert_eq!(bracket_lines.len(), 2);
        assert!(bracket_lines[0].contains("10%"));
        assert!(bracket_lines[0].contains("$1,160"));
        assert!(bracket_lines[1].contains("12%"));
        assert!(bracket_lines[1].contains("$2,856"));
    }

    #[test]
    fn text_report_shows_amount_owed() {
        let params = TaxCalculationParams::new(TaxYear::Y2024, FilingStatus::Single, dec!(50000));
        let result = calculate_federal_tax(&params);

        let text = render(|out| write_text(out, &params, &result));

        assert!(text.contains("Amount owed"), "{text}");
        assert!(!text.contains("Refund"), "{text}");
    }

    // =========================================================================
    // JSON tests
    // =========================================================================

    #[test]
    fn json_report_nests_input_and_result() {
        let params = single_50k();
        let result = calculate_federal_tax(&params);

        let json = render(|out| {
            write_json(
                out,
                &ReturnReport {
                    input: &params,
                    result: &result,
                },
            )
        });
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["input"]["tax_year"], 2024);
        assert_eq!(value["input"]["filing_status"], "single");
        assert_eq!(value["result"]["taxable_income"], "35400");
        assert_eq!(value["result"]["gross_tax"], "4015.98");
    }

    // =========================================================================
    // Batch and bracket listing tests
    // =========================================================================

    #[test]
    fn batch_summary_totals_every_return() {
        let first = single_50k();
        let second = TaxCalculationParams::new(TaxYear::Y2024, FilingStatus::Single, dec!(50000));
        let results = [calculate_federal_tax(&first), calculate_federal_tax(&second)];
        let reports = [
            ReturnReport {
                input: &first,
                result: &results[0],
            },
            ReturnReport {
                input: &second,
                result: &results[1],
            },
        ];

        let text = render(|out| write_batch_summary(out, &reports));

        assert!(text.contains("2 returns"), "{text}");
        assert!(text.contains("$8,032"), "{text}");
        assert!(text.contains("-$2,032"), "{text}");
    }

    #[test]
    fn bracket_listing_marks_top_bracket_unbounded() {
        let tables = YearTables::builtin(TaxYear::Y2024);
        let brackets = tables.brackets(FilingStatus::Single);

        let text = render(|out| write_brackets(out, TaxYear::Y2024, FilingStatus::Single, brackets));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "2024 Single brackets");
        assert_eq!(lines.len(), 8);
        assert!(lines[1].contains("10%") && lines[1].ends_with("- $11,600"), "{text}");
        assert!(lines[7].contains("37%") && lines[7].ends_with("- and up"), "{text}");
    }
}

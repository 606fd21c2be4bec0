//! Calculate command - run the tax computation and render the result

use crate::cmd;
use crate::input::{self, parse_deduction, CalculationInput, Deduction, PayFrequency};
use crate::tax::calculator::{calculate, BandResult, CalculationResult};
use crate::utils;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct CalculateCommand {
    /// JSON input document, or "-" for stdin (overrides the direct flags)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Gross income per the selected pay frequency
    #[arg(short, long)]
    gross: Option<Decimal>,

    /// Pension contribution per the selected pay frequency
    #[arg(short, long, default_value_t = Decimal::ZERO)]
    pension: Decimal,

    /// Pay frequency the figures are entered in
    #[arg(short, long, value_enum, default_value_t = FrequencyArg::Yearly)]
    frequency: FrequencyArg,

    /// Named deduction as NAME=AMOUNT (repeatable)
    #[arg(short, long = "deduction", value_parser = parse_deduction)]
    deduction: Vec<Deduction>,

    /// CSV file of name,amount deductions to append
    #[arg(long)]
    deductions_file: Option<PathBuf>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Output the band breakdown as CSV
    #[arg(long, conflicts_with = "json")]
    csv: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FrequencyArg {
    Monthly,
    #[default]
    Yearly,
}

impl From<FrequencyArg> for PayFrequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Monthly => PayFrequency::Monthly,
            FrequencyArg::Yearly => PayFrequency::Yearly,
        }
    }
}

/// Calculation data for JSON output
#[derive(Debug, Serialize)]
struct CalculationData {
    frequency: String,
    gross: String,
    threshold_relief: String,
    pension: String,
    other_deductions: String,
    consolidated_relief: String,
    taxable_income: String,
    yearly_tax: String,
    monthly_tax: String,
    effective_rate_pct: String,
    bands: Vec<BandData>,
}

#[derive(Debug, Serialize)]
struct BandData {
    band: String,
    rate_pct: String,
    taxable: String,
    tax: String,
}

#[derive(Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    band: &'static str,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl From<&BandResult> for BandRow {
    fn from(b: &BandResult) -> Self {
        BandRow {
            band: b.band.label,
            rate: format!("{:.0}%", b.band.rate_pct()),
            taxable: format!("{:.2}", b.taxable),
            tax: format!("{:.2}", b.tax),
        }
    }
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = self.build_input()?;
        let result = calculate(&input);

        if self.json {
            self.print_json(&result)
        } else if self.csv {
            utils::write_csv(band_data(&result), io::stdout())
        } else {
            self.print_summary(&result);
            Ok(())
        }
    }

    fn build_input(&self) -> anyhow::Result<CalculationInput> {
        if let Some(path) = &self.input {
            return cmd::read_input(path);
        }

        let gross = self
            .gross
            .ok_or_else(|| anyhow::anyhow!("either --input or --gross is required"))?;

        let mut deductions = self.deduction.clone();
        if let Some(path) = &self.deductions_file {
            deductions.extend(input::read_deductions_csv(File::open(path)?)?);
        }

        Ok(CalculationInput {
            frequency: self.frequency.into(),
            gross_income: gross,
            pension: self.pension,
            deductions,
        })
    }

    fn print_summary(&self, result: &CalculationResult) {
        println!();
        println!("PERSONAL INCOME TAX ({} figures)", result.frequency.display());
        println!();

        println!("INCOME");
        println!("  Gross (annual):       {}", format_ngn(result.gross));
        println!();

        println!("RELIEFS & DEDUCTIONS");
        println!("  Threshold relief:     {}", format_ngn(result.threshold_relief));
        println!("  Pension:              {}", format_ngn(result.pension));
        println!("  Other deductions:     {}", format_ngn(result.other_deductions));
        println!("  Consolidated relief:  {}", format_ngn(result.consolidated_relief));
        println!("  Taxable income:       {}", format_ngn(result.taxable_income));
        println!();

        println!("BANDS");
        let rows: Vec<BandRow> = result.bands.iter().map(BandRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::psql());
        println!("{table}");
        println!();

        println!(
            "TAX DUE: {} / year | {} / month | effective rate {:.2}%",
            format_ngn(result.yearly_tax),
            format_ngn(result.monthly_tax),
            result.effective_rate
        );
        println!();
    }

    fn print_json(&self, result: &CalculationResult) -> anyhow::Result<()> {
        let data = CalculationData {
            frequency: result.frequency.display().to_string(),
            gross: format!("{:.2}", result.gross),
            threshold_relief: format!("{:.2}", result.threshold_relief),
            pension: format!("{:.2}", result.pension),
            other_deductions: format!("{:.2}", result.other_deductions),
            consolidated_relief: format!("{:.2}", result.consolidated_relief),
            taxable_income: format!("{:.2}", result.taxable_income),
            yearly_tax: format!("{:.2}", result.yearly_tax),
            monthly_tax: format!("{:.2}", result.monthly_tax),
            effective_rate_pct: format!("{:.2}", result.effective_rate),
            bands: band_data(result),
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

fn band_data(result: &CalculationResult) -> Vec<BandData> {
    result
        .bands
        .iter()
        .map(|b| BandData {
            band: b.band.label.to_string(),
            rate_pct: format!("{:.0}", b.band.rate_pct()),
            taxable: format!("{:.2}", b.taxable),
            tax: format!("{:.2}", b.tax),
        })
        .collect()
}

fn format_ngn(amount: Decimal) -> String {
    format!("\u{20A6}{:.2}", amount)
}

//! Schema command - print expected input formats

use crate::input::CalculationInput;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the calculation input document
    JsonSchema,
    /// CSV header row for a deductions file
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(CalculationInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", CSV_COLUMNS.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Deductions CSV Format");
        println!("=====================");
        println!();
        for (name, required, description) in CSV_FIELD_DESCRIPTIONS {
            let req = if *required { "required" } else { "optional" };
            println!("{:10} ({:8})  {}", name, req, description);
        }
        println!();
        println!("Amounts are per the selected pay frequency; blank or non-numeric is zero");
        Ok(())
    }
}

const CSV_COLUMNS: &[&str] = &["name", "amount"];

const CSV_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    ("name", true, "Deduction label (free text)"),
    ("amount", false, "Deduction amount (e.g., 250000 or 80000.50)"),
];

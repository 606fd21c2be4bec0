use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("expected NAME=AMOUNT, got: {0}")]
    MalformedDeduction(String),
    #[error("deduction amount is not a number: {0}")]
    InvalidAmount(String),
}

/// How the entered figures are to be interpreted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    /// Figures are per calendar month; gross, pension and deduction amounts
    /// are all annualised before tax is applied
    Monthly,
    /// Figures are already annual and are taken as-is
    #[default]
    Yearly,
}

impl PayFrequency {
    pub fn display(&self) -> &'static str {
        match self {
            PayFrequency::Monthly => "monthly",
            PayFrequency::Yearly => "yearly",
        }
    }
}

/// A named deduction. Names are free text; whatever front end collects the
/// figures may offer suggestions, the calculator does not care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Deduction {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub amount: Decimal,
}

/// Input document for a single calculation
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CalculationInput {
    /// Pay frequency of gross income and pension; deduction amounts are
    /// annualised together with them when this is monthly
    #[serde(default)]
    pub frequency: PayFrequency,
    /// Gross income per the selected pay frequency
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub gross_income: Decimal,
    /// Pension contribution per the selected pay frequency
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub pension: Decimal,
    /// Itemized deductions
    #[serde(default)]
    pub deductions: Vec<Deduction>,
}

/// `Number(x) || 0` coercion: numbers and numeric strings pass through,
/// anything else (null, blank, garbage) becomes zero.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(Decimal),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        Raw::Other(_) => Decimal::ZERO,
    })
}

/// CSV record for a deductions file: `name,amount` rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRecord {
    pub name: String,
    #[serde(default)]
    pub amount: Option<String>,
}

impl From<DeductionRecord> for Deduction {
    fn from(record: DeductionRecord) -> Self {
        let amount = record
            .amount
            .as_deref()
            .and_then(|s| Decimal::from_str(s.trim()).ok())
            .unwrap_or(Decimal::ZERO);

        Deduction {
            name: record.name,
            amount,
        }
    }
}

/// Parse a NAME=AMOUNT command-line deduction
pub fn parse_deduction(s: &str) -> Result<Deduction, InputError> {
    let (name, amount) = s
        .split_once('=')
        .ok_or_else(|| InputError::MalformedDeduction(s.to_string()))?;
    let amount = Decimal::from_str(amount.trim())
        .map_err(|_| InputError::InvalidAmount(amount.to_string()))?;
    Ok(Deduction {
        name: name.trim().to_string(),
        amount,
    })
}

/// Read a calculation input document from JSON
pub fn read_input_json<R: Read>(reader: R) -> anyhow::Result<CalculationInput> {
    let input: CalculationInput = serde_json::from_reader(reader)?;
    Ok(input)
}

/// Read deductions from CSV
pub fn read_deductions_csv<R: Read>(reader: R) -> anyhow::Result<Vec<Deduction>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records: Result<Vec<DeductionRecord>, _> =
        rdr.deserialize::<DeductionRecord>().collect();
    Ok(records?.into_iter().map(Into::into).collect())
}

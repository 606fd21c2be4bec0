use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A single marginal rate band in the progressive schedule.
///
/// `width` is the slice of taxable income charged at `rate`, not a
/// cumulative ceiling. The final band has no width and absorbs whatever
/// taxable income remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBand {
    pub label: &'static str,
    pub width: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBand {
    /// Rate as a percentage for display
    pub fn rate_pct(&self) -> Decimal {
        self.rate * dec!(100)
    }
}

/// The fixed progressive schedule, lowest marginal rate first.
/// Widths are annual naira amounts; taxable income is consumed
/// band by band in this order.
pub fn bands() -> [TaxBand; 5] {
    [
        TaxBand {
            label: "First 2,200,000",
            width: Some(dec!(2200000)),
            rate: dec!(0.15),
        },
        TaxBand {
            label: "Next 7,000,000",
            width: Some(dec!(7000000)),
            rate: dec!(0.18),
        },
        TaxBand {
            label: "Next 15,000,000",
            width: Some(dec!(15000000)),
            rate: dec!(0.21),
        },
        TaxBand {
            label: "Next 25,000,000",
            width: Some(dec!(25000000)),
            rate: dec!(0.23),
        },
        TaxBand {
            label: "Above 49,200,000",
            width: None,
            rate: dec!(0.25),
        },
    ]
}

/// Flat statutory relief subtracted from gross income before any other
/// deduction, floored at zero.
pub fn threshold_relief() -> Decimal {
    dec!(800000)
}

/// Consolidated Relief Allowance: the greater of ₦200,000 or 1% of gross,
/// plus 20% of gross. Always computed from the un-relieved gross income.
pub fn consolidated_relief(gross: Decimal) -> Decimal {
    (gross * dec!(0.01)).max(dec!(200000)) + gross * dec!(0.20)
}

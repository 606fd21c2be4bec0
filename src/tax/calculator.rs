use crate::input::{CalculationInput, PayFrequency};
use crate::tax::schedule::{self, TaxBand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tax charged within one band of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandResult {
    pub band: TaxBand,
    /// Slice of taxable income that landed in this band
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// Result of a single calculation. All amounts are annual naira figures
/// except `monthly_tax`; values are unrounded, display layers round to
/// two decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationResult {
    pub frequency: PayFrequency,
    pub gross: Decimal,
    pub threshold_relief: Decimal,
    pub pension: Decimal,
    pub other_deductions: Decimal,
    pub consolidated_relief: Decimal,
    pub taxable_income: Decimal,
    pub yearly_tax: Decimal,
    pub monthly_tax: Decimal,
    /// Total tax over gross income, as a percentage
    pub effective_rate: Decimal,
    /// One entry per schedule band, zero or not
    pub bands: Vec<BandResult>,
}

/// Calculate personal income tax for a single set of figures.
///
/// Tax is always computed on an annual basis: monthly figures (gross,
/// pension and deduction amounts alike) are multiplied by 12 up front,
/// yearly figures are taken as-is. Relief order matters: the flat
/// threshold relief comes off gross first, the consolidated relief is
/// computed from the un-relieved gross, and taxable income is floored at
/// zero before the band walk. Negative inputs are clamped to zero.
pub fn calculate(input: &CalculationInput) -> CalculationResult {
    let factor = match input.frequency {
        PayFrequency::Monthly => dec!(12),
        PayFrequency::Yearly => Decimal::ONE,
    };

    let gross = input.gross_income.max(Decimal::ZERO) * factor;
    let pension = input.pension.max(Decimal::ZERO) * factor;
    let other: Decimal = input
        .deductions
        .iter()
        .map(|d| d.amount.max(Decimal::ZERO))
        .sum::<Decimal>()
        * factor;

    let after_threshold = (gross - schedule::threshold_relief()).max(Decimal::ZERO);
    let cra = schedule::consolidated_relief(gross);
    let taxable_income = (after_threshold - pension - other - cra).max(Decimal::ZERO);

    let mut remaining = taxable_income;
    let mut yearly_tax = Decimal::ZERO;
    let mut bands = Vec::with_capacity(schedule::bands().len());

    for band in schedule::bands() {
        let taxable = match band.width {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax = taxable * band.rate;
        log::debug!(
            "band {}: taxable={}, tax={}, remaining={}",
            band.label,
            taxable,
            tax,
            remaining - taxable
        );
        yearly_tax += tax;
        remaining -= taxable;
        bands.push(BandResult {
            band,
            taxable,
            tax,
        });
    }

    let effective_rate = if gross > Decimal::ZERO {
        yearly_tax / gross * dec!(100)
    } else {
        Decimal::ZERO
    };

    CalculationResult {
        frequency: input.frequency,
        gross,
        threshold_relief: schedule::threshold_relief(),
        pension,
        other_deductions: other,
        consolidated_relief: cra,
        taxable_income,
        yearly_tax,
        monthly_tax: yearly_tax / dec!(12),
        effective_rate,
        bands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Deduction;

    fn yearly(gross: Decimal) -> CalculationInput {
        CalculationInput {
            frequency: PayFrequency::Yearly,
            gross_income: gross,
            pension: Decimal::ZERO,
            deductions: vec![],
        }
    }

    fn ded(name: &str, amount: Decimal) -> Deduction {
        Deduction {
            name: name.to_string(),
            amount,
        }
    }

    #[test]
    fn zero_input_is_all_zero() {
        let result = calculate(&yearly(Decimal::ZERO));

        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.yearly_tax, Decimal::ZERO);
        assert_eq!(result.monthly_tax, Decimal::ZERO);
        assert_eq!(result.effective_rate, Decimal::ZERO);
        assert_eq!(result.bands.len(), 5);
        for band in &result.bands {
            assert_eq!(band.taxable, Decimal::ZERO);
            assert_eq!(band.tax, Decimal::ZERO);
        }
    }

    #[test]
    fn six_million_yearly_scenario() {
        // gross 6,000,000: threshold leaves 5,200,000, CRA is
        // 200,000 + 1,200,000, so 3,800,000 is taxable
        let result = calculate(&yearly(dec!(6000000)));

        assert_eq!(result.consolidated_relief, dec!(1400000));
        assert_eq!(result.taxable_income, dec!(3800000));

        assert_eq!(result.bands[0].taxable, dec!(2200000));
        assert_eq!(result.bands[0].tax, dec!(330000));
        assert_eq!(result.bands[1].taxable, dec!(1600000));
        assert_eq!(result.bands[1].tax, dec!(288000));
        for band in &result.bands[2..] {
            assert_eq!(band.taxable, Decimal::ZERO);
            assert_eq!(band.tax, Decimal::ZERO);
        }

        assert_eq!(result.yearly_tax, dec!(618000));
        assert_eq!(result.monthly_tax, dec!(51500));
        assert_eq!(result.effective_rate, dec!(10.3));
    }

    #[test]
    fn monthly_figures_are_annualised() {
        let input = CalculationInput {
            frequency: PayFrequency::Monthly,
            gross_income: dec!(500000),
            pension: Decimal::ZERO,
            deductions: vec![],
        };

        let result = calculate(&input);

        // 500,000 a month is the 6,000,000 yearly scenario
        assert_eq!(result.gross, dec!(6000000));
        assert_eq!(result.yearly_tax, dec!(618000));
        assert_eq!(result.monthly_tax, dec!(51500));
    }

    #[test]
    fn first_band_boundary_exactly_filled() {
        // gross 4,000,000: threshold leaves 3,200,000, CRA is
        // 200,000 + 800,000, taxable lands exactly on the first band width
        let result = calculate(&yearly(dec!(4000000)));

        assert_eq!(result.taxable_income, dec!(2200000));
        assert_eq!(result.bands[0].taxable, dec!(2200000));
        assert_eq!(result.bands[0].tax, dec!(330000));
        for band in &result.bands[1..] {
            assert_eq!(band.taxable, Decimal::ZERO);
            assert_eq!(band.tax, Decimal::ZERO);
        }
        assert_eq!(result.yearly_tax, dec!(330000));
    }

    #[test]
    fn top_band_absorbs_remainder() {
        // gross 100,000,000: threshold leaves 99,200,000, CRA is
        // 1,000,000 + 20,000,000, taxable 78,200,000 spills into band 5
        let result = calculate(&yearly(dec!(100000000)));

        assert_eq!(result.taxable_income, dec!(78200000));
        assert_eq!(result.bands[0].tax, dec!(330000));
        assert_eq!(result.bands[1].tax, dec!(1260000));
        assert_eq!(result.bands[2].tax, dec!(3150000));
        assert_eq!(result.bands[3].tax, dec!(5750000));
        assert_eq!(result.bands[4].taxable, dec!(29000000));
        assert_eq!(result.bands[4].tax, dec!(7250000));
        assert_eq!(result.yearly_tax, dec!(17740000));
    }

    #[test]
    fn band_taxes_sum_to_yearly_tax() {
        for gross in [
            dec!(0),
            dec!(900000),
            dec!(4000000),
            dec!(6000000),
            dec!(25000000),
            dec!(100000000),
        ] {
            let result = calculate(&yearly(gross));
            let band_total: Decimal = result.bands.iter().map(|b| b.tax).sum();
            assert_eq!(band_total, result.yearly_tax, "gross {}", gross);

            let band_taxable: Decimal = result.bands.iter().map(|b| b.taxable).sum();
            assert_eq!(band_taxable, result.taxable_income, "gross {}", gross);
        }
    }

    #[test]
    fn yearly_tax_is_monotonic_in_gross() {
        let deductions = vec![ded("Rent relief", dec!(250000))];
        let mut previous = Decimal::ZERO;

        for gross in (0..80).map(|i| Decimal::from(i) * dec!(1500000)) {
            let input = CalculationInput {
                frequency: PayFrequency::Yearly,
                gross_income: gross,
                pension: dec!(120000),
                deductions: deductions.clone(),
            };
            let result = calculate(&input);
            assert!(
                result.yearly_tax >= previous,
                "tax decreased at gross {}",
                gross
            );
            previous = result.yearly_tax;
        }
    }

    #[test]
    fn deductions_annualised_only_in_monthly_mode() {
        // Deduction amounts ride along with the x12 in monthly mode and are
        // taken as-is in yearly mode, exactly like gross and pension. A
        // monthly entry with the same deduction figure therefore does NOT
        // match the yearly entry.
        let yearly_input = CalculationInput {
            frequency: PayFrequency::Yearly,
            gross_income: dec!(6000000),
            pension: dec!(120000),
            deductions: vec![ded("Rent relief", dec!(120000))],
        };
        let monthly_same_figures = CalculationInput {
            frequency: PayFrequency::Monthly,
            gross_income: dec!(500000),
            pension: dec!(10000),
            deductions: vec![ded("Rent relief", dec!(120000))],
        };

        let yearly_result = calculate(&yearly_input);
        let monthly_result = calculate(&monthly_same_figures);

        // yearly: 120,000 off; monthly: 120,000 x 12 = 1,440,000 off
        assert_eq!(yearly_result.other_deductions, dec!(120000));
        assert_eq!(monthly_result.other_deductions, dec!(1440000));
        assert_eq!(yearly_result.taxable_income, dec!(3560000));
        assert_eq!(monthly_result.taxable_income, dec!(2240000));
        assert_ne!(yearly_result.yearly_tax, monthly_result.yearly_tax);

        // Dividing the deduction by 12 as well restores the equivalence
        let monthly_divided = CalculationInput {
            deductions: vec![ded("Rent relief", dec!(10000))],
            ..monthly_same_figures
        };
        assert_eq!(calculate(&monthly_divided).yearly_tax, yearly_result.yearly_tax);
    }

    #[test]
    fn over_deduction_clamps_taxable_to_zero() {
        let input = CalculationInput {
            frequency: PayFrequency::Yearly,
            gross_income: dec!(6000000),
            pension: dec!(10000000),
            deductions: vec![ded("Rent relief", dec!(2000000))],
        };

        let result = calculate(&input);
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.yearly_tax, Decimal::ZERO);
        assert_eq!(result.effective_rate, Decimal::ZERO);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let input = CalculationInput {
            frequency: PayFrequency::Yearly,
            gross_income: dec!(-5000000),
            pension: dec!(-100000),
            deductions: vec![ded("Rent relief", dec!(-50000))],
        };

        let result = calculate(&input);
        assert_eq!(result.gross, Decimal::ZERO);
        assert_eq!(result.pension, Decimal::ZERO);
        assert_eq!(result.other_deductions, Decimal::ZERO);
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.yearly_tax, Decimal::ZERO);
    }

    #[test]
    fn gross_below_threshold_owes_nothing() {
        let result = calculate(&yearly(dec!(700000)));
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.yearly_tax, Decimal::ZERO);
    }

    #[test]
    fn monthly_tax_is_yearly_over_twelve() {
        let result = calculate(&yearly(dec!(100000000)));
        assert_eq!(result.monthly_tax * dec!(12), result.yearly_tax);
    }
}

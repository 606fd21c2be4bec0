pub mod calculator;
pub mod schedule;

pub use calculator::{calculate, BandResult, CalculationResult};
pub use schedule::TaxBand;

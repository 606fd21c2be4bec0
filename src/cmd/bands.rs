//! Bands command - display the statutory schedule and reliefs

use crate::tax::schedule;
use crate::utils;
use clap::Args;
use serde::Serialize;
use std::io;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct BandsCommand {
    /// Output as CSV instead of a formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Band")]
    band: &'static str,
    #[tabled(rename = "Width")]
    width: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

#[derive(Debug, Serialize)]
struct ScheduleCsvRecord {
    band: &'static str,
    width: String,
    rate_pct: String,
}

impl BandsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.csv {
            let records = schedule::bands().map(|b| ScheduleCsvRecord {
                band: b.label,
                width: b.width.map(|w| w.to_string()).unwrap_or_default(),
                rate_pct: format!("{:.0}", b.rate_pct()),
            });
            utils::write_csv(records, io::stdout())
        } else {
            self.print_table();
            Ok(())
        }
    }

    fn print_table(&self) {
        let rows: Vec<ScheduleRow> = schedule::bands()
            .iter()
            .map(|b| ScheduleRow {
                band: b.label,
                width: b
                    .width
                    .map(|w| format!("{:.2}", w))
                    .unwrap_or_else(|| "unbounded".to_string()),
                rate: format!("{:.0}%", b.rate_pct()),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());

        println!();
        println!("PROGRESSIVE BAND SCHEDULE (annual amounts)");
        println!();
        println!("{table}");
        println!();
        println!(
            "Threshold relief: \u{20A6}{:.2} off gross, floored at zero",
            schedule::threshold_relief()
        );
        println!(
            "Consolidated relief: the greater of \u{20A6}200,000.00 or 1% of gross, plus 20% of gross"
        );
        println!();
    }
}

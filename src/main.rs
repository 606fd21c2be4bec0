use clap::{Parser, Subcommand};

mod cmd;
mod input;
mod tax;
mod utils;

#[derive(Parser, Debug)]
#[command(
    name = "pitc",
    version,
    about = "Personal income tax calculator with progressive bands and statutory reliefs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate tax for a single set of figures
    Calculate(cmd::calculate::CalculateCommand),
    /// Show the statutory band schedule and reliefs
    Bands(cmd::bands::BandsCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    match Cli::parse().command {
        Command::Calculate(cmd) => cmd.exec(),
        Command::Bands(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}

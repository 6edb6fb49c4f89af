mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{CalendarCommand, ValidateCommand};

/// Rota CLI - duty roster validation and inspection tool
#[derive(Debug, Parser)]
#[command(
    name = "rota",
    version,
    about = "Duty roster validation and inspection tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a saved roster document
    Validate(ValidateCommand),
    /// Print the resolved duty calendar of a roster document
    Calendar(CalendarCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Validate(cmd) => cmd.execute()?,
        Commands::Calendar(cmd) => cmd.execute()?,
    };

    std::process::exit(exit_code);
}

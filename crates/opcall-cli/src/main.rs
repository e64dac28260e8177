//! OpCall CLI
//!
//! Command-line interface for the parameter-accumulating dispatcher

use clap::{Parser, Subcommand};
use opcall_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "opcall")]
#[command(about = "OpCall - accumulate numbers, then run named commands over them", long_about = None)]
struct Cli {
    /// Logging profile (development, production)
    #[arg(long, global = true, default_value = "development")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Feed tokens through a dispatcher and print each result
    Run(commands::run::RunArgs),
    /// List the registered command names
    Commands(commands::list::ListArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Commands(args) => commands::list::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Commands listing
//!
//! Usage: opcall commands [--config <FILE>]

use clap::Args;
use std::path::PathBuf;

use super::{into_boxed, load_config};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute commands listing
pub fn execute(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    let registry = config.build_registry().map_err(into_boxed)?;

    for name in registry.names() {
        println!("{}", name);
    }

    Ok(())
}

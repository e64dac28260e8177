//! Run command
//!
//! Usage: opcall run [--config <FILE>] [--input <FILE.json>] [--json] [TOKENS]...
//!
//! Inputs from `--input` (a JSON array) are submitted first, then the
//! positional tokens. A token that parses as a number is an operand; any
//! other token names a command.

use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use opcall_core::{DispatchError, Dispatcher, Input, Operand};
use serde_json::Value;

use super::{into_boxed, load_config};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON file holding an array of numbers and command names
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print each result as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Numbers and command names, processed in order
    #[arg(allow_hyphen_values = true, allow_negative_numbers = true, trailing_var_arg = true)]
    pub tokens: Vec<String>,
}

/// Execute run command
pub fn execute(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    let registry = Arc::new(config.build_registry().map_err(into_boxed)?);
    let mut dispatcher = Dispatcher::with_config(registry, &config);

    if let Some(path) = &args.input {
        let source = std::fs::read_to_string(path).map_err(|e| {
            into_boxed(DispatchError::Io {
                message: format!("{}: {}", path.display(), e),
            })
        })?;
        let values: Vec<Value> = serde_json::from_str(&source)
            .map_err(|e| into_boxed(DispatchError::from(e)))?;

        for value in &values {
            let command = value.as_str().map(str::to_string);
            let result = dispatcher.submit_value(value).map_err(into_boxed)?;
            report(command.as_deref(), result, args.json);
        }
    }

    for token in &args.tokens {
        let input = Input::parse_token(token).map_err(into_boxed)?;
        let command = match &input {
            Input::Token(name) => Some(name.clone()),
            Input::Number(_) => None,
        };
        let result = dispatcher.submit(input).map_err(into_boxed)?;
        report(command.as_deref(), result, args.json);
    }

    Ok(())
}

fn report(command: Option<&str>, result: Option<Operand>, json: bool) {
    let Some(result) = result else {
        return;
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "command": command, "result": result })
        );
    } else {
        println!("{}", result);
    }
}

use std::sync::Arc;

use opcall_core::{CommandRegistry, Dispatcher, Input, Operand, Result};

/// Dispatcher over a fresh registry holding every built-in
#[allow(dead_code)]
pub fn new_dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(CommandRegistry::with_builtins()))
}

/// Submit every input, collecting each outcome (errors included)
#[allow(dead_code)]
pub fn submit_all(dispatcher: &mut Dispatcher, inputs: &[Input]) -> Vec<Result<Option<Operand>>> {
    inputs
        .iter()
        .cloned()
        .map(|input| dispatcher.submit(input))
        .collect()
}

/// Results of every executed command, stopping at the first error
#[allow(dead_code)]
pub fn results_of(dispatcher: &mut Dispatcher, inputs: &[Input]) -> Result<Vec<Operand>> {
    let mut results = Vec::new();
    dispatcher.run(inputs.iter().cloned(), |r| results.push(r))?;
    Ok(results)
}

/// Shorthand for a numeric input
#[allow(dead_code)]
pub fn num(value: f64) -> Input {
    Input::Number(Operand::new(value).unwrap())
}

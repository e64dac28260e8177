//! Built-in commands
//!
//! Reducing commands (`max`, `min`, `mean`) fail with
//! `CommandError::EmptyOperandSet` on an empty operand set; they never fall
//! back to a default value. `sum` of nothing is `0`.

use std::sync::Arc;

use crate::errors::CommandError;
use crate::operand::Operand;
use crate::registry::CommandFn;

type CommandResult = std::result::Result<Operand, CommandError>;

/// Names of every built-in command
pub const BUILTIN_NAMES: [&str; 4] = ["max", "min", "sum", "mean"];

/// Look up a built-in command function by name
pub fn builtin(name: &str) -> Option<CommandFn> {
    let func: CommandFn = match name {
        "max" => Arc::new(max),
        "min" => Arc::new(min),
        "sum" => Arc::new(sum),
        "mean" => Arc::new(mean),
        _ => return None,
    };
    Some(func)
}

/// Every built-in command paired with its name
pub fn all() -> Vec<(&'static str, CommandFn)> {
    BUILTIN_NAMES
        .iter()
        .filter_map(|name| builtin(name).map(|func| (*name, func)))
        .collect()
}

/// Largest operand
pub fn max(operands: &[Operand]) -> CommandResult {
    operands
        .iter()
        .copied()
        .reduce(|acc, x| if x > acc { x } else { acc })
        .ok_or(CommandError::EmptyOperandSet)
}

/// Smallest operand
pub fn min(operands: &[Operand]) -> CommandResult {
    operands
        .iter()
        .copied()
        .reduce(|acc, x| if x < acc { x } else { acc })
        .ok_or(CommandError::EmptyOperandSet)
}

/// Sum of all operands, `0` when there are none
pub fn sum(operands: &[Operand]) -> CommandResult {
    let total: f64 = operands.iter().map(|o| o.value()).sum();
    checked(total, operands)
}

/// Arithmetic mean
///
/// Falls back to summing pre-scaled operands when the plain sum overflows,
/// so the mean of finite operands is always finite.
pub fn mean(operands: &[Operand]) -> CommandResult {
    if operands.is_empty() {
        return Err(CommandError::EmptyOperandSet);
    }
    let n = operands.len() as f64;
    let total: f64 = operands.iter().map(|o| o.value()).sum();
    let value = if total.is_infinite() {
        operands.iter().map(|o| o.value() / n).sum::<f64>()
    } else {
        total / n
    };
    checked(value, operands)
}

/// Reject NaN outright, and infinities that did not come from an infinite operand
fn checked(value: f64, operands: &[Operand]) -> CommandResult {
    let inputs_finite = operands.iter().all(|o| o.value().is_finite());
    if value.is_nan() || (inputs_finite && value.is_infinite()) {
        return Err(CommandError::NonFiniteResult { value });
    }
    Operand::new(value).map_err(|_| CommandError::NonFiniteResult { value })
}

//! Command registry
//!
//! Maps command names to pure functions over the accumulated operands.
//! A registry is built up with [`CommandRegistry::register`] and then shared
//! read-only between dispatchers behind an `Arc`.
//!
//! ## Duplicate policy
//!
//! Registering a name twice is rejected with `DuplicateCommand`; an existing
//! binding is never overwritten.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::builtins;
use crate::errors::{CommandError, DispatchError, Result};
use crate::operand::Operand;

/// Signature of a command function
pub type CommandFn =
    Arc<dyn Fn(&[Operand]) -> std::result::Result<Operand, CommandError> + Send + Sync>;

/// A name bound to a command function
#[derive(Clone)]
pub struct Command {
    name: String,
    func: CommandFn,
}

impl Command {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the command function directly, without lifting its error
    pub fn call(&self, operands: &[Operand]) -> std::result::Result<Operand, CommandError> {
        (self.func)(operands)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish()
    }
}

/// Name → command mapping
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Create a registry holding every built-in command
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, func) in builtins::all() {
            // Built-in names are distinct and non-empty.
            registry.commands.insert(
                name.to_string(),
                Command {
                    name: name.to_string(),
                    func,
                },
            );
        }
        registry
    }

    /// Bind `name` to `func`
    ///
    /// # Errors
    ///
    /// * `InvalidCommandName` - If `name` is empty or whitespace-only
    /// * `DuplicateCommand` - If `name` is already bound
    pub fn register<F>(&mut self, name: impl Into<String>, func: F) -> Result<()>
    where
        F: Fn(&[Operand]) -> std::result::Result<Operand, CommandError> + Send + Sync + 'static,
    {
        self.register_arc(name, Arc::new(func))
    }

    /// Bind `name` to an already shared command function
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_arc(&mut self, name: impl Into<String>, func: CommandFn) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DispatchError::InvalidCommandName { name });
        }
        if self.contains(&name) {
            return Err(DispatchError::DuplicateCommand { name });
        }

        tracing::debug!(command = %name, "command registered");
        self.commands.insert(name.clone(), Command { name, func });
        Ok(())
    }

    /// Look up a command by name
    ///
    /// # Errors
    ///
    /// Returns `UnknownCommand` if `name` is not registered.
    pub fn resolve(&self, name: &str) -> Result<&Command> {
        self.commands
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand {
                name: name.to_string(),
            })
    }

    /// Resolve `name` and call it with `operands`
    ///
    /// # Errors
    ///
    /// * `UnknownCommand` - If `name` is not registered
    /// * `EmptyOperandSet` - If the command needs at least one operand
    /// * `CommandExecution` - If the command fails for any other reason,
    ///   wrapping the cause
    pub fn invoke(&self, name: &str, operands: &[Operand]) -> Result<Operand> {
        let command = self.resolve(name)?;
        command.call(operands).map_err(|cause| match cause {
            CommandError::EmptyOperandSet => DispatchError::EmptyOperandSet {
                command: command.name().to_string(),
            },
            cause => DispatchError::CommandExecution {
                command: command.name().to_string(),
                cause,
            },
        })
    }

    /// Whether `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

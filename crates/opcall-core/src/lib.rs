//! OpCall Core - parameter-accumulating command dispatcher
//!
//! Numeric inputs accumulate as operands; a string input names a command
//! that runs against the operands accumulated so far. This crate provides:
//! - Operand and input classification
//! - The parameter store (optionally capped)
//! - The command registry and built-in commands (`max`, `min`, `sum`, `mean`)
//! - The `Dispatcher` façade and its event-driven `Choreography` variant
//! - TOML configuration, the error facility and the logging facility

pub mod builtins;
pub mod choreography;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod logging_facility;
pub mod operand;
pub mod params;
pub mod registry;

// Used by the logging macros through `$crate`.
pub use opcall_core_types;

// Re-export commonly used types
pub use choreography::Choreography;
pub use config::DispatcherConfig;
pub use dispatcher::{Dispatcher, RunSummary};
pub use errors::{CommandError, DispatchError, ExError, ExErrorKind, Result};
pub use operand::{Input, Operand};
pub use params::ParameterStore;
pub use registry::{Command, CommandFn, CommandRegistry};

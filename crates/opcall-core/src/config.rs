//! Dispatcher configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! max_operands = 1000
//! builtins = ["max", "min"]
//! ```
//!
//! Both keys are optional. Without `max_operands` the parameter store is
//! unbounded; without `builtins` every built-in command is registered.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builtins::{self, BUILTIN_NAMES};
use crate::errors::{DispatchError, Result};
use crate::registry::CommandRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Cap on accumulated operands per dispatcher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_operands: Option<usize>,

    /// Built-in commands to register
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtins: Option<Vec<String>>,
}

impl DispatcherConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for malformed TOML, unknown keys, a zero
    /// `max_operands`, or an unknown built-in name.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: DispatcherConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| DispatchError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&source)
    }

    /// Check semantic constraints not expressible in the TOML schema
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.max_operands == Some(0) {
            return Err(DispatchError::InvalidConfig {
                reason: "max_operands must be greater than zero".to_string(),
            });
        }

        if let Some(names) = &self.builtins {
            for name in names {
                if !BUILTIN_NAMES.contains(&name.as_str()) {
                    return Err(DispatchError::InvalidConfig {
                        reason: format!(
                            "unknown builtin {:?} (available: {})",
                            name,
                            BUILTIN_NAMES.join(", ")
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Build the registry described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if validation fails, or `DuplicateCommand`
    /// if a built-in is listed twice.
    pub fn build_registry(&self) -> Result<CommandRegistry> {
        self.validate()?;

        let Some(names) = &self.builtins else {
            return Ok(CommandRegistry::with_builtins());
        };

        let mut registry = CommandRegistry::new();
        for name in names {
            let func = builtins::builtin(name).ok_or_else(|| DispatchError::InvalidConfig {
                reason: format!("unknown builtin {:?}", name),
            })?;
            registry.register_arc(name.clone(), func)?;
        }
        Ok(registry)
    }
}

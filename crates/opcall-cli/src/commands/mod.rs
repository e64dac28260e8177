pub mod list;
pub mod run;

use std::path::Path;

use opcall_core::{DispatchError, DispatcherConfig, ExError};

/// Load the config file if one was given, otherwise the defaults
pub fn load_config(path: Option<&Path>) -> Result<DispatcherConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => DispatcherConfig::load(path).map_err(into_boxed),
        None => Ok(DispatcherConfig::default()),
    }
}

/// Surface a dispatch error through the canonical error facility
pub fn into_boxed(err: DispatchError) -> Box<dyn std::error::Error> {
    Box::new(ExError::from(err))
}

//! Operands and input classification
//!
//! An [`Operand`] is the only value that may enter a parameter store. Inputs
//! arrive either already typed ([`Input`]) or untyped as JSON values, which
//! [`Input::classify`] sorts into numbers, command tokens, or rejects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{DispatchError, Result};

/// A numeric value accumulated for later use by a command
///
/// NaN is never a valid operand; infinities are.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Operand(f64);

impl Operand {
    /// Create an operand, rejecting NaN
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedInputType` if `value` is NaN.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(DispatchError::UnsupportedInputType {
                type_name: "nan".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl TryFrom<f64> for Operand {
    type Error = DispatchError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

/// A classified dispatcher input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Accumulated into the parameter store
    Number(Operand),
    /// Interpreted as a command name
    Token(String),
}

impl Input {
    /// Build a command token input
    pub fn token(name: impl Into<String>) -> Self {
        Input::Token(name.into())
    }

    /// Classify an untyped JSON value
    ///
    /// Numbers become operands, strings become command tokens; every other
    /// JSON type is rejected.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedInputType` naming the JSON type for objects,
    /// arrays, booleans and null.
    pub fn classify(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                let v = n
                    .as_f64()
                    .ok_or_else(|| DispatchError::UnsupportedInputType {
                        type_name: "number".to_string(),
                    })?;
                Ok(Input::Number(Operand::new(v)?))
            }
            Value::String(s) => Ok(Input::Token(s.clone())),
            other => Err(DispatchError::UnsupportedInputType {
                type_name: json_type_name(other).to_string(),
            }),
        }
    }

    /// Classify a raw command-line token
    ///
    /// Anything that parses as a number is an operand. Anything that parses
    /// as a non-string JSON literal (`{..}`, `[..]`, `true`, `null`) is an
    /// unsupported structured input. A quoted JSON string is unquoted.
    /// Everything else is a command token.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedInputType` for structured literals and NaN.
    pub fn parse_token(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if let Ok(v) = trimmed.parse::<f64>() {
            return Ok(Input::Number(Operand::new(v)?));
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::String(s)) => Ok(Input::Token(s)),
            Ok(value) => Self::classify(&value),
            Err(_) => Ok(Input::Token(trimmed.to_string())),
        }
    }

    /// Name of the classification, as logged under `input_kind`
    pub fn kind_name(&self) -> &'static str {
        match self {
            Input::Number(_) => opcall_core_types::schema::INPUT_KIND_NUMBER,
            Input::Token(_) => opcall_core_types::schema::INPUT_KIND_TOKEN,
        }
    }
}

impl From<Operand> for Input {
    fn from(value: Operand) -> Self {
        Input::Number(value)
    }
}

impl From<i32> for Input {
    fn from(value: i32) -> Self {
        Input::Number(Operand::from(value))
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Input::Token(value.to_string())
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Input::Token(value)
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

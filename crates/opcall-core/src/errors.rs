use thiserror::Error;

/// Result type alias using DispatchError
pub type Result<T> = std::result::Result<T, DispatchError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// log assertions and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Classification
    UnsupportedInputType,
    InvalidInput,

    // Registry
    UnknownCommand,
    DuplicateCommand,

    // Execution
    EmptyOperandSet,
    NonFiniteResult,
    CommandExecution,

    // Parameter store
    CapacityExceeded,

    // Configuration / IO
    InvalidConfig,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnsupportedInputType => "ERR_UNSUPPORTED_INPUT_TYPE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownCommand => "ERR_UNKNOWN_COMMAND",
            ExErrorKind::DuplicateCommand => "ERR_DUPLICATE_COMMAND",
            ExErrorKind::EmptyOperandSet => "ERR_EMPTY_OPERAND_SET",
            ExErrorKind::NonFiniteResult => "ERR_NON_FINITE_RESULT",
            ExErrorKind::CommandExecution => "ERR_COMMAND_EXECUTION",
            ExErrorKind::CapacityExceeded => "ERR_CAPACITY_EXCEEDED",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for
/// debugging. Built from a [`DispatchError`] via `From`.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    command: Option<String>,
    operand_count: Option<usize>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            command: None,
            operand_count: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add command name context
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Add the number of operands visible at the time of failure
    pub fn with_operand_count(mut self, count: usize) -> Self {
        self.operand_count = Some(count);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn operand_count(&self) -> Option<usize> {
        self.operand_count
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(command) = &self.command {
            write!(f, " (command: {})", command)?;
        }
        if let Some(count) = self.operand_count {
            write!(f, " (operands: {})", count)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Failure raised by a command function itself
///
/// Command functions only see their operands, so this carries no command
/// name; the registry attaches it when lifting into [`DispatchError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// A reducing command was given no operands
    #[error("operand set is empty")]
    EmptyOperandSet,

    /// Finite operands produced a non-finite result (overflow)
    #[error("result is not finite: {value}")]
    NonFiniteResult { value: f64 },

    /// Any other failure reported by the command
    #[error("{reason}")]
    Failed { reason: String },
}

/// Error taxonomy for dispatcher operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    // ===== Classification Errors =====
    /// Input is neither a numeric operand nor a command token
    #[error("Unsupported input type: {type_name}")]
    UnsupportedInputType { type_name: String },

    // ===== Registry Errors =====
    /// Command token does not resolve in the registry
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// Command name is already bound
    #[error("Command already registered: {name}")]
    DuplicateCommand { name: String },

    /// Command name is empty or whitespace-only
    #[error("Invalid command name: {name:?}")]
    InvalidCommandName { name: String },

    // ===== Execution Errors =====
    /// A reducing command was executed with zero accumulated operands
    #[error("Command {command} requires at least one operand")]
    EmptyOperandSet { command: String },

    /// A command function failed
    #[error("Command {command} failed: {cause}")]
    CommandExecution {
        command: String,
        #[source]
        cause: CommandError,
    },

    // ===== Parameter Store Errors =====
    /// Appending would exceed the configured operand cap
    #[error("Parameter store is full: capacity {capacity}")]
    CapacityExceeded { capacity: usize },

    // ===== Configuration / IO Errors =====
    /// Configuration is syntactically or semantically invalid
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Reading an input or config source failed
    #[error("IO error: {message}")]
    Io { message: String },

    /// JSON input could not be decoded
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<&CommandError> for ExError {
    fn from(err: &CommandError) -> Self {
        match err {
            CommandError::EmptyOperandSet => {
                ExError::new(ExErrorKind::EmptyOperandSet).with_message("Operand set is empty")
            }
            CommandError::NonFiniteResult { value } => ExError::new(ExErrorKind::NonFiniteResult)
                .with_message(format!("Result is not finite: {}", value)),
            CommandError::Failed { reason } => {
                ExError::new(ExErrorKind::Internal).with_message(reason.clone())
            }
        }
    }
}

/// Conversion from DispatchError to the canonical ExError
impl From<DispatchError> for ExError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::UnsupportedInputType { type_name } => {
                ExError::new(ExErrorKind::UnsupportedInputType)
                    .with_op("submit")
                    .with_message(format!("Unsupported input type: {}", type_name))
            }

            DispatchError::UnknownCommand { name } => ExError::new(ExErrorKind::UnknownCommand)
                .with_command(name)
                .with_message("Command is not registered"),

            DispatchError::DuplicateCommand { name } => {
                ExError::new(ExErrorKind::DuplicateCommand)
                    .with_op("register")
                    .with_command(name)
                    .with_message("Command is already registered")
            }

            DispatchError::InvalidCommandName { name } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("register")
                .with_message(format!("Invalid command name: {:?}", name)),

            DispatchError::EmptyOperandSet { command } => {
                ExError::new(ExErrorKind::EmptyOperandSet)
                    .with_command(command)
                    .with_operand_count(0)
                    .with_message("Command requires at least one operand")
            }

            DispatchError::CommandExecution { command, cause } => {
                let source = ExError::from(&cause);
                ExError::new(ExErrorKind::CommandExecution)
                    .with_command(command)
                    .with_message(format!("Command failed: {}", cause))
                    .with_source(source)
            }

            DispatchError::CapacityExceeded { capacity } => {
                ExError::new(ExErrorKind::CapacityExceeded)
                    .with_op("append")
                    .with_operand_count(capacity)
                    .with_message(format!("Parameter store is full (capacity {})", capacity))
            }

            DispatchError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            DispatchError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),

            DispatchError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DispatchError {
    fn from(err: toml::de::Error) -> Self {
        DispatchError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for DispatchError {
    fn from(err: std::io::Error) -> Self {
        DispatchError::Io {
            message: err.to_string(),
        }
    }
}

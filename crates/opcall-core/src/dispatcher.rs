//! Dispatcher: routes each input to accumulation or command execution
//!
//! ## Routing
//!
//! - **Accumulate**: a numeric input is appended to the parameter store;
//!   nothing is returned.
//! - **Execute**: a token is resolved in the registry and invoked against the
//!   current operands; the result is returned.
//!
//! Operands are never cleared by an execution. Call [`Dispatcher::reset`] to
//! start over.
//!
//! ## Atomicity
//!
//! A failed input leaves the parameter store exactly as it was: a failed
//! execution appends nothing and a rejected append stores nothing.
//!
//! ## Logging Ownership
//!
//! The dispatcher owns lifecycle logging (`log_op_start!`, `log_op_end!`,
//! `log_op_error!`) for `submit` and `run`.

use std::sync::Arc;
use std::time::Instant;

use opcall_core_types::schema::{
    FIELD_COMMAND, FIELD_INPUT_KIND, FIELD_OPERAND_COUNT, FIELD_RESULT, FIELD_RUN_ID,
};
use opcall_core_types::{DispatcherId, RunId};
use serde_json::Value;

use crate::config::DispatcherConfig;
use crate::errors::Result;
use crate::operand::{json_type_name, Input, Operand};
use crate::params::ParameterStore;
use crate::registry::CommandRegistry;
use crate::{log_op_end, log_op_error, log_op_start};

/// Totals for one [`Dispatcher::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub run_id: RunId,
    /// Inputs consumed, including the one that failed, if any
    pub inputs: usize,
    /// Results delivered to the sink
    pub executions: usize,
}

/// Parameter-accumulating command dispatcher
///
/// Owns one [`ParameterStore`]; shares a read-only [`CommandRegistry`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use opcall_core::{CommandRegistry, Dispatcher, Operand};
///
/// let registry = Arc::new(CommandRegistry::with_builtins());
/// let mut dispatcher = Dispatcher::new(registry);
///
/// assert_eq!(dispatcher.submit(10).unwrap(), None);
/// assert_eq!(dispatcher.submit(20).unwrap(), None);
/// assert_eq!(dispatcher.submit("max").unwrap(), Some(Operand::from(20)));
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    id: DispatcherId,
    registry: Arc<CommandRegistry>,
    params: ParameterStore,
}

impl Dispatcher {
    /// Create a dispatcher with an empty, unbounded parameter store
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self::with_store(registry, ParameterStore::new())
    }

    /// Create a dispatcher around an existing (usually capped) store
    pub fn with_store(registry: Arc<CommandRegistry>, params: ParameterStore) -> Self {
        Self {
            id: DispatcherId::new(),
            registry,
            params,
        }
    }

    /// Create a dispatcher honouring `config.max_operands`
    pub fn with_config(registry: Arc<CommandRegistry>, config: &DispatcherConfig) -> Self {
        let params = match config.max_operands {
            Some(cap) => ParameterStore::with_capacity(cap),
            None => ParameterStore::new(),
        };
        Self::with_store(registry, params)
    }

    pub fn id(&self) -> &DispatcherId {
        &self.id
    }

    /// Operands accumulated so far, in submission order
    pub fn operands(&self) -> &[Operand] {
        self.params.snapshot()
    }

    /// Classify and route one input
    ///
    /// Returns `Some(result)` for a command token, `None` for a number.
    ///
    /// # Errors
    ///
    /// * `CapacityExceeded` - If the store is capped and full
    /// * `UnknownCommand` - If the token does not resolve
    /// * `EmptyOperandSet` - If a reducing command sees no operands
    /// * `CommandExecution` - If the command fails otherwise
    pub fn submit(&mut self, input: impl Into<Input>) -> Result<Option<Operand>> {
        let input = input.into();
        self.process(input.kind_name(), Ok(input))
    }

    /// Classify an untyped JSON value, then route it like [`submit`](Self::submit)
    ///
    /// A rejected value is logged under the same `submit` lifecycle, with
    /// its JSON type as `input_kind`.
    ///
    /// # Errors
    ///
    /// `UnsupportedInputType` for objects, arrays, booleans and null, with
    /// the store untouched; otherwise as [`submit`](Self::submit).
    pub fn submit_value(&mut self, value: &Value) -> Result<Option<Operand>> {
        let classified = Input::classify(value);
        let input_kind = match &classified {
            Ok(input) => input.kind_name(),
            Err(_) => json_type_name(value),
        };
        self.process(input_kind, classified)
    }

    /// Clear the parameter store. Idempotent.
    pub fn reset(&mut self) {
        self.params.clear();
        tracing::debug!(dispatcher_id = %self.id, "parameter store reset");
    }

    /// Feed every input in order, reporting each result to `sink`
    ///
    /// `sink` is called exactly once per executed command. The run stops at
    /// the first failing input and returns its error; results already
    /// delivered stay delivered.
    ///
    /// # Errors
    ///
    /// The first error raised by [`submit`](Self::submit).
    pub fn run<I, S>(&mut self, inputs: I, mut sink: S) -> Result<RunSummary>
    where
        I: IntoIterator,
        I::Item: Into<Input>,
        S: FnMut(Operand),
    {
        let run_id = RunId::new();
        log_op_start!("run", self.id, { FIELD_RUN_ID } = %run_id);
        let started = Instant::now();

        let mut summary = RunSummary {
            run_id,
            inputs: 0,
            executions: 0,
        };

        for input in inputs {
            summary.inputs += 1;
            match self.submit(input) {
                Ok(Some(result)) => {
                    summary.executions += 1;
                    sink(result);
                }
                Ok(None) => {}
                Err(e) => {
                    log_op_error!(
                        "run",
                        self.id,
                        started,
                        e.clone(),
                        { FIELD_RUN_ID } = %summary.run_id
                    );
                    return Err(e);
                }
            }
        }

        log_op_end!(
            "run",
            self.id,
            started,
            { FIELD_RUN_ID } = %summary.run_id,
            inputs = summary.inputs as u64,
            executions = summary.executions as u64
        );

        Ok(summary)
    }

    /// One `submit` lifecycle: start event, routing, then end or error event
    fn process(
        &mut self,
        input_kind: &'static str,
        input: Result<Input>,
    ) -> Result<Option<Operand>> {
        log_op_start!("submit", self.id, { FIELD_INPUT_KIND } = input_kind);
        let started = Instant::now();

        let result = input.and_then(|input| self.route(input)).map_err(|e| {
            log_op_error!(
                "submit",
                self.id,
                started,
                e.clone(),
                { FIELD_INPUT_KIND } = input_kind
            );
            e
        })?;

        log_op_end!(
            "submit",
            self.id,
            started,
            { FIELD_INPUT_KIND } = input_kind,
            { FIELD_OPERAND_COUNT } = self.params.len() as u64,
            { FIELD_RESULT } = ?result.map(Operand::value)
        );

        Ok(result)
    }

    fn route(&mut self, input: Input) -> Result<Option<Operand>> {
        match input {
            Input::Number(value) => {
                self.params.append(value)?;
                Ok(None)
            }
            Input::Token(name) => {
                let result = self.registry.invoke(&name, self.params.snapshot())?;
                tracing::debug!(
                    dispatcher_id = %self.id,
                    { FIELD_COMMAND } = %name,
                    { FIELD_OPERAND_COUNT } = self.params.len(),
                    { FIELD_RESULT } = %result,
                    "command executed"
                );
                Ok(Some(result))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DispatchError;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(CommandRegistry::with_builtins()))
    }

    #[test]
    fn test_numbers_accumulate_silently() {
        let mut d = dispatcher();
        assert_eq!(d.submit(10).unwrap(), None);
        assert_eq!(d.submit(20).unwrap(), None);
        assert_eq!(d.operands(), &[Operand::from(10), Operand::from(20)]);
    }

    #[test]
    fn test_token_executes_against_operands() {
        let mut d = dispatcher();
        d.submit(10).unwrap();
        d.submit(20).unwrap();
        assert_eq!(d.submit("max").unwrap(), Some(Operand::from(20)));
        assert_eq!(d.submit("min").unwrap(), Some(Operand::from(10)));
    }

    #[test]
    fn test_execution_does_not_reset() {
        let mut d = dispatcher();
        d.submit(1).unwrap();
        d.submit("sum").unwrap();
        assert_eq!(d.operands().len(), 1);
    }

    #[test]
    fn test_unknown_command_leaves_store_untouched() {
        let mut d = dispatcher();
        d.submit(3).unwrap();
        let err = d.submit("median").unwrap_err();
        assert!(matches!(err, DispatchError::UnknownCommand { .. }));
        assert_eq!(d.operands(), &[Operand::from(3)]);
    }

    #[test]
    fn test_submit_value_rejects_object() {
        let mut d = dispatcher();
        let err = d.submit_value(&json!({"x": 1})).unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnsupportedInputType {
                type_name: "object".to_string()
            }
        );
        assert!(d.operands().is_empty());
    }

    #[test]
    fn test_with_config_applies_cap() {
        let config = DispatcherConfig {
            max_operands: Some(1),
            builtins: None,
        };
        let mut d = Dispatcher::with_config(Arc::new(CommandRegistry::with_builtins()), &config);
        d.submit(1).unwrap();
        assert_eq!(
            d.submit(2).unwrap_err(),
            DispatchError::CapacityExceeded { capacity: 1 }
        );
    }

    #[test]
    fn test_run_reports_each_result() {
        let mut d = dispatcher();
        let mut results = Vec::new();
        let inputs: Vec<Input> = vec![
            Input::from(5),
            Input::token("max"),
            Input::from(100),
            Input::token("max"),
        ];

        let summary = d.run(inputs, |r| results.push(r)).unwrap();

        assert_eq!(results, vec![Operand::from(5), Operand::from(100)]);
        assert_eq!(summary.inputs, 4);
        assert_eq!(summary.executions, 2);
    }

    #[test]
    fn test_run_stops_at_first_error() {
        let mut d = dispatcher();
        let mut results = Vec::new();
        let inputs: Vec<Input> = vec![
            Input::from(1),
            Input::token("max"),
            Input::token("nope"),
            Input::from(2),
        ];

        let err = d.run(inputs, |r| results.push(r)).unwrap_err();

        assert!(matches!(err, DispatchError::UnknownCommand { .. }));
        assert_eq!(results, vec![Operand::from(1)]);
        assert_eq!(d.operands(), &[Operand::from(1)]);
    }

    #[test]
    fn test_dispatchers_do_not_share_operands() {
        let registry = Arc::new(CommandRegistry::with_builtins());
        let mut a = Dispatcher::new(registry.clone());
        let mut b = Dispatcher::new(registry);

        a.submit(9).unwrap();
        assert!(b.operands().is_empty());
        assert!(matches!(
            b.submit("max"),
            Err(DispatchError::EmptyOperandSet { .. })
        ));
        assert_ne!(a.id(), b.id());
    }
}

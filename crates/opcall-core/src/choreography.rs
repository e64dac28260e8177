//! Event-driven variant of the dispatcher
//!
//! Three stages talk only through messages:
//!
//! - **incoming** classifies inputs and receives returned results
//! - **control** collects parameters and turns tokens into calls
//! - **processing** runs commands
//!
//! Each channel is a typed FIFO queue. [`Choreography::emit_input`] enqueues
//! one input and drains all queues until they are empty, always serving the
//! deepest stage first (processing, then control, then incoming). A call
//! therefore observes exactly the parameters emitted before it, and results
//! come back in input order. Behaviour matches [`Dispatcher`] input for input.
//!
//! [`Dispatcher`]: crate::dispatcher::Dispatcher

use std::collections::VecDeque;
use std::sync::Arc;

use crate::errors::Result;
use crate::operand::{Input, Operand};
use crate::params::ParameterStore;
use crate::registry::CommandRegistry;

/// Messages on the incoming channel
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingMsg {
    Input(Input),
    Return(Operand),
}

/// Messages on the control channel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMsg {
    Parameter(Operand),
    Call(String),
}

/// Messages on the processing channel
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingMsg {
    /// `operands` is a copy of the parameters at the time of the call
    Invoke {
        command: String,
        operands: Vec<Operand>,
    },
}

/// Message-passing dispatcher
#[derive(Debug)]
pub struct Choreography {
    registry: Arc<CommandRegistry>,
    parameters: ParameterStore,
    incoming: VecDeque<IncomingMsg>,
    control: VecDeque<ControlMsg>,
    processing: VecDeque<ProcessingMsg>,
    returned: Vec<Operand>,
}

impl Choreography {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self::with_store(registry, ParameterStore::new())
    }

    pub fn with_store(registry: Arc<CommandRegistry>, parameters: ParameterStore) -> Self {
        Self {
            registry,
            parameters,
            incoming: VecDeque::new(),
            control: VecDeque::new(),
            processing: VecDeque::new(),
            returned: Vec::new(),
        }
    }

    /// Emit one input and drain every channel
    ///
    /// Returns the result delivered on the incoming channel, if the input
    /// was a command token.
    ///
    /// # Errors
    ///
    /// The first error raised by any stage. Pending messages are dropped so
    /// the next input starts from empty queues; parameters are unchanged.
    pub fn emit_input(&mut self, input: impl Into<Input>) -> Result<Option<Operand>> {
        let before = self.returned.len();
        self.incoming.push_back(IncomingMsg::Input(input.into()));

        if let Err(e) = self.drain() {
            self.incoming.clear();
            self.control.clear();
            self.processing.clear();
            return Err(e);
        }

        Ok(self.returned.get(before).copied())
    }

    /// Every result returned so far, in order
    pub fn returned(&self) -> &[Operand] {
        &self.returned
    }

    pub fn parameters(&self) -> &[Operand] {
        self.parameters.snapshot()
    }

    /// Clear collected parameters. Returned results are kept.
    pub fn reset(&mut self) {
        self.parameters.clear();
    }

    fn drain(&mut self) -> Result<()> {
        loop {
            if let Some(msg) = self.processing.pop_front() {
                self.on_processing(msg)?;
            } else if let Some(msg) = self.control.pop_front() {
                self.on_control(msg)?;
            } else if let Some(msg) = self.incoming.pop_front() {
                self.on_incoming(msg);
            } else {
                return Ok(());
            }
        }
    }

    fn on_incoming(&mut self, msg: IncomingMsg) {
        tracing::debug!(channel = "incoming", ?msg, "message");
        match msg {
            IncomingMsg::Input(Input::Number(value)) => {
                self.control.push_back(ControlMsg::Parameter(value))
            }
            IncomingMsg::Input(Input::Token(name)) => self.control.push_back(ControlMsg::Call(name)),
            IncomingMsg::Return(result) => self.returned.push(result),
        }
    }

    fn on_control(&mut self, msg: ControlMsg) -> Result<()> {
        tracing::debug!(channel = "control", ?msg, "message");
        match msg {
            ControlMsg::Parameter(value) => self.parameters.append(value)?,
            ControlMsg::Call(command) => self.processing.push_back(ProcessingMsg::Invoke {
                command,
                operands: self.parameters.snapshot().to_vec(),
            }),
        }
        Ok(())
    }

    fn on_processing(&mut self, msg: ProcessingMsg) -> Result<()> {
        tracing::debug!(channel = "processing", ?msg, "message");
        match msg {
            ProcessingMsg::Invoke { command, operands } => {
                let result = self.registry.invoke(&command, &operands)?;
                self.incoming.push_back(IncomingMsg::Return(result));
            }
        }
        Ok(())
    }
}

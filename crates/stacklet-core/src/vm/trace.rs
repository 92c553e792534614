//! Execution tracing for the VM.
//!
//! The VM emits one structured [`TraceEvent`] per executed instruction to an
//! externally supplied [`Tracer`] sink. Nothing here is tied to a particular
//! output device; the caller decides whether and how to render the events,
//! which keeps the VM testable without capturing console output.

use std::fmt;

use crate::ast::BinaryOperator;

/// One step of VM execution: the operation performed, its operands, and the
/// resulting value or state change.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A constant was pushed onto the operand stack.
    Push {
        /// The pushed value
        value: i64,
    },
    /// A variable was read and its value pushed.
    Load {
        /// The variable name
        name: String,
        /// The value loaded
        value: i64,
    },
    /// The top of stack was popped and bound to a variable.
    Store {
        /// The variable name
        name: String,
        /// The value stored
        value: i64,
    },
    /// An arithmetic instruction combined the top two stack values.
    Binary {
        /// The operator applied
        operator: BinaryOperator,
        /// The left operand (pushed first, popped second)
        left: i64,
        /// The right operand (pushed second, popped first)
        right: i64,
        /// The pushed result
        result: i64,
    },
    /// The top of stack was discarded.
    Pop {
        /// The discarded value
        value: i64,
    },
}

impl fmt::Display for TraceEvent {
    /// Renders a human-readable trace line, e.g. `PUSH 42`,
    /// `STORE x = 45`, `LOAD x = 42`, `ADD: 1 + 2 = 3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Push { value } => write!(f, "PUSH {}", value),
            TraceEvent::Load { name, value } => write!(f, "LOAD {} = {}", name, value),
            TraceEvent::Store { name, value } => write!(f, "STORE {} = {}", name, value),
            TraceEvent::Binary {
                operator,
                left,
                right,
                result,
            } => {
                let (mnemonic, symbol) = match operator {
                    BinaryOperator::Add => ("ADD", '+'),
                    BinaryOperator::Subtract => ("SUB", '-'),
                    BinaryOperator::Multiply => ("MUL", '*'),
                    BinaryOperator::Divide => ("DIV", '/'),
                };
                write!(f, "{}: {} {} {} = {}", mnemonic, left, symbol, right, result)
            }
            TraceEvent::Pop { value } => write!(f, "POP {}", value),
        }
    }
}

/// An instrumentation sink for VM execution steps.
pub trait Tracer {
    /// Records one executed instruction.
    fn record(&mut self, event: TraceEvent);
}

/// A tracer that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn record(&mut self, _event: TraceEvent) {}
}

/// A tracer that collects events in memory, for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct CollectingTracer {
    /// The recorded events, in execution order.
    pub events: Vec<TraceEvent>,
}

impl CollectingTracer {
    /// Creates a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tracer for CollectingTracer {
    fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

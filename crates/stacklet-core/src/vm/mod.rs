//! The bytecode virtual machine.
//!
//! This module contains the VM that executes compiled bytecode, along with
//! its supporting pieces.
//!
//! ## Structure
//!
//! - `interpreter` - The execution loop over an operand stack
//! - `environment` - The variable environment (name -> integer)
//! - `trace` - The injectable instrumentation sink

mod environment;
mod interpreter;
mod trace;

pub use environment::Environment;
pub use interpreter::Vm;
pub use trace::{CollectingTracer, NullTracer, TraceEvent, Tracer};

//! Bytecode compiler for stacklet.
//!
//! Transforms AST into bytecode that can be executed by the VM.
//!
//! # Module Structure
//!
//! - `bytecode`: Bytecode definitions and instructions
//! - `codegen`: Code generation from AST

pub mod bytecode;
pub mod codegen;

pub use bytecode::{Instruction, OpCode, Operand};
pub use codegen::Compiler;

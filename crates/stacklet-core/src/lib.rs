// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # stacklet-core
//!
//! Compiler and stack-machine interpreter for stacklet, a minimal
//! imperative expression language: integer variable declaration,
//! assignment, and arithmetic (`+ - * /`) with parentheses and standard
//! precedence.
//!
//! ## Overview
//!
//! The pipeline has four stages, each fully consuming its input before the
//! next begins:
//!
//! - Lexer: source text to classified tokens
//! - Parser: recursive descent over tokens, building an immutable AST
//! - Code generator: post-order AST walk emitting stack-machine bytecode
//! - Virtual machine: executes bytecode against an operand stack and a
//!   variable environment
//!
//! ## Quick Start
//!
//! ```rust
//! use stacklet_core::eval;
//!
//! let env = eval("var x = 42; x = x + 3;").expect("should run");
//! assert_eq!(env.get("x"), Some(45));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod compiler;
pub mod lexer;
pub mod parser;
pub mod vm;

// Re-exports for convenience
pub use compiler::{Instruction, OpCode, Operand};
pub use lexer::{Scanner, Token, TokenKind};
pub use vm::{Environment, Tracer, Vm};

use vm::NullTracer;

/// Errors that can occur while compiling or executing a program.
///
/// All three kinds propagate to the immediate caller of the failing stage;
/// none are retried or swallowed, and no partial result is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No token rule matches the input at the cursor
    Lex {
        /// Byte offset of the offending character
        position: usize,
        /// The character no rule matched
        found: char,
    },
    /// The token stream does not match the grammar
    Parse {
        /// The construct the parser expected
        expected: String,
        /// The offending token, rendered as `KIND('text')`
        found: String,
    },
    /// Fatal error during bytecode execution
    Runtime(RuntimeError),
}

/// Fatal errors raised by the VM.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A variable was read before any assignment bound it
    UnboundVariable(String),
    /// Division with a zero divisor
    DivisionByZero,
    /// An instruction tried to pop an empty operand stack
    StackUnderflow,
    /// An instruction's operand does not match its opcode
    InvalidInstruction,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Lex { position, found } => {
                write!(f, "LexError: unexpected character '{}' at byte {}", found, position)
            }
            Error::Parse { expected, found } => {
                write!(f, "ParseError: expected {}, found {}", expected, found)
            }
            Error::Runtime(err) => write!(f, "RuntimeError: {}", err),
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::UnboundVariable(name) => {
                write!(f, "variable '{}' is not bound", name)
            }
            RuntimeError::DivisionByZero => write!(f, "division by zero"),
            RuntimeError::StackUnderflow => write!(f, "operand stack underflow"),
            RuntimeError::InvalidInstruction => {
                write!(f, "instruction operand does not match its opcode")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        Error::Runtime(err)
    }
}

/// Tokenizes source text into a lazy, `END`-terminated token sequence.
///
/// The returned scanner yields one `Result<Token, Error>` per token, ending
/// with the `END` token. The sequence is restartable only by calling
/// `tokenize` again with the same source.
pub fn tokenize(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}

/// Parses source text into a program AST.
pub fn parse(source: &str) -> Result<ast::Program, Error> {
    parser::Parser::new(source)?.parse_program()
}

/// Translates a program AST into a linear instruction sequence.
pub fn generate(program: &ast::Program) -> Result<Vec<Instruction>, Error> {
    compiler::Compiler::new().compile(program)
}

/// Compiles source text straight to bytecode: [`parse`] then [`generate`].
pub fn compile(source: &str) -> Result<Vec<Instruction>, Error> {
    generate(&parse(source)?)
}

/// Executes an instruction sequence on a fresh VM, reporting each step to
/// `tracer`, and returns the final variable environment.
///
/// Every invocation gets its own operand stack and environment; nothing is
/// shared across calls.
pub fn run(code: &[Instruction], tracer: &mut dyn Tracer) -> Result<Environment, Error> {
    let mut vm = Vm::new();
    vm.execute(code, tracer)?;
    Ok(vm.into_variables())
}

/// Runs the full pipeline on source text with tracing disabled.
pub fn eval(source: &str) -> Result<Environment, Error> {
    run(&compile(source)?, &mut NullTracer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_pipeline() {
        let env = eval("var x = 42; x = x + 3;").unwrap();
        assert_eq!(env.get("x"), Some(45));
    }

    #[test]
    fn test_error_display() {
        let err = Error::Parse {
            expected: "identifier".to_string(),
            found: "OPERATOR('=')".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ParseError: expected identifier, found OPERATOR('=')"
        );

        let err = Error::Runtime(RuntimeError::UnboundVariable("y".to_string()));
        assert_eq!(err.to_string(), "RuntimeError: variable 'y' is not bound");

        let err = Error::Lex {
            position: 4,
            found: '?',
        };
        assert_eq!(
            err.to_string(),
            "LexError: unexpected character '?' at byte 4"
        );
    }

    #[test]
    fn test_run_invocations_do_not_share_state() {
        let code = compile("var x = 1;").unwrap();
        let first = run(&code, &mut NullTracer).unwrap();
        let second = run(&compile("var y = 2;").unwrap(), &mut NullTracer).unwrap();
        assert!(first.contains("x"));
        assert!(!second.contains("x"));
    }
}

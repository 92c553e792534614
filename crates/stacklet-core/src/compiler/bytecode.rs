//! Bytecode definitions.

use std::fmt;

/// A single bytecode instruction.
///
/// The opcode determines how the operand is interpreted; the operand itself
/// is tagged so the VM cannot mistake a constant for a variable name.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The operation code
    pub opcode: OpCode,
    /// Optional operand
    pub operand: Option<Operand>,
}

impl Instruction {
    /// Creates a new instruction with no operand.
    pub fn simple(opcode: OpCode) -> Self {
        Self {
            opcode,
            operand: None,
        }
    }

    /// Creates a new instruction with an operand.
    pub fn with_operand(opcode: OpCode, operand: Operand) -> Self {
        Self {
            opcode,
            operand: Some(operand),
        }
    }
}

impl fmt::Display for Instruction {
    /// Renders as `OPCODE operand`, operand blank for operators, e.g.
    /// `LOAD_CONST 9`, `STORE_VAR x`, `BINARY_+`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Some(operand) => write!(f, "{} {}", self.opcode, operand),
            None => write!(f, "{}", self.opcode),
        }
    }
}

/// Instruction operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// An integer constant
    Int(i64),
    /// A variable name
    Name(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(value) => write!(f, "{}", value),
            Operand::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Operation codes for the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    /// Push an integer constant onto the stack
    LoadConst,
    /// Push the current value of a variable
    LoadVar,
    /// Pop the top value and bind it to a variable
    StoreVar,
    /// Add top two values
    Add,
    /// Subtract
    Sub,
    /// Multiply
    Mul,
    /// Divide (truncating toward zero)
    Div,
    /// Discard the top value
    Pop,
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpCode::LoadConst => "LOAD_CONST",
            OpCode::LoadVar => "LOAD_VAR",
            OpCode::StoreVar => "STORE_VAR",
            OpCode::Add => "BINARY_+",
            OpCode::Sub => "BINARY_-",
            OpCode::Mul => "BINARY_*",
            OpCode::Div => "BINARY_/",
            OpCode::Pop => "POP",
        };
        f.write_str(name)
    }
}

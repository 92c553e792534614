//! The bytecode interpreter.

use crate::ast::BinaryOperator;
use crate::compiler::{Instruction, OpCode, Operand};
use crate::vm::environment::Environment;
use crate::vm::trace::{TraceEvent, Tracer};
use crate::{Error, RuntimeError};

/// A stack machine executing stacklet bytecode.
///
/// Holds an operand stack and a variable environment. The stack is cleared
/// at the start of every [`execute`](Vm::execute); the environment persists
/// across calls on the same `Vm`, which is what a REPL embeds. Callers that
/// want the one-shot semantics of the [`run`](crate::run) convenience get a
/// fresh `Vm` per invocation.
pub struct Vm {
    /// The operand stack
    stack: Vec<i64>,
    /// The variable environment
    variables: Environment,
}

impl Vm {
    /// Creates a new VM with an empty environment.
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(16),
            variables: Environment::new(),
        }
    }

    /// Executes an instruction sequence to completion.
    ///
    /// Each executed instruction is reported to `tracer`. A runtime error
    /// aborts the remaining instructions; environment mutations already made
    /// remain observable.
    pub fn execute(
        &mut self,
        code: &[Instruction],
        tracer: &mut dyn Tracer,
    ) -> Result<(), Error> {
        self.stack.clear();

        for instruction in code {
            match instruction.opcode {
                OpCode::LoadConst => {
                    let Some(Operand::Int(value)) = &instruction.operand else {
                        return Err(Error::Runtime(RuntimeError::InvalidInstruction));
                    };
                    self.stack.push(*value);
                    tracer.record(TraceEvent::Push { value: *value });
                }

                OpCode::LoadVar => {
                    let Some(Operand::Name(name)) = &instruction.operand else {
                        return Err(Error::Runtime(RuntimeError::InvalidInstruction));
                    };
                    let value = self.variables.get(name).ok_or_else(|| {
                        Error::Runtime(RuntimeError::UnboundVariable(name.clone()))
                    })?;
                    self.stack.push(value);
                    tracer.record(TraceEvent::Load {
                        name: name.clone(),
                        value,
                    });
                }

                OpCode::StoreVar => {
                    let Some(Operand::Name(name)) = &instruction.operand else {
                        return Err(Error::Runtime(RuntimeError::InvalidInstruction));
                    };
                    let value = self.pop()?;
                    self.variables.set(name.clone(), value);
                    tracer.record(TraceEvent::Store {
                        name: name.clone(),
                        value,
                    });
                }

                OpCode::Add => self.binary_op(BinaryOperator::Add, tracer)?,
                OpCode::Sub => self.binary_op(BinaryOperator::Subtract, tracer)?,
                OpCode::Mul => self.binary_op(BinaryOperator::Multiply, tracer)?,
                OpCode::Div => self.binary_op(BinaryOperator::Divide, tracer)?,

                OpCode::Pop => {
                    let value = self.pop()?;
                    tracer.record(TraceEvent::Pop { value });
                }
            }
        }

        Ok(())
    }

    /// The variable environment as of the last executed instruction.
    pub fn variables(&self) -> &Environment {
        &self.variables
    }

    /// Consumes the VM, returning the final variable environment.
    pub fn into_variables(self) -> Environment {
        self.variables
    }

    fn pop(&mut self) -> Result<i64, Error> {
        self.stack
            .pop()
            .ok_or(Error::Runtime(RuntimeError::StackUnderflow))
    }

    /// Pops `right` then `left` (push order was left-then-right), computes
    /// `left <op> right`, and pushes the result.
    ///
    /// Values are fixed-width `i64` with wrapping arithmetic. Division
    /// truncates toward zero; a zero divisor is a fatal error and pushes
    /// nothing.
    fn binary_op(
        &mut self,
        operator: BinaryOperator,
        tracer: &mut dyn Tracer,
    ) -> Result<(), Error> {
        let right = self.pop()?;
        let left = self.pop()?;

        let result = match operator {
            BinaryOperator::Add => left.wrapping_add(right),
            BinaryOperator::Subtract => left.wrapping_sub(right),
            BinaryOperator::Multiply => left.wrapping_mul(right),
            BinaryOperator::Divide => {
                if right == 0 {
                    return Err(Error::Runtime(RuntimeError::DivisionByZero));
                }
                left.wrapping_div(right)
            }
        };

        self.stack.push(result);
        tracer.record(TraceEvent::Binary {
            operator,
            left,
            right,
            result,
        });
        Ok(())
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

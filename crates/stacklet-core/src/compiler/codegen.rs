//! Code generation from AST to bytecode.

use crate::Error;
use crate::ast::*;
use crate::compiler::bytecode::{Instruction, OpCode, Operand};

/// Compiles AST to a linear instruction sequence.
///
/// The translation is a post-order walk: operands are emitted before the
/// instruction that consumes them. No reordering, constant folding, or
/// dead-code elimination is performed, so output length is proportional to
/// the size of the tree.
pub struct Compiler {
    code: Vec<Instruction>,
}

impl Compiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self { code: Vec::new() }
    }

    /// Compiles a program AST to bytecode.
    pub fn compile(mut self, program: &Program) -> Result<Vec<Instruction>, Error> {
        for stmt in &program.body {
            self.compile_statement(stmt)?;
        }
        Ok(self.code)
    }

    fn compile_statement(&mut self, stmt: &Statement) -> Result<(), Error> {
        match stmt {
            Statement::VariableDeclaration(decl) => {
                self.compile_expression(&decl.init)?;
                self.emit(Instruction::with_operand(
                    OpCode::StoreVar,
                    Operand::Name(decl.name.name.clone()),
                ));
            }
            Statement::Expression(expr_stmt) => {
                self.compile_expression(&expr_stmt.expression)?;
                // An assignment consumes its own value via StoreVar; any
                // other expression statement leaves one, so discard it to
                // keep the stack balanced across statements.
                if !matches!(expr_stmt.expression, Expression::Assignment(_)) {
                    self.emit(Instruction::simple(OpCode::Pop));
                }
            }
        }
        Ok(())
    }

    fn compile_expression(&mut self, expr: &Expression) -> Result<(), Error> {
        match expr {
            Expression::Number(value) => {
                self.emit(Instruction::with_operand(
                    OpCode::LoadConst,
                    Operand::Int(*value),
                ));
            }
            Expression::Identifier(id) => {
                self.emit(Instruction::with_operand(
                    OpCode::LoadVar,
                    Operand::Name(id.name.clone()),
                ));
            }
            Expression::Binary(bin) => {
                self.compile_expression(&bin.left)?;
                self.compile_expression(&bin.right)?;
                let opcode = match bin.operator {
                    BinaryOperator::Add => OpCode::Add,
                    BinaryOperator::Subtract => OpCode::Sub,
                    BinaryOperator::Multiply => OpCode::Mul,
                    BinaryOperator::Divide => OpCode::Div,
                };
                self.emit(Instruction::simple(opcode));
            }
            Expression::Assignment(assign) => {
                self.compile_expression(&assign.right)?;
                match assign.left.as_ref() {
                    Expression::Identifier(id) => {
                        self.emit(Instruction::with_operand(
                            OpCode::StoreVar,
                            Operand::Name(id.name.clone()),
                        ));
                    }
                    _ => {
                        return Err(Error::Parse {
                            expected: "identifier as assignment target".to_string(),
                            found: "expression".to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn emit(&mut self, instruction: Instruction) {
        self.code.push(instruction);
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn gen_code(src: &str) -> Vec<Instruction> {
        let mut parser = Parser::new(src).unwrap();
        let program = parser.parse_program().unwrap();
        Compiler::new().compile(&program).unwrap()
    }

    fn rendered(src: &str) -> Vec<String> {
        gen_code(src).iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_number_literal() {
        assert_eq!(rendered("var x = 7;"), vec!["LOAD_CONST 7", "STORE_VAR x"]);
    }

    #[test]
    fn test_post_order_binary() {
        // Left operand, right operand, then the operator.
        assert_eq!(
            rendered("var x = 1 + 2;"),
            vec!["LOAD_CONST 1", "LOAD_CONST 2", "BINARY_+", "STORE_VAR x"]
        );
    }

    #[test]
    fn test_precedence_encoded_in_order() {
        assert_eq!(
            rendered("var z = (1+2)*3;"),
            vec![
                "LOAD_CONST 1",
                "LOAD_CONST 2",
                "BINARY_+",
                "LOAD_CONST 3",
                "BINARY_*",
                "STORE_VAR z",
            ]
        );
    }

    #[test]
    fn test_assignment_statement_self_consumes() {
        // No POP after an assignment expression statement.
        assert_eq!(
            rendered("x = x + 3;"),
            vec!["LOAD_VAR x", "LOAD_CONST 3", "BINARY_+", "STORE_VAR x"]
        );
    }

    #[test]
    fn test_bare_expression_statement_discards_value() {
        assert_eq!(
            rendered("x + 1;"),
            vec!["LOAD_VAR x", "LOAD_CONST 1", "BINARY_+", "POP"]
        );
    }

    #[test]
    fn test_statements_concatenated_in_order() {
        assert_eq!(
            rendered("var x = 1; var y = 2;"),
            vec!["LOAD_CONST 1", "STORE_VAR x", "LOAD_CONST 2", "STORE_VAR y"]
        );
    }

    #[test]
    fn test_invalid_assignment_target() {
        let mut parser = Parser::new("(1 + 2) = 3;").unwrap();
        let program = parser.parse_program().unwrap();
        let err = Compiler::new().compile(&program).unwrap_err();
        assert!(matches!(err, Error::Parse { expected, .. } if expected.contains("target")));
    }

    #[test]
    fn test_operand_kinds() {
        let code = gen_code("var x = 1; x;");
        assert_eq!(code[0].operand, Some(Operand::Int(1)));
        assert_eq!(code[1].operand, Some(Operand::Name("x".to_string())));
        assert_eq!(code[3].operand, None);
    }
}

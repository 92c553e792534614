//! The main parser implementation.

use crate::Error;
use crate::ast::*;
use crate::lexer::{Scanner, Token, TokenKind};

/// A recursive descent parser for the stacklet language.
///
/// Each grammar rule corresponds to one parsing method; lower-precedence
/// methods call higher-precedence ones to resolve operator binding.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given source code.
    ///
    /// Fails if the very first token cannot be scanned.
    pub fn new(source: &'a str) -> Result<Self, Error> {
        let mut scanner = Scanner::new(source);
        let current = scanner.next_token()?;
        Ok(Self { scanner, current })
    }

    /// Parses the source code into a Program AST node.
    ///
    /// A well-formed program consumes every token up to and including the
    /// terminating `END` token. Any structural mismatch aborts the whole
    /// parse; no partial AST is returned.
    pub fn parse_program(&mut self) -> Result<Program, Error> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(self.parse_statement()?);
        }

        Ok(Program { body })
    }

    /// Parses a single statement.
    fn parse_statement(&mut self) -> Result<Statement, Error> {
        match &self.current.kind {
            TokenKind::Var => self.parse_variable_declaration(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_variable_declaration(&mut self) -> Result<Statement, Error> {
        self.advance()?; // consume 'var'

        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Equal)?;
        let init = self.parse_expression()?;
        self.expect(&TokenKind::Semicolon)?;

        Ok(Statement::VariableDeclaration(VariableDeclaration {
            name,
            init,
        }))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, Error> {
        let expression = self.parse_expression()?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(Statement::Expression(ExpressionStatement { expression }))
    }

    /// Parses an expression.
    pub fn parse_expression(&mut self) -> Result<Expression, Error> {
        self.parse_assignment()
    }

    /// Assignment is right-associative: after an additive expression, a `=`
    /// recursively parses the full right-hand expression. The left side is
    /// not validated to be an identifier here; `(1+2) = 3` parses and is
    /// rejected by the code generator.
    fn parse_assignment(&mut self) -> Result<Expression, Error> {
        let expr = self.parse_additive()?;

        if self.check(&TokenKind::Equal) {
            self.advance()?;
            let value = self.parse_assignment()?;
            return Ok(Expression::Assignment(AssignmentExpression {
                left: Box::new(expr),
                right: Box::new(value),
            }));
        }

        Ok(expr)
    }

    fn parse_additive(&mut self) -> Result<Expression, Error> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let operator = match &self.current.kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = Expression::Binary(BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression, Error> {
        let mut left = self.parse_primary()?;

        loop {
            let operator = match &self.current.kind {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_primary()?;
            left = Expression::Binary(BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expression, Error> {
        match &self.current.kind {
            TokenKind::Number(n) => {
                let value = *n;
                self.advance()?;
                Ok(Expression::Number(value))
            }
            TokenKind::Identifier(name) => {
                let id = Identifier { name: name.clone() };
                self.advance()?;
                Ok(Expression::Identifier(id))
            }
            TokenKind::LeftParen => {
                self.advance()?;
                let expression = self.parse_expression()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(expression)
            }
            _ => Err(Error::Parse {
                expected: "expression".to_string(),
                found: self.current.kind.to_string(),
            }),
        }
    }

    // Helper methods

    fn advance(&mut self) -> Result<(), Error> {
        self.current = self.scanner.next_token()?;
        Ok(())
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), Error> {
        if self.check(kind) {
            self.advance()?;
            Ok(())
        } else {
            Err(Error::Parse {
                expected: format!("'{}'", kind.text()),
                found: self.current.kind.to_string(),
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<Identifier, Error> {
        if let TokenKind::Identifier(name) = &self.current.kind {
            let id = Identifier { name: name.clone() };
            self.advance()?;
            Ok(id)
        } else {
            Err(Error::Parse {
                expected: "identifier".to_string(),
                found: self.current.kind.to_string(),
            })
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to parse and get first statement
    fn parse_stmt(src: &str) -> Statement {
        let mut parser = Parser::new(src).unwrap();
        let program = parser.parse_program().unwrap();
        program.body.into_iter().next().unwrap()
    }

    // Helper to parse and check it succeeds
    fn parse_ok(src: &str) -> Program {
        let mut parser = Parser::new(src).unwrap();
        parser.parse_program().unwrap()
    }

    fn parse_err(src: &str) -> Error {
        let mut parser = Parser::new(src).unwrap();
        parser.parse_program().unwrap_err()
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse_ok("");
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_parse_variable_declaration() {
        let stmt = parse_stmt("var x = 42;");
        match stmt {
            Statement::VariableDeclaration(decl) => {
                assert_eq!(decl.name.name, "x");
                assert_eq!(decl.init, Expression::Number(42));
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_expression_statement() {
        parse_ok("42;");
        parse_ok("x + y;");
        parse_ok("x = 5;");
    }

    #[test]
    fn test_parse_multiple_statements() {
        let program = parse_ok("var x = 1; var y = 2; x = x + y;");
        assert_eq!(program.body.len(), 3);
    }

    #[test]
    fn test_precedence_multiplication_binds_tighter() {
        // 2 + 3 * 4 parses as 2 + (3 * 4)
        let stmt = parse_stmt("2 + 3 * 4;");
        let Statement::Expression(expr_stmt) = stmt else {
            panic!("expected expression statement");
        };
        let Expression::Binary(add) = expr_stmt.expression else {
            panic!("expected binary expression");
        };
        assert_eq!(add.operator, BinaryOperator::Add);
        assert_eq!(*add.left, Expression::Number(2));
        assert!(matches!(
            *add.right,
            Expression::Binary(BinaryExpression {
                operator: BinaryOperator::Multiply,
                ..
            })
        ));
    }

    #[test]
    fn test_additive_left_associative() {
        // 10 - 3 - 2 parses as (10 - 3) - 2
        let stmt = parse_stmt("10 - 3 - 2;");
        let Statement::Expression(expr_stmt) = stmt else {
            panic!("expected expression statement");
        };
        let Expression::Binary(outer) = expr_stmt.expression else {
            panic!("expected binary expression");
        };
        assert_eq!(outer.operator, BinaryOperator::Subtract);
        assert_eq!(*outer.right, Expression::Number(2));
        assert!(matches!(
            *outer.left,
            Expression::Binary(BinaryExpression {
                operator: BinaryOperator::Subtract,
                ..
            })
        ));
    }

    #[test]
    fn test_assignment_right_associative() {
        // x = y = 3 parses as x = (y = 3)
        let stmt = parse_stmt("x = y = 3;");
        let Statement::Expression(expr_stmt) = stmt else {
            panic!("expected expression statement");
        };
        let Expression::Assignment(outer) = expr_stmt.expression else {
            panic!("expected assignment");
        };
        assert!(matches!(*outer.right, Expression::Assignment(_)));
    }

    #[test]
    fn test_parenthesized_grouping() {
        let stmt = parse_stmt("(1 + 2) * 3;");
        let Statement::Expression(expr_stmt) = stmt else {
            panic!("expected expression statement");
        };
        let Expression::Binary(mul) = expr_stmt.expression else {
            panic!("expected binary expression");
        };
        assert_eq!(mul.operator, BinaryOperator::Multiply);
        assert!(matches!(*mul.left, Expression::Binary(_)));
    }

    #[test]
    fn test_assignment_target_not_validated_here() {
        // Accepted by the grammar; the code generator rejects it.
        parse_ok("(1 + 2) = 3;");
    }

    #[test]
    fn test_missing_identifier_after_var() {
        match parse_err("var = 5;") {
            Error::Parse { expected, found } => {
                assert_eq!(expected, "identifier");
                assert_eq!(found, "OPERATOR('=')");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon() {
        assert!(matches!(parse_err("var x = 1"), Error::Parse { .. }));
    }

    #[test]
    fn test_missing_close_paren() {
        assert!(matches!(parse_err("(1 + 2;"), Error::Parse { .. }));
    }

    #[test]
    fn test_unexpected_token_for_primary() {
        match parse_err("1 + ;") {
            Error::Parse { expected, found } => {
                assert_eq!(expected, "expression");
                assert_eq!(found, "PUNCTUATION(';')");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_lex_error_propagates() {
        let mut parser = Parser::new("var x = 4 ? 2;").unwrap();
        assert!(matches!(
            parser.parse_program(),
            Err(Error::Lex { found: '?', .. })
        ));
    }
}

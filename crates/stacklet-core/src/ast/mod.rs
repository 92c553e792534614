//! Abstract Syntax Tree (AST) definitions for the stacklet language.
//!
//! The tree is built once by the parser, read by the code generator, and
//! then discarded. Every node is an immutable value; the node set is closed
//! and dispatched over with exhaustive `match`.

/// A complete stacklet program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The statements in the program
    pub body: Vec<Statement>,
}

/// An identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The name of the identifier
    pub name: String,
}

/// A stacklet statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration (var)
    VariableDeclaration(VariableDeclaration),
    /// Expression statement
    Expression(ExpressionStatement),
}

/// A variable declaration statement: `var name = init;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// The identifier being declared
    pub name: Identifier,
    /// The initializer expression
    pub init: Expression,
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The expression
    pub expression: Expression,
}

/// A stacklet expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal
    Number(i64),
    /// Identifier reference
    Identifier(Identifier),
    /// Binary expression
    Binary(BinaryExpression),
    /// Assignment expression
    Assignment(AssignmentExpression),
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// The operator
    pub operator: BinaryOperator,
    /// The left operand
    pub left: Box<Expression>,
    /// The right operand
    pub right: Box<Expression>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// +
    Add,
    /// -
    Subtract,
    /// *
    Multiply,
    /// /
    Divide,
}

/// An assignment expression.
///
/// `left` must resolve to an [`Identifier`]. The parser does not enforce
/// this structurally; the code generator rejects any other target.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    /// The left-hand side
    pub left: Box<Expression>,
    /// The right-hand side
    pub right: Box<Expression>,
}

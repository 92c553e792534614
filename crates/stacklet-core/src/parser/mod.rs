//! Parser for stacklet source code.
//!
//! Transforms a stream of tokens into an Abstract Syntax Tree (AST).
//!
//! ## Grammar (lowest to highest precedence)
//!
//! ```text
//! Program        := Statement*
//! Statement      := VarDecl | ExprStmt
//! VarDecl        := 'var' IDENTIFIER '=' Expression ';'
//! ExprStmt       := Expression ';'
//! Expression     := Assignment
//! Assignment     := Additive ('=' Expression)?                 // right-assoc
//! Additive       := Multiplicative (('+'|'-') Multiplicative)* // left-assoc
//! Multiplicative := Primary (('*'|'/') Primary)*               // left-assoc
//! Primary        := NUMBER | IDENTIFIER | '(' Expression ')'
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use stacklet_core::parser::Parser;
//!
//! let mut parser = Parser::new("var x = 1 + 2;").expect("should scan");
//! let program = parser.parse_program().expect("should parse");
//! ```

mod parser;

pub use parser::Parser;

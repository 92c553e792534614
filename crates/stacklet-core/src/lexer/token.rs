//! Token definitions for the stacklet lexer.

use std::fmt;

/// A span in the source code, representing a range of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// The different kinds of tokens in the stacklet language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Integer literal
    Number(i64),
    /// Identifier
    Identifier(String),

    // Keywords
    /// var
    Var,

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// =
    Equal,

    // Punctuation
    /// ;
    Semicolon,
    /// (
    LeftParen,
    /// )
    RightParen,

    // Special
    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns true if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Var)
    }

    /// The coarse lexical category of this token: `NUMBER`, `IDENTIFIER`,
    /// `KEYWORD`, `OPERATOR`, `PUNCTUATION`, or `END`.
    pub fn category(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "NUMBER",
            TokenKind::Identifier(_) => "IDENTIFIER",
            TokenKind::Var => "KEYWORD",
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Equal => "OPERATOR",
            TokenKind::Semicolon | TokenKind::LeftParen | TokenKind::RightParen => "PUNCTUATION",
            TokenKind::Eof => "END",
        }
    }

    /// The source text this token stands for.
    pub fn text(&self) -> String {
        match self {
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Var => "var".to_string(),
            TokenKind::Plus => "+".to_string(),
            TokenKind::Minus => "-".to_string(),
            TokenKind::Star => "*".to_string(),
            TokenKind::Slash => "/".to_string(),
            TokenKind::Equal => "=".to_string(),
            TokenKind::Semicolon => ";".to_string(),
            TokenKind::LeftParen => "(".to_string(),
            TokenKind::RightParen => ")".to_string(),
            TokenKind::Eof => String::new(),
        }
    }
}

impl fmt::Display for TokenKind {
    /// Renders as `KIND('text')`, e.g. `NUMBER('42')` or `OPERATOR('=')`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.category(), self.text())
    }
}

//! The scanner that produces tokens from source text.

use super::{Span, Token, TokenKind};
use crate::Error;

/// A scanner that tokenizes stacklet source code.
///
/// Holds an explicit cursor into the source buffer; each call to
/// [`next_token`](Scanner::next_token) scans exactly one token. Scanning is
/// restartable only by constructing a new scanner over the same source.
pub struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    finished: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().peekable(),
            current_pos: 0,
            finished: false,
        }
    }

    /// Returns the next token from the source.
    ///
    /// A character no rule matches is reported as [`Error::Lex`] carrying
    /// its byte position, rather than being silently treated as end of
    /// input.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_whitespace();

        let start = self.current_pos;

        let Some((_pos, ch)) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, Span::new(start, start)));
        };

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Equal,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,

            '0'..='9' => self.scan_number(ch),

            _ if is_id_start(ch) => self.scan_identifier(ch),

            _ => {
                return Err(Error::Lex {
                    position: start,
                    found: ch,
                });
            }
        };

        Ok(Token::new(kind, Span::new(start, self.current_pos)))
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.current_pos = pos + ch.len_utf8();
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.advance();
        }
    }

    fn scan_number(&mut self, first: char) -> TokenKind {
        let mut value = i64::from(first as u8 - b'0');

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                value = value
                    .wrapping_mul(10)
                    .wrapping_add(i64::from(ch as u8 - b'0'));
                self.advance();
            } else {
                break;
            }
        }

        TokenKind::Number(value)
    }

    fn scan_identifier(&mut self, first: char) -> TokenKind {
        let mut name = String::from(first);

        while let Some(ch) = self.peek() {
            if is_id_continue(ch) {
                name.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Identifier-shaped lexemes are scanned first, then the keyword
        // table decides their final classification.
        match name.as_str() {
            "var" => TokenKind::Var,
            _ => TokenKind::Identifier(name),
        }
    }
}

/// Checks if a character can start an identifier.
fn is_id_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Checks if a character can continue an identifier.
fn is_id_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token, Error>;

    /// Yields every token of the source, including the terminating `END`
    /// token, then `None`. A lex error ends the stream.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.kind == TokenKind::Eof => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

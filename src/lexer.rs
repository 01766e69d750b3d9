use std::fmt;

use crate::token::{Span, Token, TokenKind};
use crate::{Error, ResourceError};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
    /// Digit run that did not parse as a float.
    InvalidNumber(String),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch}")
            }
            Self::InvalidNumber(text) => {
                write!(f, "invalid number literal: {text}")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at position {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
}

/// Tokenize a single expression line.
///
/// Scanning stops at the first `\n` or `\0`; anything after it is
/// ignored. Spaces separate tokens, every other unrecognised character
/// (tabs included) is an error.
///
/// # Errors
///
/// Returns `Error::Lex` on an unexpected character and
/// `Error::Resource` if the token sequence cannot grow.
pub fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(input).tokenize()
}

struct Lexer<'a> {
    source: &'a str,
    input: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    const fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        while let Some(ch) = self.peek() {
            if ch == b'\n' || ch == b'\0' {
                break;
            }

            let start = self.pos;
            match ch {
                b' ' => self.pos += 1,
                b'+' => self.single(TokenKind::Add)?,
                b'*' => self.single(TokenKind::Multiply)?,
                b'/' => self.single(TokenKind::Divide)?,
                b'(' => self.single(TokenKind::LeftParen)?,
                b')' => self.single(TokenKind::RightParen)?,
                b'-' => {
                    let kind = if self.follows_operand() {
                        TokenKind::Subtract
                    } else {
                        TokenKind::UnaryMinus
                    };
                    self.single(kind)?;
                }
                b'0'..=b'9' => self.read_number()?,
                _ => return Err(self.unexpected(start)),
            }
        }

        Ok(self.tokens)
    }

    fn unexpected(&self, offset: usize) -> Error {
        // everything before `offset` is ASCII, so the byte offset is
        // also the character offset
        let ch = self.source[offset..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        LexError {
            kind: LexErrorKind::UnexpectedCharacter(ch),
            offset,
        }
        .into()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// A `-` is binary only when it follows a number or `)`.
    fn follows_operand(&self) -> bool {
        self.tokens.last().is_some_and(|last| {
            matches!(last.kind, TokenKind::Number(_) | TokenKind::RightParen)
        })
    }

    fn push(&mut self, token: Token) -> Result<(), Error> {
        self.tokens
            .try_reserve(1)
            .map_err(|source| ResourceError::new("token sequence", source))?;
        self.tokens.push(token);
        Ok(())
    }

    fn single(&mut self, kind: TokenKind) -> Result<(), Error> {
        let span = Span::at(self.pos);
        self.pos += 1;
        self.push(Token { kind, span })
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn read_number(&mut self) -> Result<(), Error> {
        let start = self.pos;
        self.skip_digits();

        // a dot is only part of the literal when a digit follows it
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            self.skip_digits();
        }

        let text = &self.source[start..self.pos];
        let value = text.parse::<f64>().map_err(|_| LexError {
            kind: LexErrorKind::InvalidNumber(text.to_string()),
            offset: start,
        })?;

        self.push(Token {
            kind: TokenKind::Number(value),
            span: Span {
                start_at: start,
                end_at: self.pos - 1,
            },
        })
    }
}

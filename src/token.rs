use std::fmt;

/// Source location of a token, as inclusive byte offsets into the line.
///
/// Single-character tokens have `start_at == end_at`; a number spans its
/// whole literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start_at: usize,
    pub end_at: usize,
}

impl Span {
    /// Span of a single character at `offset`.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            start_at: offset,
            end_at: offset,
        }
    }

    /// The exact source text this span was scanned from.
    ///
    /// Returns `None` if the span does not fit `source`.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start_at..=self.end_at)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// Negation (`-` with no left operand).
    UnaryMinus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `+`
    Add,
    /// Binary `-`.
    Subtract,
    /// Numeric literal.
    Number(f64),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

impl TokenKind {
    /// Binding strength of an operator. Structural tokens rank 0 and are
    /// never compared as operators.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::UnaryMinus => 4,
            Self::Multiply | Self::Divide => 3,
            Self::Add | Self::Subtract => 2,
            Self::Number(_) | Self::LeftParen | Self::RightParen => 0,
        }
    }

    #[must_use]
    pub const fn is_operator(self) -> bool {
        self.precedence() > 0
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnaryMinus => "UnaryMinus",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Number(_) => "Number",
            Self::LeftParen => "LeftParen",
            Self::RightParen => "RightParen",
        };
        f.pad(name)
    }
}

/// A single token with its kind and source location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_table() {
        assert_eq!(TokenKind::UnaryMinus.precedence(), 4);
        assert_eq!(TokenKind::Multiply.precedence(), 3);
        assert_eq!(TokenKind::Divide.precedence(), 3);
        assert_eq!(TokenKind::Add.precedence(), 2);
        assert_eq!(TokenKind::Subtract.precedence(), 2);
        assert_eq!(TokenKind::Number(1.0).precedence(), 0);
        assert_eq!(TokenKind::LeftParen.precedence(), 0);
        assert_eq!(TokenKind::RightParen.precedence(), 0);
    }

    #[test]
    fn structural_tokens_are_not_operators() {
        assert!(TokenKind::Subtract.is_operator());
        assert!(!TokenKind::Number(0.0).is_operator());
        assert!(!TokenKind::LeftParen.is_operator());
        assert!(!TokenKind::RightParen.is_operator());
    }

    #[test]
    fn span_slice() {
        let span = Span {
            start_at: 4,
            end_at: 7,
        };
        assert_eq!(span.slice("1 + 12.5 * 2"), Some("12.5"));
        assert_eq!(Span::at(2).slice("1 + 2"), Some("+"));
        assert_eq!(Span::at(9).slice("1 + 2"), None);
    }
}

use std::fmt;

use crate::token::{Span, Token, TokenKind};
use crate::{Error, ResourceError};

/// Classifies an evaluation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// `)` with no open `(` before it.
    MismatchedRightParen,
    /// `(` that is never closed.
    MismatchedLeftParen,
    /// The value stack did not end with exactly one value.
    CannotReduce,
    /// An operator ran out of operands.
    MissingOperand,
    /// A structural token reached reduction.
    NotAnOperator,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedRightParen => write!(f, "mismatched right paren"),
            Self::MismatchedLeftParen => write!(f, "mismatched left paren"),
            Self::CannotReduce => write!(f, "cannot reduce to a single value"),
            Self::MissingOperand => write!(f, "missing operand"),
            Self::NotAnOperator => {
                write!(f, "invalid token when an operator was expected")
            }
        }
    }
}

/// Error produced during evaluation.
///
/// `span` is the offending token's location when there is one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}{}", location(*span))]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

fn location(span: Option<Span>) -> String {
    match span {
        Some(span) if span.start_at == span.end_at => format!(" at position {}", span.start_at),
        Some(span) => format!(" at position {}..{}", span.start_at, span.end_at),
        None => String::new(),
    }
}

impl EvalError {
    const fn at(kind: EvalErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
        }
    }
}

/// Evaluate a token sequence with the shunting-yard algorithm.
///
/// Both stacks live for this call only and grow on demand, so nesting
/// depth is bounded by available memory. Division by zero is not an
/// error: it yields an infinity or NaN.
///
/// # Errors
///
/// Returns `Error::Eval` on mismatched parentheses or a sequence that
/// does not reduce to one value, and `Error::Resource` if a stack
/// cannot grow.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn evaluate(tokens: &[Token]) -> Result<f64, Error> {
    let mut evaluator = Evaluator::new();
    for token in tokens {
        evaluator.feed(*token)?;
    }
    evaluator.finish()
}

struct Evaluator {
    operators: Vec<Token>,
    values: Vec<f64>,
}

impl Evaluator {
    const fn new() -> Self {
        Self {
            operators: Vec::new(),
            values: Vec::new(),
        }
    }

    fn feed(&mut self, token: Token) -> Result<(), Error> {
        match token.kind {
            TokenKind::Number(value) => self.push_value(value),
            TokenKind::LeftParen => self.push_operator(token),
            TokenKind::RightParen => self.close_paren(token),
            kind => {
                let precedence = kind.precedence();
                while let Some(top) = self.operators.last() {
                    if top.kind == TokenKind::LeftParen || top.kind.precedence() < precedence {
                        break;
                    }
                    self.reduce_top()?;
                }
                self.push_operator(token)
            }
        }
    }

    fn close_paren(&mut self, paren: Token) -> Result<(), Error> {
        loop {
            match self.operators.last() {
                None => {
                    return Err(
                        EvalError::at(EvalErrorKind::MismatchedRightParen, paren.span).into(),
                    );
                }
                Some(top) if top.kind == TokenKind::LeftParen => {
                    self.operators.pop();
                    return Ok(());
                }
                Some(_) => self.reduce_top()?,
            }
        }
    }

    /// Drain the operator stack and take the single remaining value.
    fn finish(&mut self) -> Result<f64, Error> {
        while let Some(operator) = self.operators.pop() {
            if operator.kind == TokenKind::LeftParen {
                return Err(EvalError::at(EvalErrorKind::MismatchedLeftParen, operator.span).into());
            }
            self.reduce(operator)?;
        }

        match self.values.as_slice() {
            [value] => {
                let value = *value;
                self.values.clear();
                Ok(value)
            }
            _ => Err(EvalError {
                kind: EvalErrorKind::CannotReduce,
                span: None,
            }
            .into()),
        }
    }

    fn reduce_top(&mut self) -> Result<(), Error> {
        if let Some(operator) = self.operators.pop() {
            self.reduce(operator)?;
        }
        Ok(())
    }

    fn reduce(&mut self, operator: Token) -> Result<(), Error> {
        if !operator.kind.is_operator() {
            return Err(EvalError::at(EvalErrorKind::NotAnOperator, operator.span).into());
        }

        let operand = self.pop_operand(operator)?;
        let result = if operator.kind == TokenKind::UnaryMinus {
            -operand
        } else {
            let left = self.pop_operand(operator)?;
            match operator.kind {
                TokenKind::Multiply => left * operand,
                TokenKind::Divide => left / operand,
                TokenKind::Add => left + operand,
                _ => left - operand,
            }
        };

        tracing::trace!(operator = %operator.kind, result, "reduced");
        self.push_value(result)
    }

    fn pop_operand(&mut self, operator: Token) -> Result<f64, Error> {
        self.values
            .pop()
            .ok_or_else(|| EvalError::at(EvalErrorKind::MissingOperand, operator.span).into())
    }

    fn push_value(&mut self, value: f64) -> Result<(), Error> {
        self.values
            .try_reserve(1)
            .map_err(|source| ResourceError::new("value stack", source))?;
        self.values.push(value);
        Ok(())
    }

    fn push_operator(&mut self, token: Token) -> Result<(), Error> {
        self.operators
            .try_reserve(1)
            .map_err(|source| ResourceError::new("operator stack", source))?;
        self.operators.push(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn eval(input: &str) -> f64 {
        let tokens = tokenize(input).expect("should tokenize");
        evaluate(&tokens).expect("should evaluate")
    }

    fn eval_err(input: &str) -> EvalError {
        let tokens = tokenize(input).expect("should tokenize");
        match evaluate(&tokens) {
            Err(Error::Eval(err)) => err,
            other => panic!("expected evaluation error, got {other:?}"),
        }
    }

    #[test]
    fn precedence() {
        assert!((eval("2 + 3 * 4") - 14.0).abs() < f64::EPSILON);
        assert!((eval("(2 + 3) * 4") - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn left_associative() {
        assert!((eval("8 - 3 - 2") - 3.0).abs() < f64::EPSILON);
        assert!((eval("16 / 4 / 2") - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unary_minus_binds_tightest() {
        assert!((eval("-2 * 3") + 6.0).abs() < f64::EPSILON);
        assert!((eval("-(-4)") - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stacked_unary_minus_needs_parens() {
        // equal precedence pops first, so the outer minus has no operand
        let err = eval_err("--4");
        assert_eq!(err.kind, EvalErrorKind::MissingOperand);
        assert_eq!(err.span, Some(Span::at(0)));
    }

    #[test]
    fn stacks_are_drained() {
        let tokens = tokenize("((1 + 2) * -(3 - 4)) / 2").expect("should tokenize");
        let mut evaluator = Evaluator::new();
        for token in &tokens {
            evaluator.feed(*token).expect("should feed");
        }
        let value = evaluator.finish().expect("should finish");
        assert!((value - 1.5).abs() < f64::EPSILON);
        assert!(evaluator.operators.is_empty());
        assert!(evaluator.values.is_empty());
    }

    #[test]
    fn mismatched_right_paren_span() {
        let err = eval_err("(1 + 2))");
        assert_eq!(err.kind, EvalErrorKind::MismatchedRightParen);
        assert_eq!(err.span, Some(Span::at(7)));
    }

    #[test]
    fn mismatched_left_paren_span() {
        let err = eval_err("((1 + 2)");
        assert_eq!(err.kind, EvalErrorKind::MismatchedLeftParen);
        assert_eq!(err.span, Some(Span::at(0)));
    }

    #[test]
    fn adjacent_numbers_do_not_reduce() {
        assert_eq!(eval_err("2 3").kind, EvalErrorKind::CannotReduce);
    }

    #[test]
    fn dangling_operator() {
        let err = eval_err("1 +");
        assert_eq!(err.kind, EvalErrorKind::MissingOperand);
        assert_eq!(err.span, Some(Span::at(2)));
    }

    #[test]
    fn structural_token_cannot_be_reduced() {
        let mut evaluator = Evaluator::new();
        evaluator.push_value(1.0).expect("should push");
        let number = Token {
            kind: TokenKind::Number(2.0),
            span: Span::at(3),
        };
        let err = evaluator.reduce(number).unwrap_err();
        assert!(matches!(
            err,
            Error::Eval(EvalError {
                kind: EvalErrorKind::NotAnOperator,
                span: Some(_),
            })
        ));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            eval_err("(1 + 2))").to_string(),
            "mismatched right paren at position 7"
        );
        assert_eq!(eval_err("").to_string(), "cannot reduce to a single value");
    }
}

//! Single-line arithmetic expression evaluator.
//!
//! Source text is split into typed tokens by the lexer, then folded
//! into one `f64` by a shunting-yard evaluator that keeps an operator
//! stack and a value stack. Supported syntax: decimal numbers, `+ - * /`,
//! unary minus and parentheses.
//!
//! # Quick start
//!
//! ```
//! use shunting_yard::{evaluate, tokenize};
//!
//! let tokens = tokenize("(2 + 3) * 4").unwrap();
//! let value = evaluate(&tokens).unwrap();
//! assert_eq!(value, 20.0);
//! ```
//!
//! ## One step
//!
//! ```
//! use shunting_yard::{Error, evaluate_str};
//!
//! assert_eq!(evaluate_str("8 - 3 - 2").unwrap(), 3.0);
//! assert!(matches!(evaluate_str("2 & 3"), Err(Error::Lex(_))));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

pub mod driver;
pub mod evaluator;
pub mod lexer;
pub mod token;

pub use driver::{Config, format_result, read_source, run, write_token_listing};
pub use evaluator::{EvalError, EvalErrorKind, evaluate};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use token::{Span, Token, TokenKind};

/// Allocation failure while growing the token sequence or a stack.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not enough memory for the {what}")]
pub struct ResourceError {
    pub what: &'static str,
    #[source]
    pub source: TryReserveError,
}

impl ResourceError {
    #[must_use]
    pub const fn new(what: &'static str, source: TryReserveError) -> Self {
        Self { what, source }
    }
}

/// Unified error type covering every failure class of the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// An evaluation error.
    #[error("{0}")]
    Eval(#[from] EvalError),
    /// An allocation failure.
    #[error("{0}")]
    Resource(#[from] ResourceError),
    /// The source file could not be opened or fully read.
    #[error("could not read file \"{}\": {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing the result or the token listing failed.
    #[error("could not write output: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    /// Process exit status for this failure class.
    ///
    /// `driver::EXIT_USAGE` is reserved for invalid invocations, which
    /// never reach the pipeline.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::File { .. } | Self::Output(_) => driver::EXIT_FILE,
            Self::Resource(_) => driver::EXIT_RESOURCE,
            Self::Lex(_) => driver::EXIT_LEX,
            Self::Eval(_) => driver::EXIT_EVAL,
        }
    }
}

/// Tokenize and evaluate an expression in one step.
pub fn evaluate_str(input: &str) -> Result<f64, Error> {
    let tokens = tokenize(input)?;
    evaluate(&tokens)
}

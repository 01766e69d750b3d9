//! Glue between the pipeline and the outside world: reading the source
//! file, the diagnostic token listing, and rendering the result.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::token::{Token, TokenKind};
use crate::{Error, ResourceError, evaluate, tokenize};

/// Invalid invocation (bad arguments).
pub const EXIT_USAGE: u8 = 1;
/// The source file could not be opened or read.
pub const EXIT_FILE: u8 = 2;
/// Allocation failure.
pub const EXIT_RESOURCE: u8 = 3;
/// Lexical error.
pub const EXIT_LEX: u8 = 4;
/// Evaluation error.
pub const EXIT_EVAL: u8 = 5;

/// Settings chosen once at startup and passed down explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Echo the raw input and list every token before evaluating.
    pub debug: bool,
}

/// Read a whole source file into memory.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
/// failing the read: past the first line they are never scanned, and on
/// it they are reported by the lexer at their own offset.
pub fn read_source(path: &Path) -> Result<String, Error> {
    let file_error = |source| Error::File {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(file_error)?;
    let len = file.metadata().map_err(file_error)?.len();

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(usize::try_from(len).unwrap_or(usize::MAX))
        .map_err(|e| ResourceError::new("source buffer", e))?;
    file.read_to_end(&mut bytes).map_err(file_error)?;

    let source = String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());

    tracing::debug!(path = %path.display(), bytes = source.len(), "read source");
    Ok(source)
}

/// Render a result with exactly two digits after the decimal point.
#[must_use]
pub fn format_result(value: f64) -> String {
    format!("{value:.2}")
}

/// Write one line per token: its index, kind, span and, for numbers,
/// the literal value.
pub fn write_token_listing<W: Write>(out: &mut W, tokens: &[Token]) -> Result<(), Error> {
    for (i, token) in tokens.iter().enumerate() {
        write!(
            out,
            "[{i}] type = {}, start at = {}, end at = {}",
            token.kind, token.span.start_at, token.span.end_at
        )
        .map_err(Error::Output)?;
        if let TokenKind::Number(value) = token.kind {
            write!(out, ", literal = {}", format_result(value)).map_err(Error::Output)?;
        }
        writeln!(out).map_err(Error::Output)?;
    }
    Ok(())
}

/// Evaluate one expression line and write `Result: <value>` to `out`.
///
/// With `config.debug` set, the raw input and the token listing are
/// written first.
pub fn run<W: Write>(source: &str, config: Config, out: &mut W) -> Result<f64, Error> {
    if config.debug {
        write!(out, "File content: {source}").map_err(Error::Output)?;
        if !source.ends_with('\n') {
            writeln!(out).map_err(Error::Output)?;
        }
    }

    let tokens = tokenize(source)?;
    tracing::debug!(count = tokens.len(), "tokenized");

    if config.debug {
        writeln!(out, "Tokens:").map_err(Error::Output)?;
        write_token_listing(out, &tokens)?;
    }

    let value = evaluate(&tokens)?;
    writeln!(out, "Result: {}", format_result(value)).map_err(Error::Output)?;
    Ok(value)
}

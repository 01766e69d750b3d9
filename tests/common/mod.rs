#![allow(dead_code)]

use shunting_yard::{Error, EvalError, LexError, evaluate, tokenize};

/// Evaluate `input` and render it the way the CLI does.
pub fn eval_formatted(input: &str) -> String {
    let tokens = tokenize(input).expect("tokenize failed");
    let value = evaluate(&tokens).unwrap_or_else(|e| panic!("evaluate {input:?} failed: {e}"));
    shunting_yard::format_result(value)
}

pub fn lex_error(input: &str) -> LexError {
    match tokenize(input) {
        Err(Error::Lex(e)) => e,
        other => panic!("expected lex error for {input:?}, got {other:?}"),
    }
}

pub fn eval_error(input: &str) -> EvalError {
    let tokens = tokenize(input).expect("tokenize failed");
    match evaluate(&tokens) {
        Err(Error::Eval(e)) => e,
        other => panic!("expected evaluation error for {input:?}, got {other:?}"),
    }
}

//! Tokenize an expression, show the tokens, then evaluate it.

use shunting_yard::{evaluate, format_result, tokenize};

fn main() {
    let input = "-(2 + 3) * 4.5 - 8 / 2";
    let tokens = tokenize(input).expect("valid expression");

    for token in &tokens {
        let text = token.span.slice(input).unwrap_or("?");
        println!("{:<10} {text}", token.kind);
    }

    let value = evaluate(&tokens).expect("evaluates");
    println!("{input} = {}", format_result(value));
}

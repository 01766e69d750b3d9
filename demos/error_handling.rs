//! Demonstrate error handling for invalid expressions.

use shunting_yard::{Error, evaluate_str};

fn main() {
    for input in ["2 & 3", "(1 + 2))", "((1 + 2)", "   ", "1 / 0"] {
        match evaluate_str(input) {
            Ok(value) => println!("{input:?} = {}", shunting_yard::format_result(value)),
            Err(Error::Lex(e)) => {
                println!("{input:?}: lex error: {e}");
                println!("  Kind: {:?}", e.kind);
                println!("  Offset: {}", e.offset);
            }
            Err(Error::Eval(e)) => {
                println!("{input:?}: evaluation error: {e}");
                println!("  Kind: {:?}", e.kind);
                if let Some(span) = e.span {
                    println!("  Span: {}..={}", span.start_at, span.end_at);
                }
            }
            Err(e) => println!("{input:?}: {e}"),
        }
    }
}

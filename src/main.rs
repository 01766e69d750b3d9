//! CLI tool that evaluates the arithmetic expression stored in a file.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::builder::FalseyValueParser;
use clap::error::ErrorKind;
use shunting_yard::Error;
use shunting_yard::driver::{self, Config};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Evaluate a single-line arithmetic expression (`+ - * /`, unary minus,
/// parentheses) read from a file.
#[derive(Parser, Debug)]
#[command(name = "shy", version, about, long_about = None)]
struct Args {
    /// Echo the file content and list every token before evaluating.
    #[arg(short, long, env = "DEBUG", value_parser = FalseyValueParser::new())]
    debug: bool,

    /// File holding the expression.
    path: PathBuf,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr, silent unless RUST_LOG is set
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(driver::EXIT_USAGE),
            };
        }
    };

    let config = Config { debug: args.debug };
    if config.debug {
        println!("[Debug enabled]");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = driver::read_source(&args.path)
        .and_then(|source| driver::run(&source, config, &mut out))
        .and_then(|value| out.flush().map(|()| value).map_err(Error::Output));

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "evaluation failed");
            eprintln!("{}: {e}", args.path.display());
            ExitCode::from(e.exit_code())
        }
    }
}

use crate::runner::{self, Options};
use std::io::{self, BufRead, Write};
use tracing::debug;

const PROMPT: &str = "calc> ";

/// What a session did with its input lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Lines handed to the evaluator.
    pub evaluated: usize,
    /// Evaluated lines that failed.
    pub failed: usize,
}

/// Interactive loop over stdin.
pub fn start(options: &Options) {
    println!("treecalc v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let stdin = io::stdin();
    let stats = run_session(stdin.lock(), options);
    debug!(evaluated = stats.evaluated, failed = stats.failed, "repl session ended");
}

/// Reads one expression per line until EOF or `exit`/`quit`. Empty lines are
/// skipped and a failing line does not end the session. Nothing carries over
/// from one line to the next.
pub fn run_session(mut input: impl BufRead, options: &Options) -> SessionStats {
    let mut stats = SessionStats::default();

    loop {
        print!("{}", PROMPT);
        if let Err(error) = io::stdout().flush() {
            eprintln!("Error writing prompt: {}", error);
            break;
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                stats.evaluated += 1;
                if !runner::run(line, None, options) {
                    stats.failed += 1;
                }
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }

    stats
}

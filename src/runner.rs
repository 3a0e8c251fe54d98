use crate::ast::Expr;
use crate::error::CalcError;
use crate::evaluator::Evaluator;
use crate::lexer::Scanner;
use crate::parser::Parser;
use crate::render::render_tree;
use crate::value::Value;
use tracing::{debug, trace, warn};

/// Presentation settings shared by the one-shot runner and the REPL.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Print the rendered expression tree before the result.
    pub show_tree: bool,
    /// Print every token as it is scanned.
    pub trace_tokens: bool,
}

/// Scans, parses and evaluates one expression, honouring `options`.
pub fn evaluate(source: &str, options: &Options) -> Result<(Expr, Value), CalcError> {
    debug!(input = source, "evaluating expression");

    let scanner = if options.trace_tokens {
        Scanner::with_observer(source, |token| println!("Token: {}", token))
    } else {
        Scanner::new(source)
    };

    let tree = Parser::new(scanner)?.parse()?;
    trace!(tree = %tree, "parsed expression");

    let value = Evaluator::for_source(source).evaluate_expression(&tree)?;
    debug!(result = %value, "evaluated expression");

    Ok((tree, value))
}

/// Evaluates `source` and prints the outcome. Returns whether it succeeded.
pub fn run(source: &str, filename: Option<&str>, options: &Options) -> bool {
    match evaluate(source, options) {
        Ok((tree, value)) => {
            if options.show_tree {
                println!("{}", render_tree(&tree));
            }
            println!("Result: {}", value);
            true
        }
        Err(error) => {
            warn!(input = source, error = %error, "expression failed");
            if let Err(io_error) = error.report(source, filename) {
                eprintln!("Error: {} ({})", error, io_error);
            }
            false
        }
    }
}

/// Evaluates every non-empty line of `contents` independently.
/// Returns the number of lines that failed.
pub fn run_lines(contents: &str, filename: &str, options: &Options) -> usize {
    let mut failures = 0;

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let location = format!("{}:{}", filename, index + 1);
        if !run(line, Some(&location), options) {
            failures += 1;
        }
    }

    failures
}

// treecalc: integer arithmetic calculator library
//
// Text is scanned into tokens, parsed by recursive descent into an
// expression tree, and the tree is evaluated to a number. Each stage reports
// failures as a `CalcError` that can be rendered as a labelled diagnostic.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr};
pub use error::{CalcError, ErrorKind, Span};
pub use evaluator::{evaluate, Evaluator};
pub use lexer::{Scanner, Token, TokenType};
pub use parser::Parser;
pub use render::render_tree;
pub use runner::Options;
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;

/// Parses `text` into an expression tree. The whole input must form one
/// expression.
pub fn parse(text: &str) -> Result<Expr, CalcError> {
    Parser::new(Scanner::new(text))?.parse()
}

/// Parses and evaluates `text`, returning both the tree and its value.
pub fn parse_and_evaluate(text: &str) -> Result<(Expr, Value), CalcError> {
    let tree = parse(text)?;
    let value = Evaluator::for_source(text).evaluate_expression(&tree)?;
    Ok((tree, value))
}

use clap::{Arg, ArgAction, Command};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use treecalc::{repl, runner, Options};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let matches = Command::new("treecalc")
        .about("Evaluates integer arithmetic expressions and shows their syntax tree")
        .arg(
            Arg::new("expression")
                .help("The expression to evaluate")
                .value_name("EXPRESSION")
                .index(1),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Evaluate every non-empty line of FILE")
                .value_name("FILE")
                .conflicts_with("expression"),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["expression", "file"]),
        )
        .arg(
            Arg::new("tree")
                .short('t')
                .long("tree")
                .help("Print the expression tree before the result")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print every token as it is scanned")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let options = Options {
        show_tree: matches.get_flag("tree"),
        trace_tokens: matches.get_flag("tokens"),
    };

    if matches.get_flag("interactive") {
        repl::start(&options);
        ExitCode::SUCCESS
    } else if let Some(expression) = matches.get_one::<String>("expression") {
        if runner::run(expression, None, &options) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    } else if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(file_path, &options)
    } else {
        repl::start(&options);
        ExitCode::SUCCESS
    }
}

fn run_file(path: &str, options: &Options) -> ExitCode {
    let path = Path::new(path);

    match fs::read_to_string(path) {
        Ok(contents) => {
            let failures = runner::run_lines(&contents, &path.display().to_string(), options);
            if failures == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

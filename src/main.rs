// File: src/main.rs
//
// Main entry point for the Stel interpreter.
// Handles command-line argument parsing and dispatches to the
// appropriate subcommand (run or repl).

use clap::{Parser as ClapParser, Subcommand};
use stel::{errors, interpreter, lexer, parser, repl};
use log::{debug, error};
use simplelog::{Config as LogConfig, LevelFilter, SimpleLogger};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(
    name = "stel",
    about = "Stel: a small, gradually-typed scripting language",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Run a Stel script file
    Run {
        /// Path to the .stl file
        file: PathBuf,
    },

    /// Launch the interactive Stel shell
    Repl,
}

fn init_logging(debug: bool) {
    let filter = if debug { LevelFilter::Debug } else { LevelFilter::Error };
    if let Err(e) = SimpleLogger::init(filter, LogConfig::default()) {
        eprintln!("failed to init logger: {}", e);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Run { file } => run_file(&file),
        Commands::Repl => match repl::Repl::new() {
            Ok(mut repl) => match repl.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("repl failed: {}", e);
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                error!("cannot start repl: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn run_file(file: &PathBuf) -> ExitCode {
    let source = match fs::read_to_string(file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("cannot read {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!("running {} ({} bytes)", file.display(), source.len());

    let file_name = file.display().to_string();
    let source_lines: Vec<&str> = source.lines().collect();

    // Annotate a static error with its file name and source line
    let annotate = |mut err: errors::StelError| {
        err.location.file = Some(file_name.clone());
        if err.location.is_known() {
            if let Some(line) = source_lines.get(err.location.line - 1) {
                err = err.with_source(line.to_string());
            }
        }
        err
    };

    let tokens = match lexer::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprint!("{}", annotate(err));
            return ExitCode::FAILURE;
        }
    };
    let stmts = match parser::Parser::new(tokens).parse() {
        Ok(stmts) => stmts,
        Err(err) => {
            eprint!("{}", annotate(err));
            return ExitCode::FAILURE;
        }
    };

    let mut interp = interpreter::Interpreter::new();
    if let Some(dir) = file.parent() {
        if !dir.as_os_str().is_empty() {
            interp.set_base_dir(dir.to_path_buf());
        } else if let Ok(cwd) = std::env::current_dir() {
            interp.set_base_dir(cwd);
        }
    }

    match interp.run(&stmts) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", err);
            ExitCode::FAILURE
        }
    }
}

// File: src/repl.rs
//
// Interactive REPL (Read-Eval-Print Loop) for the Stel programming
// language. Provides an interactive shell with:
// - Multi-line input support for functions, loops, and control structures
// - Command history with up/down arrow navigation
// - Special commands (:help, :quit, :reset)
// - Persistent interpreter state across inputs

use crate::ast::Stmt;
use crate::interpreter::{Interpreter, Value};
use crate::lexer::tokenize;
use crate::parser::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// REPL session that maintains interpreter state and handles user
/// interaction
pub struct Repl {
    interpreter: Interpreter,
    editor: DefaultEditor,
}

impl Repl {
    /// Creates a new REPL session with a fresh interpreter
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let editor = DefaultEditor::new()?;
        let mut interpreter = Interpreter::new();
        if let Ok(cwd) = std::env::current_dir() {
            interpreter.set_base_dir(cwd);
        }
        Ok(Repl { interpreter, editor })
    }

    fn show_banner(&self) {
        println!(
            "{} {}",
            format!("Stel {}", env!("CARGO_PKG_VERSION")).bright_cyan().bold(),
            "interactive shell".bright_cyan()
        );
        println!(
            "  Type {} for commands, {} to leave.",
            ":help".bright_yellow(),
            ":quit".bright_yellow()
        );
        println!();
    }

    /// Starts the REPL loop
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.show_banner();

        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() {
                "stel> ".bright_green().to_string()
            } else {
                "....> ".bright_blue().to_string()
            };

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());

                    if buffer.is_empty() && line.trim_start().starts_with(':') {
                        if self.handle_command(line.trim()) {
                            continue;
                        } else {
                            break; // :quit
                        }
                    }

                    buffer.push_str(&line);
                    buffer.push('\n');

                    if is_input_complete(&buffer) {
                        self.eval_input(&buffer);
                        buffer.clear();
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C (input discarded, :quit to exit)".bright_yellow());
                    buffer.clear();
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    eprintln!("{} {}", "Error:".bright_red(), err);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handles special REPL commands starting with ':'.
    /// Returns true to continue the REPL, false to quit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":help" | ":h" => {
                self.show_help();
                true
            }
            ":quit" | ":q" | ":exit" => {
                println!("{}", "Goodbye!".bright_cyan());
                false
            }
            ":reset" | ":r" => {
                self.interpreter = Interpreter::new();
                if let Ok(cwd) = std::env::current_dir() {
                    self.interpreter.set_base_dir(cwd);
                }
                println!("{}", "environment reset".bright_green());
                true
            }
            _ => {
                println!(
                    "{} unknown command: {} (try {})",
                    "Error:".bright_red(),
                    cmd.bright_yellow(),
                    ":help".bright_yellow()
                );
                true
            }
        }
    }

    fn show_help(&self) {
        println!();
        println!("{}", "Commands:".bright_cyan().bold());
        println!("  {}  show this help", ":help, :h ".bright_yellow());
        println!("  {}  leave the shell", ":quit, :q ".bright_yellow());
        println!("  {}  discard all bindings", ":reset, :r".bright_yellow());
        println!();
        println!("Leave braces, brackets, or parentheses unclosed to continue");
        println!("on the next line; close them to run the input.");
        println!();
    }

    /// Evaluates one complete input and displays the result
    fn eval_input(&mut self, input: &str) {
        if input.trim().is_empty() {
            return;
        }

        let tokens = match tokenize(input) {
            Ok(tokens) => tokens,
            Err(err) => {
                eprint!("{}", err);
                return;
            }
        };
        let stmts = match Parser::new(tokens).parse() {
            Ok(stmts) => stmts,
            Err(err) => {
                eprint!("{}", err);
                return;
            }
        };

        // Echo the value only for inputs that end in an expression
        let echo = matches!(stmts.last(), Some(Stmt::Expr(_)));
        match self.interpreter.run(&stmts) {
            Ok(value) => {
                if echo && !matches!(value, Value::Null) {
                    println!("{} {}", "=>".bright_blue(), value.repr().bright_white());
                }
            }
            Err(err) => {
                eprint!("{}", err);
            }
        }
    }
}

/// Checks whether all delimiters are balanced outside strings/comments,
/// which is the REPL's signal that the input is complete
fn is_input_complete(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return true;
    }

    let mut brace_count = 0i32;
    let mut bracket_count = 0i32;
    let mut paren_count = 0i32;
    let mut in_string = false;
    let mut escape_next = false;
    let mut in_comment = false;

    for ch in trimmed.chars() {
        if in_comment {
            if ch == '\n' {
                in_comment = false;
            }
            continue;
        }
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '#' if !in_string => in_comment = true,
            '{' if !in_string => brace_count += 1,
            '}' if !in_string => brace_count -= 1,
            '[' if !in_string => bracket_count += 1,
            ']' if !in_string => bracket_count -= 1,
            '(' if !in_string => paren_count += 1,
            ')' if !in_string => paren_count -= 1,
            _ => {}
        }
    }

    !in_string && brace_count <= 0 && bracket_count <= 0 && paren_count <= 0
}

#[cfg(test)]
mod tests {
    use super::is_input_complete;

    #[test]
    fn test_balanced_input_is_complete() {
        assert!(is_input_complete("let x = 1"));
        assert!(is_input_complete("fn f() { return 1 }"));
        assert!(is_input_complete(""));
    }

    #[test]
    fn test_open_delimiters_continue_input() {
        assert!(!is_input_complete("fn f() {"));
        assert!(!is_input_complete("[1, 2,"));
        assert!(!is_input_complete("\"unterminated"));
    }

    #[test]
    fn test_braces_inside_strings_and_comments_are_ignored() {
        assert!(is_input_complete("let s = \"{\""));
        assert!(is_input_complete("let x = 1 # {"));
    }
}

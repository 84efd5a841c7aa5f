// File: src/interpreter/native_functions/io.rs
//
// I/O built-ins: print and input.

use super::{expect_arity_range, str_arg, NativeFn};
use crate::interpreter::control_flow::EvalResult;
use crate::interpreter::value::Value;
use crate::interpreter::Interpreter;
use std::io::{BufRead, Write};

pub const ENTRIES: &[(&str, NativeFn)] = &[("print", print), ("input", input)];

/// Space-joins its arguments and writes them newline-terminated to the
/// interpreter's output channel (stdout, or a capture buffer)
fn print(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let parts: Vec<String> = args.iter().map(Value::display).collect();
    interp.write_output(&parts.join(" "));
    Ok(Value::Null)
}

/// Reads one line from stdin, without its trailing newline.
/// An optional prompt argument is written first. Returns null at EOF.
fn input(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity_range("input", args, 0, 1)?;
    if !args.is_empty() {
        let prompt = str_arg("input", args, 0)?;
        print!("{}", prompt);
        let _ = std::io::stdout().flush();
    }

    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(0) => Ok(Value::Null),
        Ok(_) => {
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Ok(Value::str(line))
        }
        Err(_) => Ok(Value::Null),
    }
}

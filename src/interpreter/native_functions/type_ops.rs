// File: src/interpreter/native_functions/type_ops.rs
//
// Type introspection and conversion built-ins.

use super::{expect_arity, NativeFn};
use crate::interpreter::control_flow::{EvalResult, Thrown};
use crate::interpreter::value::Value;
use crate::interpreter::Interpreter;

pub const ENTRIES: &[(&str, NativeFn)] =
    &[("type_of", type_of), ("to_string", to_string), ("to_int", to_int), ("to_float", to_float)];

fn type_of(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("type_of", args, 1)?;
    Ok(Value::str(args[0].type_name()))
}

fn to_string(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("to_string", args, 1)?;
    Ok(Value::str(args[0].display()))
}

fn to_int(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("to_int", args, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(n) => Ok(Value::Int(*n as i64)),
        Value::Bool(b) => Ok(Value::Int(*b as i64)),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| Thrown::type_error(format!("to_int cannot parse '{}'", s))),
        other => {
            Err(Thrown::type_error(format!("to_int cannot convert {}", other.type_name())))
        }
    }
}

fn to_float(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("to_float", args, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(n) => Ok(Value::Float(*n)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Thrown::type_error(format!("to_float cannot parse '{}'", s))),
        other => {
            Err(Thrown::type_error(format!("to_float cannot convert {}", other.type_name())))
        }
    }
}

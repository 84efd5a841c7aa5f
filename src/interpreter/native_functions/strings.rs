// File: src/interpreter/native_functions/strings.rs
//
// String built-ins, including `interp` placeholder substitution.

use super::{expect_arity, list_arg, map_arg, str_arg, NativeFn};
use crate::interpreter::control_flow::{EvalResult, Thrown};
use crate::interpreter::value::Value;
use crate::interpreter::Interpreter;

pub const ENTRIES: &[(&str, NativeFn)] = &[
    ("join", join),
    ("split", split),
    ("interp", interp),
    ("upper", upper),
    ("lower", lower),
    ("trim", trim),
    ("contains", contains),
    ("starts_with", starts_with),
    ("ends_with", ends_with),
    ("replace", replace),
    ("index_of", index_of),
];

fn join(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("join", args, 2)?;
    let items = list_arg("join", args, 0)?;
    let separator = str_arg("join", args, 1)?;

    let mut parts = Vec::with_capacity(items.len());
    for item in items.iter() {
        match item {
            Value::Str(s) => parts.push(s.to_string()),
            other => {
                return Err(Thrown::type_error(format!(
                    "join expects a list of strings, found {}",
                    other.type_name()
                )));
            }
        }
    }
    Ok(Value::str(parts.join(separator.as_ref())))
}

fn split(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("split", args, 2)?;
    let text = str_arg("split", args, 0)?;
    let separator = str_arg("split", args, 1)?;

    if separator.is_empty() {
        return Err(Thrown::type_error("split separator must not be empty".to_string()));
    }

    let parts: Vec<Value> =
        text.split(separator.as_ref()).map(|part| Value::str(part.to_string())).collect();
    Ok(Value::list(parts))
}

/// Substitute `{name}` placeholders in a template from a map of values
fn interp(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("interp", args, 2)?;
    let template = str_arg("interp", args, 0)?;
    let values = map_arg("interp", args, 1)?;

    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '{' {
            result.push(c);
            continue;
        }

        let mut key = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(ch) => key.push(ch),
                None => {
                    return Err(Thrown::type_error(
                        "interp template has an unclosed '{' placeholder".to_string(),
                    ));
                }
            }
        }

        match values.get(&key) {
            Some(value) => result.push_str(&value.display()),
            None => {
                return Err(Thrown::type_error(format!(
                    "interp has no value for placeholder '{{{}}}'",
                    key
                )));
            }
        }
    }

    Ok(Value::str(result))
}

fn upper(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("upper", args, 1)?;
    Ok(Value::str(str_arg("upper", args, 0)?.to_uppercase()))
}

fn lower(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("lower", args, 1)?;
    Ok(Value::str(str_arg("lower", args, 0)?.to_lowercase()))
}

fn trim(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("trim", args, 1)?;
    Ok(Value::str(str_arg("trim", args, 0)?.trim().to_string()))
}

fn contains(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("contains", args, 2)?;
    let text = str_arg("contains", args, 0)?;
    let needle = str_arg("contains", args, 1)?;
    Ok(Value::Bool(text.contains(needle.as_ref())))
}

fn starts_with(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("starts_with", args, 2)?;
    let text = str_arg("starts_with", args, 0)?;
    let prefix = str_arg("starts_with", args, 1)?;
    Ok(Value::Bool(text.starts_with(prefix.as_ref())))
}

fn ends_with(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("ends_with", args, 2)?;
    let text = str_arg("ends_with", args, 0)?;
    let suffix = str_arg("ends_with", args, 1)?;
    Ok(Value::Bool(text.ends_with(suffix.as_ref())))
}

fn replace(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("replace", args, 3)?;
    let text = str_arg("replace", args, 0)?;
    let from = str_arg("replace", args, 1)?;
    let to = str_arg("replace", args, 2)?;

    if from.is_empty() {
        return Err(Thrown::type_error("replace pattern must not be empty".to_string()));
    }
    Ok(Value::str(text.replace(from.as_ref(), to)))
}

/// Byte offset of the first occurrence of a substring, or -1
fn index_of(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("index_of", args, 2)?;
    let text = str_arg("index_of", args, 0)?;
    let needle = str_arg("index_of", args, 1)?;
    match text.find(needle.as_ref()) {
        Some(offset) => Ok(Value::Int(offset as i64)),
        None => Ok(Value::Int(-1)),
    }
}

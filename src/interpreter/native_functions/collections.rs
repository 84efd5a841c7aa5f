// File: src/interpreter/native_functions/collections.rs
//
// Sequence and map built-ins. Everything here is value-returning: sort,
// reverse, and friends build new collections and leave their arguments
// untouched.

use super::{expect_arity, expect_arity_range, int_arg, list_arg, map_arg, NativeFn};
use crate::interpreter::control_flow::{EvalResult, Thrown};
use crate::interpreter::value::Value;
use crate::interpreter::Interpreter;
use std::cmp::Ordering;

pub const ENTRIES: &[(&str, NativeFn)] = &[
    ("range", range),
    ("len", len),
    ("reverse", reverse),
    ("sort", sort),
    ("zip", zip),
    ("enumerate", enumerate),
    ("flatten", flatten),
    ("unique", unique),
    ("count", count),
    ("repeat", repeat),
    ("map_keys", map_keys),
    ("map_values", map_values),
    ("array_contains", array_contains),
    ("array_index_of", array_index_of),
];

/// range(end), range(start, end), or range(start, end, step).
/// Half-open, like the loops it feeds.
fn range(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity_range("range", args, 1, 3)?;

    let (start, end, step) = match args.len() {
        1 => (0, int_arg("range", args, 0)?, 1),
        2 => (int_arg("range", args, 0)?, int_arg("range", args, 1)?, 1),
        _ => (int_arg("range", args, 0)?, int_arg("range", args, 1)?, int_arg("range", args, 2)?),
    };

    if step == 0 {
        return Err(Thrown::type_error("range step must not be zero".to_string()));
    }

    let mut items = Vec::new();
    let mut current = start;
    if step > 0 {
        while current < end {
            items.push(Value::Int(current));
            current += step;
        }
    } else {
        while current > end {
            items.push(Value::Int(current));
            current += step;
        }
    }
    Ok(Value::list(items))
}

fn len(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("len", args, 1)?;
    match &args[0] {
        Value::Str(s) => Ok(Value::Int(s.len() as i64)),
        Value::List(items) => Ok(Value::Int(items.len() as i64)),
        Value::Tuple(items) => Ok(Value::Int(items.len() as i64)),
        Value::Map(map) => Ok(Value::Int(map.len() as i64)),
        other => Err(Thrown::type_error(format!(
            "len expects a string, list, tuple, or map, got {}",
            other.type_name()
        ))),
    }
}

fn reverse(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("reverse", args, 1)?;
    match &args[0] {
        Value::List(items) => {
            let mut reversed: Vec<Value> = items.as_ref().clone();
            reversed.reverse();
            Ok(Value::list(reversed))
        }
        Value::Str(s) => Ok(Value::str(s.chars().rev().collect::<String>())),
        other => Err(Thrown::type_error(format!(
            "reverse expects a list or string, got {}",
            other.type_name()
        ))),
    }
}

/// Sort a list of all-numbers or all-strings into a new list
fn sort(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("sort", args, 1)?;
    let items = list_arg("sort", args, 0)?;

    let all_numeric = items.iter().all(|v| matches!(v, Value::Int(_) | Value::Float(_)));
    let all_strings = items.iter().all(|v| matches!(v, Value::Str(_)));
    if !all_numeric && !all_strings {
        return Err(Thrown::type_error(
            "sort expects a list of all numbers or all strings".to_string(),
        ));
    }

    let mut sorted: Vec<Value> = items.as_ref().clone();
    if all_numeric {
        sorted.sort_by(|a, b| {
            let x = match a {
                Value::Int(n) => *n as f64,
                Value::Float(n) => *n,
                _ => unreachable!(),
            };
            let y = match b {
                Value::Int(n) => *n as f64,
                Value::Float(n) => *n,
                _ => unreachable!(),
            };
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        });
    } else {
        sorted.sort_by(|a, b| match (a, b) {
            (Value::Str(x), Value::Str(y)) => x.cmp(y),
            _ => unreachable!(),
        });
    }
    Ok(Value::list(sorted))
}

/// Pair up two lists element-wise; the result has the shorter length
fn zip(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("zip", args, 2)?;
    let left = list_arg("zip", args, 0)?;
    let right = list_arg("zip", args, 1)?;

    let pairs: Vec<Value> = left
        .iter()
        .zip(right.iter())
        .map(|(a, b)| Value::tuple(vec![a.clone(), b.clone()]))
        .collect();
    Ok(Value::list(pairs))
}

fn enumerate(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("enumerate", args, 1)?;
    let items = list_arg("enumerate", args, 0)?;

    let pairs: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| Value::tuple(vec![Value::Int(index as i64), item.clone()]))
        .collect();
    Ok(Value::list(pairs))
}

/// Flatten one level of nesting; non-list elements pass through
fn flatten(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("flatten", args, 1)?;
    let items = list_arg("flatten", args, 0)?;

    let mut result = Vec::new();
    for item in items.iter() {
        match item {
            Value::List(inner) => result.extend(inner.iter().cloned()),
            other => result.push(other.clone()),
        }
    }
    Ok(Value::list(result))
}

/// Keep the first occurrence of each distinct element
fn unique(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("unique", args, 1)?;
    let items = list_arg("unique", args, 0)?;

    let mut result: Vec<Value> = Vec::new();
    for item in items.iter() {
        if !result.contains(item) {
            result.push(item.clone());
        }
    }
    Ok(Value::list(result))
}

/// Occurrences of an element in a list, or of a (non-overlapping)
/// substring in a string
fn count(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("count", args, 2)?;
    match (&args[0], &args[1]) {
        (Value::List(items), needle) => {
            let total = items.iter().filter(|item| *item == needle).count();
            Ok(Value::Int(total as i64))
        }
        (Value::Str(text), Value::Str(needle)) => {
            if needle.is_empty() {
                return Err(Thrown::type_error("count needle must not be empty".to_string()));
            }
            Ok(Value::Int(text.matches(needle.as_ref()).count() as i64))
        }
        (other, _) => Err(Thrown::type_error(format!(
            "count expects a list or string, got {}",
            other.type_name()
        ))),
    }
}

/// repeat("ab", 3) -> "ababab"; repeat(x, 3) -> [x, x, x]
fn repeat(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("repeat", args, 2)?;
    let times = int_arg("repeat", args, 1)?;
    if times < 0 {
        return Err(Thrown::type_error("repeat count must not be negative".to_string()));
    }
    let times = times as usize;

    match &args[0] {
        Value::Str(s) => Ok(Value::str(s.repeat(times))),
        other => Ok(Value::list(vec![other.clone(); times])),
    }
}

fn map_keys(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("map_keys", args, 1)?;
    let map = map_arg("map_keys", args, 0)?;
    let keys: Vec<Value> = map.keys().map(|key| Value::str(key.to_string())).collect();
    Ok(Value::list(keys))
}

fn map_values(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("map_values", args, 1)?;
    let map = map_arg("map_values", args, 0)?;
    let values: Vec<Value> = map.iter().map(|(_, value)| value.clone()).collect();
    Ok(Value::list(values))
}

fn array_contains(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("array_contains", args, 2)?;
    let items = list_arg("array_contains", args, 0)?;
    Ok(Value::Bool(items.contains(&args[1])))
}

fn array_index_of(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("array_index_of", args, 2)?;
    let items = list_arg("array_index_of", args, 0)?;
    match items.iter().position(|item| *item == args[1]) {
        Some(index) => Ok(Value::Int(index as i64)),
        None => Ok(Value::Int(-1)),
    }
}

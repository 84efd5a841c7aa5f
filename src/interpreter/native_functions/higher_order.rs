// File: src/interpreter/native_functions/higher_order.rs
//
// Higher-order built-ins. The function argument is invoked through the
// interpreter's ordinary call mechanism, so signals raised inside a user
// callback (throws, errors) propagate to the caller of the built-in.

use super::{callable_arg, expect_arity, expect_arity_range, list_arg, NativeFn};
use crate::interpreter::control_flow::{EvalResult, Thrown};
use crate::interpreter::value::Value;
use crate::interpreter::Interpreter;

pub const ENTRIES: &[(&str, NativeFn)] = &[
    ("map", map),
    ("filter", filter),
    ("find", find_element),
    ("reduce", reduce),
    ("all", all),
    ("any", any),
];

fn map(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("map", args, 2)?;
    let items = list_arg("map", args, 0)?.clone();
    let function = callable_arg("map", args, 1)?;

    let mut result = Vec::with_capacity(items.len());
    for item in items.iter() {
        result.push(interp.call_value(function.clone(), vec![item.clone()])?);
    }
    Ok(Value::list(result))
}

fn filter(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("filter", args, 2)?;
    let items = list_arg("filter", args, 0)?.clone();
    let predicate = callable_arg("filter", args, 1)?;

    let mut result = Vec::new();
    for item in items.iter() {
        let keep = interp.call_value(predicate.clone(), vec![item.clone()])?;
        if keep.is_truthy() {
            result.push(item.clone());
        }
    }
    Ok(Value::list(result))
}

/// First element satisfying the predicate, or null
fn find_element(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("find", args, 2)?;
    let items = list_arg("find", args, 0)?.clone();
    let predicate = callable_arg("find", args, 1)?;

    for item in items.iter() {
        let hit = interp.call_value(predicate.clone(), vec![item.clone()])?;
        if hit.is_truthy() {
            return Ok(item.clone());
        }
    }
    Ok(Value::Null)
}

/// reduce(list, fn) seeds with the first element;
/// reduce(list, fn, init) seeds with init
fn reduce(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity_range("reduce", args, 2, 3)?;
    let items = list_arg("reduce", args, 0)?.clone();
    let combiner = callable_arg("reduce", args, 1)?;

    let mut iter = items.iter();
    let mut accumulator = match args.get(2) {
        Some(init) => init.clone(),
        None => match iter.next() {
            Some(first) => first.clone(),
            None => {
                return Err(Thrown::type_error(
                    "reduce of an empty list needs an initial value".to_string(),
                ));
            }
        },
    };

    for item in iter {
        accumulator = interp.call_value(combiner.clone(), vec![accumulator, item.clone()])?;
    }
    Ok(accumulator)
}

/// all(list) tests truthiness; all(list, fn) tests the predicate.
/// Short-circuits on the first falsy result.
fn all(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity_range("all", args, 1, 2)?;
    let items = list_arg("all", args, 0)?.clone();
    let predicate = match args.get(1) {
        Some(_) => Some(callable_arg("all", args, 1)?),
        None => None,
    };

    for item in items.iter() {
        let outcome = match &predicate {
            Some(function) => interp.call_value(function.clone(), vec![item.clone()])?,
            None => item.clone(),
        };
        if !outcome.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// any(list) / any(list, fn); short-circuits on the first truthy result
fn any(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity_range("any", args, 1, 2)?;
    let items = list_arg("any", args, 0)?.clone();
    let predicate = match args.get(1) {
        Some(_) => Some(callable_arg("any", args, 1)?),
        None => None,
    };

    for item in items.iter() {
        let outcome = match &predicate {
            Some(function) => interp.call_value(function.clone(), vec![item.clone()])?,
            None => item.clone(),
        };
        if outcome.is_truthy() {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

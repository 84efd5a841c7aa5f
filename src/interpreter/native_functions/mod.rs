// File: src/interpreter/native_functions/mod.rs
//
// The built-in function registry: a fixed, process-wide, read-only table
// mapping names to native callables, assembled once from the category
// modules below and installed into the root environment before any user
// code runs. User bindings of the same name shadow the table entries;
// they can never mutate them.
//
// Every entry validates its argument count and coarse value kinds before
// doing any work, failing with ArityError/TypeError through the throw
// channel. All entries are value-returning; none mutates its arguments.

pub mod collections;
pub mod higher_order;
pub mod io;
pub mod math;
pub mod strings;
pub mod type_ops;

use ahash::AHashMap;
use once_cell::sync::Lazy;
use std::rc::Rc;

use super::control_flow::{EvalResult, Signal, Thrown};
use super::value::{OrderedMap, Value};
use super::Interpreter;

/// Signature shared by every native callable
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> EvalResult;

static REGISTRY: Lazy<AHashMap<&'static str, NativeFn>> = Lazy::new(|| {
    let mut table = AHashMap::new();
    let categories: &[&[(&'static str, NativeFn)]] = &[
        io::ENTRIES,
        math::ENTRIES,
        strings::ENTRIES,
        collections::ENTRIES,
        higher_order::ENTRIES,
        type_ops::ENTRIES,
    ];
    for entries in categories {
        for (name, function) in *entries {
            table.insert(*name, *function);
        }
    }
    table
});

/// All registered built-in names, for environment installation and
/// "did you mean" suggestions
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

/// Dispatch a native call by registry name
pub fn call(interp: &mut Interpreter, name: &str, args: &[Value]) -> EvalResult {
    match REGISTRY.get(name) {
        Some(function) => function(interp, args),
        None => Err(Thrown::name_error(format!("unknown built-in function '{}'", name))),
    }
}

// --- Argument validation helpers shared by the category modules ---

pub(crate) fn expect_arity(name: &str, args: &[Value], count: usize) -> Result<(), Signal> {
    if args.len() == count {
        Ok(())
    } else {
        Err(Thrown::arity_error(format!(
            "{} expects {} argument{}, got {}",
            name,
            count,
            if count == 1 { "" } else { "s" },
            args.len()
        )))
    }
}

pub(crate) fn expect_arity_range(
    name: &str,
    args: &[Value],
    min: usize,
    max: usize,
) -> Result<(), Signal> {
    if args.len() >= min && args.len() <= max {
        Ok(())
    } else {
        Err(Thrown::arity_error(format!(
            "{} expects {} to {} arguments, got {}",
            name,
            min,
            max,
            args.len()
        )))
    }
}

pub(crate) fn numeric_arg(name: &str, args: &[Value], index: usize) -> Result<f64, Signal> {
    match args.get(index) {
        Some(Value::Int(n)) => Ok(*n as f64),
        Some(Value::Float(n)) => Ok(*n),
        Some(other) => Err(Thrown::type_error(format!(
            "{} expects a number for argument {}, got {}",
            name,
            index + 1,
            other.type_name()
        ))),
        None => Err(Thrown::arity_error(format!("{} is missing argument {}", name, index + 1))),
    }
}

pub(crate) fn int_arg(name: &str, args: &[Value], index: usize) -> Result<i64, Signal> {
    match args.get(index) {
        Some(Value::Int(n)) => Ok(*n),
        Some(other) => Err(Thrown::type_error(format!(
            "{} expects an int for argument {}, got {}",
            name,
            index + 1,
            other.type_name()
        ))),
        None => Err(Thrown::arity_error(format!("{} is missing argument {}", name, index + 1))),
    }
}

pub(crate) fn str_arg<'a>(
    name: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a Rc<str>, Signal> {
    match args.get(index) {
        Some(Value::Str(s)) => Ok(s),
        Some(other) => Err(Thrown::type_error(format!(
            "{} expects a string for argument {}, got {}",
            name,
            index + 1,
            other.type_name()
        ))),
        None => Err(Thrown::arity_error(format!("{} is missing argument {}", name, index + 1))),
    }
}

pub(crate) fn list_arg<'a>(
    name: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a Rc<Vec<Value>>, Signal> {
    match args.get(index) {
        Some(Value::List(items)) => Ok(items),
        Some(other) => Err(Thrown::type_error(format!(
            "{} expects a list for argument {}, got {}",
            name,
            index + 1,
            other.type_name()
        ))),
        None => Err(Thrown::arity_error(format!("{} is missing argument {}", name, index + 1))),
    }
}

pub(crate) fn map_arg<'a>(
    name: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a Rc<OrderedMap>, Signal> {
    match args.get(index) {
        Some(Value::Map(map)) => Ok(map),
        Some(other) => Err(Thrown::type_error(format!(
            "{} expects a map for argument {}, got {}",
            name,
            index + 1,
            other.type_name()
        ))),
        None => Err(Thrown::arity_error(format!("{} is missing argument {}", name, index + 1))),
    }
}

pub(crate) fn callable_arg(name: &str, args: &[Value], index: usize) -> Result<Value, Signal> {
    match args.get(index) {
        Some(value @ (Value::Closure(_) | Value::NativeFunction(_))) => Ok(value.clone()),
        Some(other) => Err(Thrown::type_error(format!(
            "{} expects a function for argument {}, got {}",
            name,
            index + 1,
            other.type_name()
        ))),
        None => Err(Thrown::arity_error(format!("{} is missing argument {}", name, index + 1))),
    }
}

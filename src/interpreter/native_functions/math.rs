// File: src/interpreter/native_functions/math.rs
//
// Math built-ins. Operations preserve Int where the result is exact and
// promote to Float otherwise.

use super::{expect_arity, numeric_arg, NativeFn};
use crate::interpreter::control_flow::{EvalResult, Thrown};
use crate::interpreter::value::Value;
use crate::interpreter::Interpreter;

pub const ENTRIES: &[(&str, NativeFn)] = &[
    ("sqrt", sqrt),
    ("abs", abs),
    ("pow", pow),
    ("min", min),
    ("max", max),
    ("sum", sum),
    ("floor", floor),
    ("ceil", ceil),
    ("round", round),
];

fn sqrt(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("sqrt", args, 1)?;
    let x = numeric_arg("sqrt", args, 0)?;
    Ok(Value::Float(x.sqrt()))
}

fn abs(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("abs", args, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(n.abs())),
        Value::Float(n) => Ok(Value::Float(n.abs())),
        other => {
            Err(Thrown::type_error(format!("abs expects a number, got {}", other.type_name())))
        }
    }
}

fn pow(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("pow", args, 2)?;
    if let (Value::Int(base), Value::Int(exp)) = (&args[0], &args[1]) {
        if *exp >= 0 {
            if let Ok(exp) = u32::try_from(*exp) {
                if let Some(result) = base.checked_pow(exp) {
                    return Ok(Value::Int(result));
                }
            }
            // Fall through to float on overflow
        }
    }
    let base = numeric_arg("pow", args, 0)?;
    let exp = numeric_arg("pow", args, 1)?;
    Ok(Value::Float(base.powf(exp)))
}

fn pick(name: &str, args: &[Value], smaller: bool) -> EvalResult {
    expect_arity(name, args, 2)?;
    let a = numeric_arg(name, args, 0)?;
    let b = numeric_arg(name, args, 1)?;
    let first = if smaller { a <= b } else { a >= b };
    Ok(if first { args[0].clone() } else { args[1].clone() })
}

fn min(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    pick("min", args, true)
}

fn max(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    pick("max", args, false)
}

fn sum(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("sum", args, 1)?;
    let items = super::list_arg("sum", args, 0)?;

    let mut int_total: i64 = 0;
    let mut float_total: f64 = 0.0;
    let mut saw_float = false;

    for item in items.iter() {
        match item {
            Value::Int(n) => match int_total.checked_add(*n) {
                Some(total) => int_total = total,
                None => {
                    saw_float = true;
                    float_total += *n as f64;
                }
            },
            Value::Float(n) => {
                saw_float = true;
                float_total += n;
            }
            other => {
                return Err(Thrown::type_error(format!(
                    "sum expects a list of numbers, found {}",
                    other.type_name()
                )));
            }
        }
    }

    if saw_float {
        Ok(Value::Float(float_total + int_total as f64))
    } else {
        Ok(Value::Int(int_total))
    }
}

fn floor(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("floor", args, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(n) => Ok(Value::Int(n.floor() as i64)),
        other => {
            Err(Thrown::type_error(format!("floor expects a number, got {}", other.type_name())))
        }
    }
}

fn ceil(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("ceil", args, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(n) => Ok(Value::Int(n.ceil() as i64)),
        other => {
            Err(Thrown::type_error(format!("ceil expects a number, got {}", other.type_name())))
        }
    }
}

fn round(_interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    expect_arity("round", args, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(n) => Ok(Value::Int(n.round() as i64)),
        other => {
            Err(Thrown::type_error(format!("round expects a number, got {}", other.type_name())))
        }
    }
}

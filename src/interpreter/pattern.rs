// File: src/interpreter/pattern.rs
//
// Structural pattern tests for match arms.
//
// A pattern either fails to match or matches and produces the bindings
// its arm body should see (enum-variant payload elements). The evaluator
// tests arms in declaration order and stops at the first match.

use crate::ast::{Literal, Pattern};

use super::value::Value;

/// Convert a pattern literal into the runtime value it denotes
pub fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Int(n) => Value::Int(*n),
        Literal::Float(n) => Value::Float(*n),
        Literal::Str(s) => Value::str(s.as_str()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        _ => None,
    }
}

fn literal_numeric(literal: &Literal) -> Option<f64> {
    match literal {
        Literal::Int(n) => Some(*n as f64),
        Literal::Float(n) => Some(*n),
        _ => None,
    }
}

/// Test `pattern` against `subject`.
///
/// Returns the arm-scope bindings on a match and None otherwise. Enum
/// patterns with no parenthesized bindings match a variant regardless of
/// payload; patterns that do bind must name exactly the payload elements
/// (the evaluator validates the count against the declared arity before
/// calling this).
pub fn match_pattern(pattern: &Pattern, subject: &Value) -> Option<Vec<(String, Value)>> {
    match pattern {
        Pattern::Wildcard => Some(Vec::new()),
        Pattern::Literal(literal) => {
            if literal_value(literal) == *subject {
                Some(Vec::new())
            } else {
                None
            }
        }
        Pattern::Range { start, end } => {
            let value = numeric(subject)?;
            let lo = literal_numeric(start)?;
            let hi = literal_numeric(end)?;
            if value >= lo && value <= hi {
                Some(Vec::new())
            } else {
                None
            }
        }
        Pattern::EnumVariant { enum_name, variant, bindings } => {
            let Value::EnumVariant { enum_name: subject_enum, variant: subject_variant, payload } =
                subject
            else {
                return None;
            };
            if enum_name.as_str() != subject_enum.as_ref()
                || variant.as_str() != subject_variant.as_ref()
            {
                return None;
            }
            if bindings.is_empty() {
                return Some(Vec::new());
            }
            if bindings.len() != payload.len() {
                return None;
            }
            Some(
                bindings
                    .iter()
                    .zip(payload.iter())
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect(),
            )
        }
    }
}

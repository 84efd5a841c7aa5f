// File: src/interpreter/value.rs
//
// Runtime value types for the Stel programming language.
// Defines all value kinds that can be represented and manipulated at
// runtime, plus the insertion-ordered string map backing Map values and
// struct fields.
//
// Payloads are reference counted so cloning a value is cheap. The
// interpreter is single threaded, so Rc (not Arc) is used throughout.

use crate::ast::{Param, Stmt};
use ahash::AHashMap;
use std::fmt;
use std::rc::Rc;

use super::environment::EnvRef;

/// A string-keyed map that preserves insertion order.
///
/// Keys live in `order` (first insertion wins) while `entries` provides
/// hash lookup. Iteration always follows insertion order; equality is
/// order-insensitive.
#[derive(Debug, Clone, Default)]
pub struct OrderedMap {
    order: Vec<Rc<str>>,
    entries: AHashMap<Rc<str>, Value>,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            order: Vec::with_capacity(capacity),
            entries: AHashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert a key, keeping its original position if it already exists
    pub fn insert(&mut self, key: impl Into<Rc<str>>, value: Value) {
        let key = key.into();
        if self.entries.insert(Rc::clone(&key), value).is_none() {
            self.order.push(key);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &Rc<str>> {
        self.order.iter()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &Value)> {
        self.order.iter().map(move |key| {
            let value = self
                .entries
                .get(key)
                .expect("ordered key is always present in the entry table");
            (key, value)
        })
    }
}

impl PartialEq for OrderedMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl FromIterator<(String, Value)> for OrderedMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// A user-defined function value: parameters, body, and the environment
/// captured at the definition point
pub struct Closure {
    /// Binding name for diagnostics; None for values produced elsewhere
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub env: EnvRef,
}

// A recursive function's captured environment contains the closure
// itself, so Debug must not descend into it.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.params.iter().map(|p| p.name.as_str()).collect();
        write!(
            f,
            "Closure({}({}), {} stmts)",
            self.name.as_deref().unwrap_or("<anonymous>"),
            params.join(", "),
            self.body.len()
        )
    }
}

/// Runtime values in the Stel interpreter
#[derive(Debug, Clone)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value (reference-counted for cheap cloning)
    Str(Rc<str>),
    /// Boolean value
    Bool(bool),
    /// Null value
    Null,
    /// Ordered sequence of values
    List(Rc<Vec<Value>>),
    /// Insertion-ordered mapping from string keys to values
    Map(Rc<OrderedMap>),
    /// Fixed-length sequence of values
    Tuple(Rc<Vec<Value>>),
    /// Instance of a declared struct
    Struct { name: Rc<str>, fields: Rc<OrderedMap> },
    /// Value of a declared enum variant, with its constructor payload
    EnumVariant { enum_name: Rc<str>, variant: Rc<str>, payload: Rc<Vec<Value>> },
    /// User-defined function with its captured environment
    Closure(Rc<Closure>),
    /// Native (built-in) function identified by registry name
    NativeFunction(&'static str),
}

impl Value {
    /// Helper to create a Str value from anything string-like
    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Helper to create a List value from a Vec<Value>
    pub fn list(values: Vec<Value>) -> Self {
        Value::List(Rc::new(values))
    }

    /// Helper to create a Tuple value from a Vec<Value>
    pub fn tuple(values: Vec<Value>) -> Self {
        Value::Tuple(Rc::new(values))
    }

    /// Helper to create a Map value from an OrderedMap
    pub fn map(map: OrderedMap) -> Self {
        Value::Map(Rc::new(map))
    }

    /// The type name reported by diagnostics and `type_of`
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Tuple(_) => "tuple",
            Value::Struct { .. } => "struct",
            Value::EnumVariant { .. } => "enum",
            Value::Closure(_) => "function",
            Value::NativeFunction(_) => "function",
        }
    }

    /// Truthiness for control constructs: 0, 0.0, "", empty list/map,
    /// null, and false are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Null => false,
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            _ => true,
        }
    }

    /// Structural equality. Returns None when the operands are not
    /// comparable (function values), letting the caller raise a TypeError.
    pub fn structural_eq(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Closure(_), _)
            | (_, Value::Closure(_))
            | (Value::NativeFunction(_), _)
            | (_, Value::NativeFunction(_)) => None,
            _ => Some(self == other),
        }
    }

    /// Render a value the way `print` does: strings bare, everything
    /// else in literal-like notation.
    pub fn display(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.repr(),
        }
    }

    /// Render a value in literal-like notation (strings quoted)
    pub fn repr(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Float(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{:.1}", n)
                } else {
                    n.to_string()
                }
            }
            Value::Str(s) => format!("\"{}\"", s),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Map(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(key, value)| format!("\"{}\": {}", key, value.repr()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Tuple(items) => {
                let parts: Vec<String> = items.iter().map(Value::repr).collect();
                if parts.len() == 1 {
                    format!("({},)", parts[0])
                } else {
                    format!("({})", parts.join(", "))
                }
            }
            Value::Struct { name, fields } => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value.repr()))
                    .collect();
                format!("{} {{ {} }}", name, parts.join(", "))
            }
            Value::EnumVariant { enum_name, variant, payload } => {
                if payload.is_empty() {
                    format!("{}::{}", enum_name, variant)
                } else {
                    let parts: Vec<String> = payload.iter().map(Value::repr).collect();
                    format!("{}::{}({})", enum_name, variant, parts.join(", "))
                }
            }
            Value::Closure(closure) => {
                let params: Vec<&str> =
                    closure.params.iter().map(|p| p.name.as_str()).collect();
                match &closure.name {
                    Some(name) => format!("<fn {}({})>", name, params.join(", ")),
                    None => format!("<fn({})>", params.join(", ")),
                }
            }
            Value::NativeFunction(name) => format!("<built-in {}>", name),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // Mixed numerics compare by promotion
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (
                Value::Struct { name: name_a, fields: fields_a },
                Value::Struct { name: name_b, fields: fields_b },
            ) => name_a == name_b && fields_a == fields_b,
            (
                Value::EnumVariant { enum_name: ea, variant: va, payload: pa },
                Value::EnumVariant { enum_name: eb, variant: vb, payload: pb },
            ) => ea == eb && va == vb && pa == pb,
            // Function values are never equal, not even to themselves
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

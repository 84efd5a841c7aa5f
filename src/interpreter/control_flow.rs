// File: src/interpreter/control_flow.rs
//
// Control-flow signals for statement evaluation.
//
// Every statement evaluation returns Result<Value, Signal>: Ok carries the
// statement's value (Null for declarations), Err carries a signal that
// aborts normal sequencing and propagates upward until a construct handles
// it. Loops absorb Break/Continue, calls absorb Return, try/catch absorbs
// Throw; anything else re-propagates. Runtime errors travel the same Throw
// channel as user `throw`, which is what makes them catchable.

use crate::errors::ErrorKind;

use super::value::Value;

/// The propagating outcome of a statement evaluation that overrides
/// normal sequencing
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// `return` with its carried value (Null when omitted)
    Return(Value),
    /// `break`: exit the innermost loop
    Break,
    /// `continue`: skip to the next loop iteration
    Continue,
    /// `throw`, or an engine-raised runtime error
    Throw(Thrown),
}

/// The payload travelling on the throw channel.
///
/// User throws carry their value with kind RuntimeError; engine failures
/// carry a rendered message string under their taxonomy kind. `catch`
/// binds the payload value either way.
#[derive(Debug, Clone, PartialEq)]
pub struct Thrown {
    pub kind: ErrorKind,
    pub payload: Value,
}

impl Thrown {
    /// A user-level `throw value`
    pub fn user(payload: Value) -> Signal {
        Signal::Throw(Thrown { kind: ErrorKind::RuntimeError, payload })
    }

    fn engine(kind: ErrorKind, message: String) -> Signal {
        Signal::Throw(Thrown { kind, payload: Value::str(message) })
    }

    pub fn name_error(message: impl Into<String>) -> Signal {
        Self::engine(ErrorKind::NameError, message.into())
    }

    pub fn type_error(message: impl Into<String>) -> Signal {
        Self::engine(ErrorKind::TypeError, message.into())
    }

    pub fn arity_error(message: impl Into<String>) -> Signal {
        Self::engine(ErrorKind::ArityError, message.into())
    }

    pub fn non_exhaustive_match(message: impl Into<String>) -> Signal {
        Self::engine(ErrorKind::NonExhaustiveMatchError, message.into())
    }

    pub fn runtime_error(message: impl Into<String>) -> Signal {
        Self::engine(ErrorKind::RuntimeError, message.into())
    }

    pub fn import_error(message: impl Into<String>) -> Signal {
        Self::engine(ErrorKind::ImportError, message.into())
    }

    /// Render the payload for top-level error reporting
    pub fn message(&self) -> String {
        self.payload.display()
    }
}

/// Result type threaded through every evaluation operation
pub type EvalResult = Result<Value, Signal>;

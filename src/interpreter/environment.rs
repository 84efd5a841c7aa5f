// File: src/interpreter/environment.rs
//
// Lexical scoping environment for variable management in the Stel
// interpreter.
//
// Environments form a parent-linked chain: lookup resolves in the nearest
// enclosing scope that defines the name. Each frame is shared through
// Rc<RefCell<_>> because closures hold a reference to the environment
// active at their definition point, which must outlive the frame that
// created it. Teardown happens by reference counting when neither a
// closure nor an in-flight call references a frame.

use ahash::AHashMap;
use std::cell::RefCell;
use std::rc::Rc;

use super::value::Value;

pub type EnvRef = Rc<RefCell<Environment>>;

/// Error cases for assignment through the scope chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignError {
    /// The binding was declared `const`
    Immutable,
}

#[derive(Debug, Clone)]
struct Binding {
    value: Value,
    constant: bool,
}

/// One scope frame mapping names to values, with a parent link
#[derive(Debug, Default)]
pub struct Environment {
    values: AHashMap<String, Binding>,
    parent: Option<EnvRef>,
}

impl Environment {
    /// Create a root environment with no parent
    pub fn root() -> EnvRef {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// Create a child environment of `parent`
    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            values: AHashMap::new(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Define a mutable binding in this scope, shadowing any outer one
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), Binding { value, constant: false });
    }

    /// Define a `const` binding in this scope
    pub fn define_const(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), Binding { value, constant: true });
    }

    /// Look up a name, walking parent links outward. Returns a clone of
    /// the bound value.
    pub fn get(env: &EnvRef, name: &str) -> Option<Value> {
        let mut current = Rc::clone(env);
        loop {
            if let Some(binding) = current.borrow().values.get(name) {
                return Some(binding.value.clone());
            }
            let parent = current.borrow().parent.clone();
            match parent {
                Some(next) => current = next,
                None => return None,
            }
        }
    }

    /// Assign to the nearest binding of `name` in the chain. When the
    /// name is unbound anywhere, it is created in `env` itself (plain
    /// assignment doubles as definition at the current scope).
    pub fn assign(env: &EnvRef, name: &str, value: Value) -> Result<(), AssignError> {
        let mut current = Rc::clone(env);
        loop {
            {
                let mut frame = current.borrow_mut();
                if let Some(binding) = frame.values.get_mut(name) {
                    if binding.constant {
                        return Err(AssignError::Immutable);
                    }
                    binding.value = value;
                    return Ok(());
                }
            }
            let parent = current.borrow().parent.clone();
            match parent {
                Some(next) => current = next,
                None => break,
            }
        }

        env.borrow_mut().define(name, value);
        Ok(())
    }

    /// Whether `name` resolves anywhere in the chain
    pub fn is_bound(env: &EnvRef, name: &str) -> bool {
        Self::get(env, name).is_some()
    }

    /// All names visible from `env` (used for "did you mean" suggestions)
    pub fn visible_names(env: &EnvRef) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = Rc::clone(env);
        loop {
            names.extend(current.borrow().values.keys().cloned());
            let parent = current.borrow().parent.clone();
            match parent {
                Some(next) => current = next,
                None => break,
            }
        }
        names
    }

    /// The bindings defined directly in this frame, in no particular
    /// order. Used to collect a module's top-level exports.
    pub fn local_bindings(&self) -> Vec<(String, Value)> {
        self.values.iter().map(|(name, binding)| (name.clone(), binding.value.clone())).collect()
    }
}

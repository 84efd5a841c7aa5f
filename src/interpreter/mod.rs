// File: src/interpreter/mod.rs
//
// Tree-walking interpreter for the Stel programming language.
// Executes Stel programs by traversing the Abstract Syntax Tree (AST).
//
// Every statement evaluation returns Result<Value, Signal>. The Ok value
// is the statement's result (Null for declarations), so a block - and the
// whole program - evaluates to its last statement's value. The Err side
// carries a control-flow signal: loops absorb Break/Continue, calls absorb
// Return, try/catch absorbs Throw, and an unhandled signal reaching the
// top level halts the program.
//
// Runtime errors (NameError, TypeError, ArityError, non-exhaustive match,
// import failures) travel the same Throw channel as user `throw`, which
// is exactly what makes them catchable.

mod control_flow;
mod environment;
mod native_functions;
mod pattern;
mod types;
mod value;

pub use control_flow::{EvalResult, Signal, Thrown};
pub use environment::{AssignError, EnvRef, Environment};
pub use types::{EnumDescriptor, StructDescriptor, TypeRegistry, VariantDescriptor};
pub use value::{Closure, OrderedMap, Value};

use crate::ast::{Expr, MatchArm, Pattern, Stmt};
use crate::errors::{find_closest_match, StelError};
use crate::lexer::tokenize;
use crate::module::ModuleLoader;
use crate::parser::Parser;

use log::debug;
use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

/// Nested user-function calls beyond this depth raise a catchable
/// RuntimeError instead of overflowing the host stack
pub const MAX_CALL_DEPTH: usize = 256;

/// Main interpreter that executes Stel programs
pub struct Interpreter {
    /// Root environment holding the built-in bindings; user code runs in
    /// a child scope so shadowing never mutates the table
    builtins: EnvRef,
    /// Persistent top-level scope for programs and REPL input
    top_env: EnvRef,
    /// Declared struct/enum shapes, append-only
    types: TypeRegistry,
    /// Redirect for `print` output; stdout when unset
    output: Option<Rc<RefCell<Vec<u8>>>>,
    /// Function names of in-flight calls, innermost last
    call_stack: Vec<String>,
    /// Call-stack snapshot taken when a throw starts unwinding
    thrown_stack: Option<Vec<String>>,
    module_loader: ModuleLoader,
    /// Directory stack for resolving imports relative to the importing file
    import_dirs: Vec<PathBuf>,
}

impl Interpreter {
    /// Creates a new interpreter with the built-in registry installed
    pub fn new() -> Self {
        let builtins = Environment::root();
        {
            let mut root = builtins.borrow_mut();
            for name in native_functions::names() {
                root.define(name, Value::NativeFunction(name));
            }
        }
        let top_env = Environment::child(&builtins);

        Interpreter {
            builtins,
            top_env,
            types: TypeRegistry::new(),
            output: None,
            call_stack: Vec::new(),
            thrown_stack: None,
            module_loader: ModuleLoader::new(),
            import_dirs: Vec::new(),
        }
    }

    /// Redirect `print` output into a byte buffer (used by tests and the
    /// snapshot runner)
    pub fn set_output(&mut self, buffer: Rc<RefCell<Vec<u8>>>) {
        self.output = Some(buffer);
    }

    /// Seed the directory imports resolve against (the script's directory)
    pub fn set_base_dir(&mut self, dir: PathBuf) {
        self.import_dirs.clear();
        self.import_dirs.push(dir);
    }

    /// Read a top-level binding after a run (test and REPL introspection)
    pub fn get_global(&self, name: &str) -> Option<Value> {
        Environment::get(&self.top_env, name)
    }

    pub(crate) fn write_output(&self, msg: &str) {
        if let Some(out) = &self.output {
            let _ = writeln!(out.borrow_mut(), "{}", msg);
        } else {
            println!("{}", msg);
        }
    }

    /// Execute a program in the persistent top-level scope.
    ///
    /// Returns the program's final value (the last statement's value, or
    /// the payload of a top-level `return`). Uncaught throws and stray
    /// loop signals become errors carrying the taxonomy kind, the rendered
    /// payload, and the call stack at the point of the throw.
    pub fn run(&mut self, stmts: &[Stmt]) -> Result<Value, StelError> {
        let env = Rc::clone(&self.top_env);
        match self.exec_stmts(stmts, &env) {
            Ok(value) => Ok(value),
            Err(Signal::Return(value)) => Ok(value),
            Err(Signal::Break) => {
                Err(StelError::runtime_error("'break' outside of a loop".to_string()))
            }
            Err(Signal::Continue) => {
                Err(StelError::runtime_error("'continue' outside of a loop".to_string()))
            }
            Err(Signal::Throw(thrown)) => {
                let stack = self.thrown_stack.take().unwrap_or_default();
                Err(StelError::new(
                    thrown.kind,
                    thrown.message(),
                    crate::errors::SourceLocation::unknown(),
                )
                .with_call_stack(stack))
            }
        }
    }

    /// Evaluate statements in sequence, yielding the last statement's value
    pub(crate) fn exec_stmts(&mut self, stmts: &[Stmt], env: &EnvRef) -> EvalResult {
        let mut last = Value::Null;
        for stmt in stmts {
            last = self.exec_stmt(stmt, env)?;
        }
        Ok(last)
    }

    /// Run a statement list in a fresh child scope
    fn exec_block(&mut self, stmts: &[Stmt], env: &EnvRef) -> EvalResult {
        let scope = Environment::child(env);
        self.exec_stmts(stmts, &scope)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &EnvRef) -> EvalResult {
        match stmt {
            Stmt::Expr(expr) => self.eval_expr(expr, env),

            Stmt::Let { name, value, .. } => {
                let value = self.eval_expr(value, env)?;
                env.borrow_mut().define(name.clone(), value);
                Ok(Value::Null)
            }

            Stmt::Const { name, value, .. } => {
                let value = self.eval_expr(value, env)?;
                env.borrow_mut().define_const(name.clone(), value);
                Ok(Value::Null)
            }

            Stmt::Assign { name, value } => {
                let value = self.eval_expr(value, env)?;
                self.assign(env, name, value)?;
                Ok(Value::Null)
            }

            Stmt::Destructure { names, value } => {
                let value = self.eval_expr(value, env)?;
                let elements = match &value {
                    Value::Tuple(items) | Value::List(items) => items,
                    other => {
                        return Err(Thrown::type_error(format!(
                            "cannot destructure {} into {} names",
                            other.type_name(),
                            names.len()
                        )));
                    }
                };
                if elements.len() != names.len() {
                    return Err(Thrown::type_error(format!(
                        "destructuring expects {} values, got {}",
                        names.len(),
                        elements.len()
                    )));
                }
                for (name, element) in names.iter().zip(elements.iter()) {
                    self.assign(env, name, element.clone())?;
                }
                Ok(Value::Null)
            }

            Stmt::FnDef { name, params, body } => {
                let closure = Closure {
                    name: Some(name.clone()),
                    params: params.clone(),
                    body: body.clone(),
                    env: Rc::clone(env),
                };
                env.borrow_mut().define(name.clone(), Value::Closure(Rc::new(closure)));
                Ok(Value::Null)
            }

            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Null,
                };
                Err(Signal::Return(value))
            }

            Stmt::If { condition, then_branch, else_branch } => {
                if self.eval_expr(condition, env)?.is_truthy() {
                    self.exec_block(then_branch, env)?;
                } else if let Some(else_branch) = else_branch {
                    self.exec_block(else_branch, env)?;
                }
                Ok(Value::Null)
            }

            Stmt::While { condition, body } => {
                while self.eval_expr(condition, env)?.is_truthy() {
                    match self.exec_block(body, env) {
                        Ok(_) => {}
                        Err(Signal::Break) => break,
                        Err(Signal::Continue) => continue,
                        Err(signal) => return Err(signal),
                    }
                }
                Ok(Value::Null)
            }

            Stmt::For { var, iterable, body } => {
                let iterable = self.eval_expr(iterable, env)?;
                let items = self.iteration_items(&iterable)?;
                for item in items {
                    let scope = Environment::child(env);
                    scope.borrow_mut().define(var.clone(), item);
                    match self.exec_stmts(body, &scope) {
                        Ok(_) => {}
                        Err(Signal::Break) => break,
                        Err(Signal::Continue) => continue,
                        Err(signal) => return Err(signal),
                    }
                }
                Ok(Value::Null)
            }

            Stmt::Break => Err(Signal::Break),
            Stmt::Continue => Err(Signal::Continue),

            Stmt::StructDef { name, fields } => {
                self.types
                    .register_struct(StructDescriptor {
                        name: name.clone(),
                        fields: fields.clone(),
                    })
                    .map_err(Thrown::type_error)?;
                Ok(Value::Null)
            }

            Stmt::EnumDef { name, variants } => {
                let variants = variants
                    .iter()
                    .map(|v| VariantDescriptor { name: v.name.clone(), arity: v.payload.len() })
                    .collect();
                self.types
                    .register_enum(EnumDescriptor { name: name.clone(), variants })
                    .map_err(Thrown::type_error)?;
                Ok(Value::Null)
            }

            Stmt::TryCatch { try_block, catch_name, catch_block } => {
                match self.exec_block(try_block, env) {
                    Ok(_) => Ok(Value::Null),
                    Err(Signal::Throw(thrown)) => {
                        // Caught: stop tracking the unwinding stack
                        self.thrown_stack = None;
                        let scope = Environment::child(env);
                        scope.borrow_mut().define(catch_name.clone(), thrown.payload);
                        self.exec_stmts(catch_block, &scope)?;
                        Ok(Value::Null)
                    }
                    Err(signal) => Err(signal),
                }
            }

            Stmt::Throw(expr) => {
                let payload = self.eval_expr(expr, env)?;
                Err(Thrown::user(payload))
            }

            Stmt::Import(path) => self.exec_import(path, env),

            Stmt::Block(stmts) => {
                self.exec_block(stmts, env)?;
                Ok(Value::Null)
            }
        }
    }

    fn assign(&mut self, env: &EnvRef, name: &str, value: Value) -> Result<(), Signal> {
        match Environment::assign(env, name, value) {
            Ok(()) => Ok(()),
            Err(AssignError::Immutable) => Err(Thrown::name_error(format!(
                "cannot assign to immutable binding '{}'",
                name
            ))),
        }
    }

    fn iteration_items(&self, iterable: &Value) -> Result<Vec<Value>, Signal> {
        match iterable {
            Value::List(items) | Value::Tuple(items) => Ok(items.as_ref().clone()),
            Value::Str(s) => Ok(s.chars().map(|c| Value::str(c.to_string())).collect()),
            Value::Map(map) => Ok(map.keys().map(|key| Value::str(key.to_string())).collect()),
            other => Err(Thrown::type_error(format!(
                "cannot iterate over {}",
                other.type_name()
            ))),
        }
    }

    pub(crate) fn eval_expr(&mut self, expr: &Expr, env: &EnvRef) -> EvalResult {
        match expr {
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::Str(s) => Ok(Value::str(s.as_str())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Null => Ok(Value::Null),

            Expr::Identifier(name) => match Environment::get(env, name) {
                Some(value) => Ok(value),
                None => Err(self.undefined_name(env, name)),
            },

            Expr::List(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expr(element, env)?);
                }
                Ok(Value::list(items))
            }

            Expr::Tuple(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expr(element, env)?);
                }
                Ok(Value::tuple(items))
            }

            Expr::Map(pairs) => {
                let mut map = OrderedMap::with_capacity(pairs.len());
                for (key_expr, value_expr) in pairs {
                    let key = match self.eval_expr(key_expr, env)? {
                        Value::Str(s) => s.to_string(),
                        Value::Int(n) => n.to_string(),
                        other => {
                            return Err(Thrown::type_error(format!(
                                "map keys must be strings, got {}",
                                other.type_name()
                            )));
                        }
                    };
                    let value = self.eval_expr(value_expr, env)?;
                    map.insert(key, value);
                }
                Ok(Value::map(map))
            }

            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand, env)?;
                match op.as_str() {
                    "-" => match value {
                        Value::Int(n) => Ok(Value::Int(-n)),
                        Value::Float(n) => Ok(Value::Float(-n)),
                        other => Err(Thrown::type_error(format!(
                            "cannot negate {}",
                            other.type_name()
                        ))),
                    },
                    "not" => Ok(Value::Bool(!value.is_truthy())),
                    other => {
                        Err(Thrown::type_error(format!("unknown unary operator '{}'", other)))
                    }
                }
            }

            Expr::Binary { left, op, right } => {
                // and/or short-circuit without evaluating the untaken side
                if op == "and" {
                    let lhs = self.eval_expr(left, env)?;
                    if !lhs.is_truthy() {
                        return Ok(Value::Bool(false));
                    }
                    let rhs = self.eval_expr(right, env)?;
                    return Ok(Value::Bool(rhs.is_truthy()));
                }
                if op == "or" {
                    let lhs = self.eval_expr(left, env)?;
                    if lhs.is_truthy() {
                        return Ok(Value::Bool(true));
                    }
                    let rhs = self.eval_expr(right, env)?;
                    return Ok(Value::Bool(rhs.is_truthy()));
                }

                let lhs = self.eval_expr(left, env)?;
                let rhs = self.eval_expr(right, env)?;
                eval_binary(op, lhs, rhs)
            }

            Expr::Call { callee, args } => {
                let callee = self.eval_expr(callee, env)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.eval_expr(arg, env)?);
                }
                self.call_value(callee, arg_values)
            }

            Expr::Index { object, index } => {
                let object = self.eval_expr(object, env)?;
                let index = self.eval_expr(index, env)?;
                eval_index(&object, &index)
            }

            Expr::Field { object, field } => {
                let object = self.eval_expr(object, env)?;
                match &object {
                    Value::Struct { name, fields } => match fields.get(field) {
                        Some(value) => Ok(value.clone()),
                        None => Err(Thrown::type_error(format!(
                            "struct '{}' has no field '{}'",
                            name, field
                        ))),
                    },
                    other => Err(Thrown::type_error(format!(
                        "cannot access field '{}' on {}",
                        field,
                        other.type_name()
                    ))),
                }
            }

            Expr::StructLiteral { name, fields } => self.eval_struct_literal(name, fields, env),

            Expr::EnumVariant { enum_name, variant, args } => {
                self.eval_enum_variant(enum_name, variant, args, env)
            }

            Expr::Match { subject, arms } => self.eval_match(subject, arms, env),
        }
    }

    fn eval_struct_literal(
        &mut self,
        name: &str,
        fields: &[(String, Expr)],
        env: &EnvRef,
    ) -> EvalResult {
        let Some(descriptor) = self.types.struct_descriptor(name) else {
            return Err(Thrown::name_error(format!("unknown struct '{}'", name)));
        };

        // Evaluate supplied fields in literal order
        let mut supplied: Vec<(String, Value)> = Vec::with_capacity(fields.len());
        for (field_name, expr) in fields {
            if !descriptor.fields.iter().any(|f| f == field_name) {
                return Err(Thrown::type_error(format!(
                    "struct '{}' has no field '{}'",
                    name, field_name
                )));
            }
            if supplied.iter().any(|(existing, _)| existing == field_name) {
                return Err(Thrown::type_error(format!(
                    "field '{}' given twice in literal of '{}'",
                    field_name, name
                )));
            }
            supplied.push((field_name.clone(), self.eval_expr(expr, env)?));
        }

        // Instances store fields in declaration order; every declared
        // field must be present
        let mut instance = OrderedMap::with_capacity(descriptor.fields.len());
        for declared in &descriptor.fields {
            match supplied.iter().find(|(field_name, _)| field_name == declared) {
                Some((_, value)) => instance.insert(declared.as_str(), value.clone()),
                None => {
                    return Err(Thrown::type_error(format!(
                        "missing field '{}' in literal of '{}'",
                        declared, name
                    )));
                }
            }
        }

        Ok(Value::Struct { name: Rc::from(name), fields: Rc::new(instance) })
    }

    fn eval_enum_variant(
        &mut self,
        enum_name: &str,
        variant: &str,
        args: &[Expr],
        env: &EnvRef,
    ) -> EvalResult {
        let Some(descriptor) = self.types.enum_descriptor(enum_name) else {
            return Err(Thrown::name_error(format!("unknown enum '{}'", enum_name)));
        };
        let Some(variant_descriptor) = descriptor.variant(variant) else {
            return Err(Thrown::type_error(format!(
                "enum '{}' has no variant '{}'",
                enum_name, variant
            )));
        };

        if args.len() != variant_descriptor.arity {
            return Err(Thrown::arity_error(format!(
                "{}::{} expects {} value{}, got {}",
                enum_name,
                variant,
                variant_descriptor.arity,
                if variant_descriptor.arity == 1 { "" } else { "s" },
                args.len()
            )));
        }

        let mut payload = Vec::with_capacity(args.len());
        for arg in args {
            payload.push(self.eval_expr(arg, env)?);
        }

        Ok(Value::EnumVariant {
            enum_name: Rc::from(enum_name),
            variant: Rc::from(variant),
            payload: Rc::new(payload),
        })
    }

    fn eval_match(&mut self, subject: &Expr, arms: &[MatchArm], env: &EnvRef) -> EvalResult {
        // The subject is evaluated exactly once
        let subject = self.eval_expr(subject, env)?;

        for arm in arms {
            self.validate_pattern(&arm.pattern)?;
            if let Some(bindings) = pattern::match_pattern(&arm.pattern, &subject) {
                let scope = Environment::child(env);
                {
                    let mut frame = scope.borrow_mut();
                    for (name, value) in bindings {
                        frame.define(name, value);
                    }
                }
                return self.exec_stmts(&arm.body, &scope);
            }
        }

        Err(Thrown::non_exhaustive_match(format!("no arm matches {}", subject.repr())))
    }

    /// Enum patterns must name a declared enum/variant and bind either
    /// nothing or exactly the declared payload
    fn validate_pattern(&self, pattern: &Pattern) -> Result<(), Signal> {
        let Pattern::EnumVariant { enum_name, variant, bindings } = pattern else {
            return Ok(());
        };
        let Some(descriptor) = self.types.enum_descriptor(enum_name) else {
            return Err(Thrown::name_error(format!("unknown enum '{}'", enum_name)));
        };
        let Some(variant_descriptor) = descriptor.variant(variant) else {
            return Err(Thrown::type_error(format!(
                "enum '{}' has no variant '{}'",
                enum_name, variant
            )));
        };
        if !bindings.is_empty() && bindings.len() != variant_descriptor.arity {
            return Err(Thrown::arity_error(format!(
                "pattern {}::{} binds {} value{} but the variant carries {}",
                enum_name,
                variant,
                bindings.len(),
                if bindings.len() == 1 { "" } else { "s" },
                variant_descriptor.arity
            )));
        }
        Ok(())
    }

    /// Invoke a callable value with already-evaluated arguments. This is
    /// the single call mechanism shared by call expressions and the
    /// higher-order built-ins.
    pub(crate) fn call_value(&mut self, callee: Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Closure(closure) => self.call_closure(&closure, args),
            Value::NativeFunction(name) => native_functions::call(self, name, &args),
            other => {
                Err(Thrown::type_error(format!("{} is not callable", other.type_name())))
            }
        }
    }

    fn call_closure(&mut self, closure: &Closure, args: Vec<Value>) -> EvalResult {
        let name = closure.name.clone().unwrap_or_else(|| "<anonymous>".to_string());

        if self.call_stack.len() >= MAX_CALL_DEPTH {
            return Err(Thrown::runtime_error(format!(
                "maximum call depth ({}) exceeded in '{}'",
                MAX_CALL_DEPTH, name
            )));
        }
        if args.len() > closure.params.len() {
            return Err(Thrown::arity_error(format!(
                "'{}' expects at most {} argument{}, got {}",
                name,
                closure.params.len(),
                if closure.params.len() == 1 { "" } else { "s" },
                args.len()
            )));
        }

        // The call frame is a child of the environment captured at the
        // definition point, never of the caller's environment
        let call_env = Environment::child(&closure.env);
        self.call_stack.push(name.clone());

        let result = self.bind_params(&name, closure, args, &call_env).and_then(|()| {
            match self.exec_stmts(&closure.body, &call_env) {
                Ok(_) => Ok(Value::Null),
                Err(Signal::Return(value)) => Ok(value),
                Err(signal) => Err(signal),
            }
        });

        if let Err(Signal::Throw(_)) = &result {
            // First frame to see the throw snapshots the stack for
            // top-level reporting
            if self.thrown_stack.is_none() {
                self.thrown_stack = Some(self.call_stack.clone());
            }
        }
        self.call_stack.pop();
        result
    }

    fn bind_params(
        &mut self,
        name: &str,
        closure: &Closure,
        args: Vec<Value>,
        call_env: &EnvRef,
    ) -> Result<(), Signal> {
        let supplied = args.len();
        let mut args = args.into_iter();

        for (index, param) in closure.params.iter().enumerate() {
            let value = match args.next() {
                Some(value) => value,
                None => match &param.default {
                    // Defaults are evaluated in the call scope, so earlier
                    // parameters are visible to them
                    Some(default) => self.eval_expr(default, call_env)?,
                    None => {
                        return Err(Thrown::arity_error(format!(
                            "'{}' is missing argument '{}' ({} of {})",
                            name,
                            param.name,
                            index + 1,
                            closure.params.len()
                        )));
                    }
                },
            };
            call_env.borrow_mut().define(param.name.clone(), value);
        }

        debug_assert!(supplied <= closure.params.len());
        Ok(())
    }

    fn undefined_name(&self, env: &EnvRef, name: &str) -> Signal {
        let visible = Environment::visible_names(env);
        let message = match find_closest_match(name, visible.iter().map(String::as_str)) {
            Some(suggestion) => {
                format!("undefined variable '{}' (did you mean '{}'?)", name, suggestion)
            }
            None => format!("undefined variable '{}'", name),
        };
        Thrown::name_error(message)
    }

    /// Evaluate an imported file once and merge its top-level bindings
    /// into the importing scope. Subsequent imports of the same canonical
    /// path reuse the cached bindings.
    fn exec_import(&mut self, path_spec: &str, env: &EnvRef) -> EvalResult {
        let base = self.import_dirs.last().cloned();
        let Some(resolved) = self.module_loader.resolve(path_spec, base.as_deref()) else {
            return Err(Thrown::import_error(format!("module not found: '{}'", path_spec)));
        };

        if let Some(exports) = self.module_loader.cached(&resolved) {
            debug!("import cache hit for {}", resolved.display());
            let mut frame = env.borrow_mut();
            for (name, value) in exports.iter() {
                frame.define(name.clone(), value.clone());
            }
            return Ok(Value::Null);
        }

        if self.module_loader.is_loading(&resolved) {
            return Err(Thrown::import_error(format!(
                "circular import detected: '{}'",
                path_spec
            )));
        }

        let source = std::fs::read_to_string(&resolved).map_err(|e| {
            Thrown::import_error(format!("cannot read module '{}': {}", path_spec, e))
        })?;

        let tokens = tokenize(&source).map_err(|e| {
            Thrown::import_error(format!("in module '{}': {}", path_spec, e.message))
        })?;
        let stmts = Parser::new(tokens).parse().map_err(|e| {
            Thrown::import_error(format!("in module '{}': {}", path_spec, e.message))
        })?;

        debug!("loading module {}", resolved.display());
        self.module_loader.begin(resolved.clone());
        if let Some(parent) = resolved.parent() {
            self.import_dirs.push(parent.to_path_buf());
        }

        // Modules evaluate in a fresh child of the built-in scope: they
        // see the registry, not the importer's bindings
        let module_env = Environment::child(&self.builtins);
        let outcome = self.exec_stmts(&stmts, &module_env);

        if resolved.parent().is_some() {
            self.import_dirs.pop();
        }
        self.module_loader.finish(&resolved);

        match outcome {
            Ok(_) | Err(Signal::Return(_)) => {}
            Err(Signal::Throw(thrown)) => return Err(Signal::Throw(thrown)),
            Err(_) => {
                return Err(Thrown::import_error(format!(
                    "module '{}' used break/continue at top level",
                    path_spec
                )));
            }
        }

        let exports = module_env.borrow().local_bindings();
        self.module_loader.store(resolved, exports.clone());

        let mut frame = env.borrow_mut();
        for (name, value) in exports {
            frame.define(name, value);
        }
        Ok(Value::Null)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a (non-short-circuiting) binary operator to evaluated operands
fn eval_binary(op: &str, lhs: Value, rhs: Value) -> EvalResult {
    match op {
        "+" => match (&lhs, &rhs) {
            (Value::Int(a), Value::Int(b)) => match a.checked_add(*b) {
                Some(result) => Ok(Value::Int(result)),
                None => Err(Thrown::runtime_error("integer overflow in '+'".to_string())),
            },
            (Value::Str(a), Value::Str(b)) => {
                let mut result = a.to_string();
                result.push_str(b);
                Ok(Value::str(result))
            }
            _ => numeric_binop(op, &lhs, &rhs, |a, b| a + b),
        },
        "-" => match (&lhs, &rhs) {
            (Value::Int(a), Value::Int(b)) => match a.checked_sub(*b) {
                Some(result) => Ok(Value::Int(result)),
                None => Err(Thrown::runtime_error("integer overflow in '-'".to_string())),
            },
            _ => numeric_binop(op, &lhs, &rhs, |a, b| a - b),
        },
        "*" => match (&lhs, &rhs) {
            (Value::Int(a), Value::Int(b)) => match a.checked_mul(*b) {
                Some(result) => Ok(Value::Int(result)),
                None => Err(Thrown::runtime_error("integer overflow in '*'".to_string())),
            },
            // String repetition, in either operand order
            (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
                let times = usize::try_from(*n).unwrap_or(0);
                Ok(Value::str(s.repeat(times)))
            }
            _ => numeric_binop(op, &lhs, &rhs, |a, b| a * b),
        },
        "/" => match (&lhs, &rhs) {
            (Value::Int(_), Value::Int(0)) => {
                Err(Thrown::runtime_error("division by zero".to_string()))
            }
            // Integer division truncates toward zero
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a / b)),
            _ => numeric_binop(op, &lhs, &rhs, |a, b| a / b),
        },
        "%" => match (&lhs, &rhs) {
            (Value::Int(_), Value::Int(0)) => {
                Err(Thrown::runtime_error("modulo by zero".to_string()))
            }
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a % b)),
            _ => numeric_binop(op, &lhs, &rhs, |a, b| a % b),
        },
        "==" | "!=" => match lhs.structural_eq(&rhs) {
            Some(equal) => Ok(Value::Bool(if op == "==" { equal } else { !equal })),
            None => Err(Thrown::type_error("function values are not comparable".to_string())),
        },
        "<" | "<=" | ">" | ">=" => compare(op, &lhs, &rhs),
        other => Err(Thrown::type_error(format!("unknown operator '{}'", other))),
    }
}

fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        _ => None,
    }
}

fn numeric_binop(op: &str, lhs: &Value, rhs: &Value, apply: fn(f64, f64) -> f64) -> EvalResult {
    match (as_numeric(lhs), as_numeric(rhs)) {
        (Some(a), Some(b)) => Ok(Value::Float(apply(a, b))),
        _ => Err(Thrown::type_error(format!(
            "cannot apply '{}' to {} and {}",
            op,
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}

/// Relational comparison requires mutually ordered operands:
/// number-number or string-string
fn compare(op: &str, lhs: &Value, rhs: &Value) -> EvalResult {
    let ordering = match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => match (as_numeric(lhs), as_numeric(rhs)) {
            (Some(a), Some(b)) => match a.partial_cmp(&b) {
                Some(ordering) => ordering,
                None => return Ok(Value::Bool(false)), // NaN compares false
            },
            _ => {
                return Err(Thrown::type_error(format!(
                    "cannot compare {} and {}",
                    lhs.type_name(),
                    rhs.type_name()
                )));
            }
        },
    };

    let result = match op {
        "<" => ordering.is_lt(),
        "<=" => ordering.is_le(),
        ">" => ordering.is_gt(),
        ">=" => ordering.is_ge(),
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}

/// Index a list/tuple by position, a map by key, or a string by
/// character position
fn eval_index(object: &Value, index: &Value) -> EvalResult {
    match (object, index) {
        (Value::List(items), Value::Int(i)) | (Value::Tuple(items), Value::Int(i)) => {
            let position = usize::try_from(*i).ok().filter(|p| *p < items.len());
            match position {
                Some(position) => Ok(items[position].clone()),
                None => Err(Thrown::runtime_error(format!(
                    "index {} out of bounds for length {}",
                    i,
                    items.len()
                ))),
            }
        }
        (Value::Map(map), Value::Str(key)) => match map.get(key) {
            Some(value) => Ok(value.clone()),
            None => Err(Thrown::runtime_error(format!("key not found: '{}'", key))),
        },
        (Value::Str(s), Value::Int(i)) => {
            let position = usize::try_from(*i).ok();
            match position.and_then(|p| s.chars().nth(p)) {
                Some(c) => Ok(Value::str(c.to_string())),
                None => Err(Thrown::runtime_error(format!(
                    "index {} out of bounds for string",
                    i
                ))),
            }
        }
        (other, index) => Err(Thrown::type_error(format!(
            "cannot index {} with {}",
            other.type_name(),
            index.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_int_addition_stays_int() {
        let result = eval_binary("+", Value::Int(40), Value::Int(2)).unwrap();
        assert_eq!(result, Value::Int(42));
    }

    #[test]
    fn test_binary_mixed_addition_promotes_to_float() {
        let result = eval_binary("+", Value::Int(1), Value::Float(0.5)).unwrap();
        assert_eq!(result, Value::Float(1.5));
    }

    #[test]
    fn test_string_concatenation_and_repetition() {
        let concat = eval_binary("+", Value::str("ab"), Value::str("cd")).unwrap();
        assert_eq!(concat, Value::str("abcd"));

        let repeated = eval_binary("*", Value::str("ab"), Value::Int(3)).unwrap();
        assert_eq!(repeated, Value::str("ababab"));
    }

    #[test]
    fn test_division_by_zero_is_a_runtime_error() {
        let err = eval_binary("/", Value::Int(1), Value::Int(0)).unwrap_err();
        let Signal::Throw(thrown) = err else { panic!("expected a throw") };
        assert_eq!(thrown.kind, crate::errors::ErrorKind::RuntimeError);
    }

    #[test]
    fn test_comparing_incompatible_types_is_a_type_error() {
        let err = eval_binary("<", Value::Int(1), Value::str("x")).unwrap_err();
        let Signal::Throw(thrown) = err else { panic!("expected a throw") };
        assert_eq!(thrown.kind, crate::errors::ErrorKind::TypeError);
    }

    #[test]
    fn test_index_out_of_bounds_is_catchable() {
        let list = Value::list(vec![Value::Int(1)]);
        let err = eval_index(&list, &Value::Int(5)).unwrap_err();
        assert!(matches!(err, Signal::Throw(_)));
    }
}

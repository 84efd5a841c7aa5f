// Integration tests for the Stel interpreter
//
// These tests run complete Stel programs and check both the program's
// final value and its printed output. Covered here:
// - Variable binding, assignment, and scoping
// - Closures and the shared-environment capture model
// - Functions: positional args, defaults, arity failures, recursion
// - Control flow (if/else, while, for, break/continue)
// - Tuples and destructuring assignment
// - Truthiness and short-circuit evaluation

use std::cell::RefCell;
use std::rc::Rc;

use stel::errors::{ErrorKind, StelError};
use stel::interpreter::{Interpreter, Value};
use stel::lexer::tokenize;
use stel::parser::Parser;

fn eval_source(code: &str) -> Result<Value, StelError> {
    let tokens = tokenize(code).expect("lexing should succeed");
    let stmts = Parser::new(tokens).parse().expect("parsing should succeed");
    Interpreter::new().run(&stmts)
}

fn eval_value(code: &str) -> Value {
    eval_source(code).expect("evaluation should succeed")
}

/// Run a program and capture everything it printed
fn run_capture(code: &str) -> (Result<Value, StelError>, String) {
    let tokens = tokenize(code).expect("lexing should succeed");
    let stmts = Parser::new(tokens).parse().expect("parsing should succeed");

    let buffer = Rc::new(RefCell::new(Vec::new()));
    let mut interp = Interpreter::new();
    interp.set_output(Rc::clone(&buffer));
    let result = interp.run(&stmts);

    let output = String::from_utf8_lossy(&buffer.borrow()).to_string();
    (result, output)
}

fn error_kind(code: &str) -> ErrorKind {
    eval_source(code).expect_err("evaluation should fail").kind
}

#[test]
fn test_integer_addition_yields_int() {
    assert_eq!(eval_value("40 + 2"), Value::Int(42));
    assert_eq!(eval_value("-3 + 1"), Value::Int(-2));
}

#[test]
fn test_mixed_arithmetic_promotes_to_float() {
    assert_eq!(eval_value("1 + 0.5"), Value::Float(1.5));
    assert_eq!(eval_value("2.0 * 3"), Value::Float(6.0));
}

#[test]
fn test_let_binding_and_print() {
    let (result, output) = run_capture("let a = 42\nprint(a)");
    assert!(result.is_ok());
    assert_eq!(output, "42\n");
}

#[test]
fn test_const_rejects_reassignment() {
    let err = eval_source("const b = \"hello\"\nb = \"x\"").unwrap_err();
    assert_eq!(err.kind, ErrorKind::NameError);
    assert!(err.message.contains("immutable"));
}

#[test]
fn test_closures_capture_the_defining_environment_by_reference() {
    let (result, output) = run_capture(
        r#"
        let x = 1
        fn f() { return x }
        x = 2
        print(f())
        "#,
    );
    assert!(result.is_ok());
    assert_eq!(output, "2\n");
}

#[test]
fn test_closure_counter_shares_state_across_calls() {
    let code = r#"
        fn make_counter() {
            let count = 0
            fn tick() {
                count = count + 1
                return count
            }
            return tick
        }
        let tick = make_counter()
        tick()
        tick()
        tick()
    "#;
    assert_eq!(eval_value(code), Value::Int(3));
}

#[test]
fn test_function_call_returns_value() {
    let code = r#"
        fn square(n) { return n * n }
        square(5)
    "#;
    assert_eq!(eval_value(code), Value::Int(25));
}

#[test]
fn test_function_without_return_yields_null() {
    let code = r#"
        fn noop() { let x = 1 }
        noop()
    "#;
    assert_eq!(eval_value(code), Value::Null);
}

#[test]
fn test_while_loop_prints_in_order() {
    let code = r#"
        count = 0
        while count < 3 {
            print(count)
            count = count + 1
        }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "0\n1\n2\n");
}

#[test]
fn test_for_loop_with_break_and_continue() {
    let code = r#"
        for i in range(10) {
            if i == 2 { continue }
            if i == 5 { break }
            print(i)
        }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "0\n1\n3\n4\n");
}

#[test]
fn test_for_iterates_strings_and_maps() {
    let code = r#"
        for c in "ab" { print(c) }
        let m = {"x": 1, "y": 2}
        for k in m { print(k) }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "a\nb\nx\ny\n");
}

#[test]
fn test_recursion_resolves_through_the_environment() {
    let code = r#"
        fn factorial(n) {
            if n <= 1 { return 1 }
            return n * factorial(n - 1)
        }
        factorial(5)
    "#;
    assert_eq!(eval_value(code), Value::Int(120));
}

#[test]
fn test_mutual_recursion() {
    let code = r#"
        fn is_even(n) {
            if n == 0 { return true }
            return is_odd(n - 1)
        }
        fn is_odd(n) {
            if n == 0 { return false }
            return is_even(n - 1)
        }
        is_even(10)
    "#;
    assert_eq!(eval_value(code), Value::Bool(true));
}

#[test]
fn test_runaway_recursion_raises_catchable_error() {
    let code = r#"
        fn loop_forever() { return loop_forever() }
        try {
            loop_forever()
        } catch err {
            print("depth guard hit")
        }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "depth guard hit\n");
}

#[test]
fn test_default_parameters_fill_missing_trailing_arguments() {
    let code = r#"
        fn greet(name, greeting = "hello") {
            return greeting + ", " + name
        }
        greet("world")
    "#;
    assert_eq!(eval_value(code), Value::str("hello, world"));
}

#[test]
fn test_default_expression_sees_earlier_parameters() {
    let code = r#"
        fn pad(text, width = len(text) + 2) { return width }
        pad("abc")
    "#;
    assert_eq!(eval_value(code), Value::Int(5));
}

#[test]
fn test_arity_mismatch_without_defaults_fails() {
    let code = r#"
        fn add(a, b) { return a + b }
        add(1)
    "#;
    assert_eq!(error_kind(code), ErrorKind::ArityError);

    let too_many = r#"
        fn add(a, b) { return a + b }
        add(1, 2, 3)
    "#;
    assert_eq!(error_kind(too_many), ErrorKind::ArityError);
}

#[test]
fn test_blocks_scope_let_but_assignment_reaches_outward() {
    let code = r#"
        let x = 1
        {
            let x = 10
            x = 20
        }
        x
    "#;
    assert_eq!(eval_value(code), Value::Int(1));

    let assigns_outer = r#"
        let x = 1
        {
            x = 20
        }
        x
    "#;
    assert_eq!(eval_value(assigns_outer), Value::Int(20));
}

#[test]
fn test_tuples_and_destructuring() {
    assert_eq!(
        eval_value("let pair = (1, 2)\npair[0] + pair[1]"),
        Value::Int(3)
    );

    let code = r#"
        (a, b) = (3, 4)
        a * b
    "#;
    assert_eq!(eval_value(code), Value::Int(12));

    let from_list = r#"
        (first, second) = [10, 20]
        first + second
    "#;
    assert_eq!(eval_value(from_list), Value::Int(30));
}

#[test]
fn test_destructuring_length_mismatch_fails() {
    assert_eq!(error_kind("(a, b) = (1, 2, 3)"), ErrorKind::TypeError);
    assert_eq!(error_kind("(a, b) = 5"), ErrorKind::TypeError);
}

#[test]
fn test_truthiness_in_conditions() {
    let code = r#"
        if 0 { print("int") }
        if 0.0 { print("float") }
        if "" { print("str") }
        if [] { print("list") }
        if {} { print("map") }
        if null { print("null") }
        if false { print("bool") }
        if 7 { print("yes") }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "yes\n");
}

#[test]
fn test_and_or_short_circuit_without_evaluating_the_untaken_side() {
    let code = r#"
        fn boom() {
            print("evaluated")
            return true
        }
        let a = false and boom()
        let b = true or boom()
        print(a)
        print(b)
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "false\ntrue\n");
}

#[test]
fn test_string_repetition_and_concatenation() {
    assert_eq!(eval_value(r#""ab" * 3"#), Value::str("ababab"));
    assert_eq!(eval_value(r#""foo" + "bar""#), Value::str("foobar"));
}

#[test]
fn test_comparisons_require_ordered_operands() {
    assert_eq!(eval_value("1 < 2"), Value::Bool(true));
    assert_eq!(eval_value(r#""a" < "b""#), Value::Bool(true));
    assert_eq!(eval_value("2.5 >= 2"), Value::Bool(true));
    assert_eq!(error_kind(r#"1 < "2""#), ErrorKind::TypeError);
}

#[test]
fn test_equality_is_structural_for_containers() {
    assert_eq!(eval_value("[1, [2, 3]] == [1, [2, 3]]"), Value::Bool(true));
    assert_eq!(eval_value("(1, 2) == (1, 2)"), Value::Bool(true));
    assert_eq!(
        eval_value(r#"{"a": 1, "b": 2} == {"b": 2, "a": 1}"#),
        Value::Bool(true)
    );
    assert_eq!(eval_value("[1] == [2]"), Value::Bool(false));
}

#[test]
fn test_function_values_are_not_comparable() {
    let code = r#"
        fn f() { return 1 }
        fn g() { return 1 }
        f == g
    "#;
    assert_eq!(error_kind(code), ErrorKind::TypeError);
}

#[test]
fn test_integer_division_truncates_and_checks_zero() {
    assert_eq!(eval_value("7 / 2"), Value::Int(3));
    assert_eq!(eval_value("7.0 / 2"), Value::Float(3.5));
    assert_eq!(eval_value("7 % 3"), Value::Int(1));
    assert_eq!(error_kind("1 / 0"), ErrorKind::RuntimeError);
    assert_eq!(error_kind("1 % 0"), ErrorKind::RuntimeError);
}

#[test]
fn test_undefined_variable_is_a_name_error_with_suggestion() {
    let code = r#"
        let counter = 1
        countr + 1
    "#;
    let err = eval_source(code).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NameError);
    assert!(err.message.contains("counter"), "message was: {}", err.message);
}

#[test]
fn test_user_bindings_shadow_builtins() {
    let code = r#"
        let sqrt = 10
        sqrt
    "#;
    assert_eq!(eval_value(code), Value::Int(10));

    // A fresh interpreter still has the native binding
    assert_eq!(eval_value("sqrt(9.0)"), Value::Float(3.0));
}

#[test]
fn test_pure_expressions_are_idempotent() {
    let code = "(1 + 2) * len(\"abc\")";
    assert_eq!(eval_value(code), eval_value(code));
}

#[test]
fn test_program_final_value_is_the_last_statement_value() {
    assert_eq!(eval_value("1\n2\n3"), Value::Int(3));
    assert_eq!(eval_value("let a = 9"), Value::Null);
}

#[test]
fn test_top_level_return_completes_the_program() {
    assert_eq!(eval_value("return 7\nprint(\"unreached\")"), Value::Int(7));
}

#[test]
fn test_break_outside_loop_is_an_error() {
    assert_eq!(error_kind("break"), ErrorKind::RuntimeError);
    assert_eq!(error_kind("continue"), ErrorKind::RuntimeError);
}

#[test]
fn test_string_and_list_indexing() {
    assert_eq!(eval_value(r#""abc"[1]"#), Value::str("b"));
    assert_eq!(eval_value("[10, 20, 30][2]"), Value::Int(30));
    assert_eq!(eval_value(r#"{"k": 5}["k"]"#), Value::Int(5));
    assert_eq!(error_kind("[1][9]"), ErrorKind::RuntimeError);
    assert_eq!(error_kind(r#"{"a": 1}["b"]"#), ErrorKind::RuntimeError);
}

#[test]
fn test_else_if_chains() {
    let code = r#"
        fn classify(n) {
            if n < 0 {
                return "negative"
            } else if n == 0 {
                return "zero"
            } else {
                return "positive"
            }
        }
        classify(0)
    "#;
    assert_eq!(eval_value(code), Value::str("zero"));
}

#[test]
fn test_interpreter_state_persists_across_runs() {
    let mut interp = Interpreter::new();

    let tokens = tokenize("let kept = 41").unwrap();
    let stmts = Parser::new(tokens).parse().unwrap();
    interp.run(&stmts).unwrap();

    let tokens = tokenize("kept + 1").unwrap();
    let stmts = Parser::new(tokens).parse().unwrap();
    assert_eq!(interp.run(&stmts).unwrap(), Value::Int(42));
    assert_eq!(interp.get_global("kept"), Some(Value::Int(41)));
}

// Integration tests for throw/try/catch and the runtime error taxonomy
//
// Runtime-category errors (NameError, TypeError, ArityError,
// NonExhaustiveMatchError, user throws) all travel the same throw channel
// and are catchable; uncaught they terminate the run with their kind and
// rendered payload.

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

#[test]
fn test_catch_binds_the_payload_and_execution_continues() {
    let code = r#"
        try {
            throw "fail!"
        } catch err {
            print("Caught error:", err)
        }
        print("after")
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "Caught error: fail!\nafter\n");
}

#[test]
fn test_uncaught_throw_terminates_with_the_payload() {
    let err = eval_source(r#"throw "boom""#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::RuntimeError);
    assert_eq!(err.message, "boom");
}

#[test]
fn test_throw_propagates_up_the_call_stack() {
    let code = r#"
        fn inner() { throw "from inner" }
        fn outer() { inner() }
        try {
            outer()
        } catch e {
            print(e)
        }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "from inner\n");
}

#[test]
fn test_uncaught_throw_reports_the_call_stack() {
    let code = r#"
        fn inner() { throw "deep" }
        fn outer() { inner() }
        outer()
    "#;
    let err = eval_source(code).unwrap_err();
    assert_eq!(err.call_stack, vec!["outer".to_string(), "inner".to_string()]);
}

#[test]
fn test_skipped_catch_when_try_body_completes() {
    let code = r#"
        try {
            print("ok")
        } catch e {
            print("never")
        }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "ok\n");
}

#[test]
fn test_throw_can_carry_structured_values() {
    let code = r#"
        try {
            throw {"code": 404, "reason": "not found"}
        } catch e {
            print(e["code"], e["reason"])
        }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "404 not found\n");
}

#[test]
fn test_engine_errors_are_catchable() {
    let code = r#"
        try {
            no_such_name
        } catch e {
            print("name:", e)
        }
        try {
            1 + "x"
        } catch e {
            print("type")
        }
        try {
            1 / 0
        } catch e {
            print("zero:", e)
        }
        try {
            [1][5]
        } catch e {
            print("bounds")
        }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("name: undefined variable"));
    assert_eq!(lines[1], "type");
    assert_eq!(lines[2], "zero: division by zero");
    assert_eq!(lines[3], "bounds");
}

#[test]
fn test_uncaught_engine_errors_keep_their_kind() {
    assert_eq!(eval_source("missing").unwrap_err().kind, ErrorKind::NameError);
    assert_eq!(eval_source(r#"1 + [1]"#).unwrap_err().kind, ErrorKind::TypeError);
    assert_eq!(eval_source("sqrt()").unwrap_err().kind, ErrorKind::ArityError);
}

#[test]
fn test_nested_try_rethrow_from_catch() {
    let code = r#"
        try {
            try {
                throw "inner"
            } catch e {
                throw e + " rethrown"
            }
        } catch outer {
            print(outer)
        }
    "#;
    let (result, output) = run_capture(code);
    assert!(result.is_ok());
    assert_eq!(output, "inner rethrown\n");
}

#[test]
fn test_catch_scope_is_fresh_and_does_not_leak() {
    let code = r#"
        try {
            throw "x"
        } catch leaked {
            print("caught")
        }
        leaked
    "#;
    let err = eval_source(code).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NameError);
}

#[test]
fn test_try_does_not_absorb_loop_signals() {
    let code = r#"
        found = ""
        for x in ["a", "b", "c"] {
            try {
                if x == "b" { break }
            } catch e {
                print("never")
            }
            found = found + x
        }
        found
    "#;
    assert_eq!(eval_source(code).unwrap(), Value::str("a"));
}

#[test]
fn test_try_does_not_absorb_return() {
    let code = r#"
        fn attempt() {
            try {
                return "early"
            } catch e {
                print("never")
            }
            return "late"
        }
        attempt()
    "#;
    assert_eq!(eval_source(code).unwrap(), Value::str("early"));
}

#[test]
fn test_catch_reraises_are_catchable_by_outer_functions() {
    let code = r#"
        fn risky(n) {
            if n == 0 {
                throw "zero input"
            }
            return 10 / n
        }
        fn safe(n) {
            try {
                return risky(n)
            } catch e {
                return -1
            }
        }
        (safe(2), safe(0))
    "#;
    assert_eq!(
        eval_source(code).unwrap(),
        Value::tuple(vec![Value::Int(5), Value::Int(-1)])
    );
}

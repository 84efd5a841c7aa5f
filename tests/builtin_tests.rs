// Integration tests for the built-in function library
//
// Exercises the registry surface through complete programs: math,
// strings (including interp), collections, higher-order functions, and
// type introspection. Also checks that built-ins validate arity and
// argument kinds, and that they are value-returning rather than
// mutating.

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

fn error_kind(code: &str) -> ErrorKind {
    eval_source(code).expect_err("evaluation should fail").kind
}

fn str_list(items: &[&str]) -> Value {
    Value::list(items.iter().map(|s| Value::str(s.to_string())).collect())
}

#[test]
fn test_math_builtins() {
    assert_eq!(eval_value("sqrt(16.0)"), Value::Float(4.0));
    assert_eq!(eval_value("abs(-3)"), Value::Int(3));
    assert_eq!(eval_value("abs(-3.5)"), Value::Float(3.5));
    assert_eq!(eval_value("pow(2, 10)"), Value::Int(1024));
    assert_eq!(eval_value("pow(2.0, 0.5)"), Value::Float(2f64.powf(0.5)));
    assert_eq!(eval_value("min(3, 7)"), Value::Int(3));
    assert_eq!(eval_value("max(3, 7.5)"), Value::Float(7.5));
    assert_eq!(eval_value("sum([1, 2, 3])"), Value::Int(6));
    assert_eq!(eval_value("sum([1, 2.5])"), Value::Float(3.5));
    assert_eq!(eval_value("floor(2.7)"), Value::Int(2));
    assert_eq!(eval_value("ceil(2.1)"), Value::Int(3));
    assert_eq!(eval_value("round(2.5)"), Value::Int(3));
}

#[test]
fn test_math_builtin_validation() {
    assert_eq!(error_kind("sqrt()"), ErrorKind::ArityError);
    assert_eq!(error_kind("sqrt(1, 2)"), ErrorKind::ArityError);
    assert_eq!(error_kind("sqrt(\"x\")"), ErrorKind::TypeError);
    assert_eq!(error_kind("sum([1, \"x\"])"), ErrorKind::TypeError);
}

#[test]
fn test_range_forms() {
    assert_eq!(
        eval_value("range(3)"),
        Value::list(vec![Value::Int(0), Value::Int(1), Value::Int(2)])
    );
    assert_eq!(eval_value("range(2, 5)"), Value::list(vec![Value::Int(2), Value::Int(3), Value::Int(4)]));
    assert_eq!(
        eval_value("range(5, 0, -2)"),
        Value::list(vec![Value::Int(5), Value::Int(3), Value::Int(1)])
    );
    assert_eq!(error_kind("range(0, 5, 0)"), ErrorKind::TypeError);
}

#[test]
fn test_len_over_all_container_kinds() {
    assert_eq!(eval_value("len(\"hello\")"), Value::Int(5));
    assert_eq!(eval_value("len([1, 2, 3])"), Value::Int(3));
    assert_eq!(eval_value("len((1, 2))"), Value::Int(2));
    assert_eq!(eval_value("len({\"a\": 1})"), Value::Int(1));
    assert_eq!(error_kind("len(5)"), ErrorKind::TypeError);
}

#[test]
fn test_sort_returns_a_new_list_without_mutating_the_binding() {
    let code = r#"
        let xs = [3, 1, 2]
        let ys = sort(xs)
        (xs, ys)
    "#;
    let Value::Tuple(items) = eval_value(code) else { panic!("expected a tuple") };
    assert_eq!(items[0], Value::list(vec![Value::Int(3), Value::Int(1), Value::Int(2)]));
    assert_eq!(items[1], Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
}

#[test]
fn test_sort_strings_and_rejects_mixed_lists() {
    assert_eq!(eval_value(r#"sort(["b", "a"])"#), str_list(&["a", "b"]));
    assert_eq!(error_kind(r#"sort([1, "a"])"#), ErrorKind::TypeError);
}

#[test]
fn test_reverse_list_and_string() {
    assert_eq!(
        eval_value("reverse([1, 2, 3])"),
        Value::list(vec![Value::Int(3), Value::Int(2), Value::Int(1)])
    );
    assert_eq!(eval_value(r#"reverse("abc")"#), Value::str("cba"));
}

#[test]
fn test_join_split_round_trip() {
    assert_eq!(
        eval_value(r#"split(join(["a", "b", "c"], "-"), "-")"#),
        str_list(&["a", "b", "c"])
    );
    assert_eq!(eval_value(r#"join([], "-")"#), Value::str(""));
    assert_eq!(eval_value(r#"split("a,,b", ",")"#), str_list(&["a", "", "b"]));
}

#[test]
fn test_zip_enumerate_flatten_unique() {
    assert_eq!(
        eval_value(r#"zip([1, 2], ["a", "b", "c"])"#),
        Value::list(vec![
            Value::tuple(vec![Value::Int(1), Value::str("a")]),
            Value::tuple(vec![Value::Int(2), Value::str("b")]),
        ])
    );
    assert_eq!(
        eval_value(r#"enumerate(["x", "y"])"#),
        Value::list(vec![
            Value::tuple(vec![Value::Int(0), Value::str("x")]),
            Value::tuple(vec![Value::Int(1), Value::str("y")]),
        ])
    );
    assert_eq!(
        eval_value("flatten([[1, 2], [3], 4])"),
        Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)])
    );
    assert_eq!(
        eval_value("unique([1, 2, 1, 3, 2])"),
        Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn test_count_and_repeat() {
    assert_eq!(eval_value("count([1, 2, 1, 1], 1)"), Value::Int(3));
    assert_eq!(eval_value(r#"count("aaaaa", "aa")"#), Value::Int(2));
    assert_eq!(eval_value(r#"repeat("ab", 3)"#), Value::str("ababab"));
    assert_eq!(
        eval_value("repeat(0, 3)"),
        Value::list(vec![Value::Int(0), Value::Int(0), Value::Int(0)])
    );
    assert_eq!(error_kind("repeat(0, -1)"), ErrorKind::TypeError);
}

#[test]
fn test_string_builtins() {
    assert_eq!(eval_value(r#"upper("hello")"#), Value::str("HELLO"));
    assert_eq!(eval_value(r#"lower("HELLO")"#), Value::str("hello"));
    assert_eq!(eval_value(r#"trim("  pad  ")"#), Value::str("pad"));
    assert_eq!(eval_value(r#"contains("hello world", "world")"#), Value::Bool(true));
    assert_eq!(eval_value(r#"starts_with("hello", "he")"#), Value::Bool(true));
    assert_eq!(eval_value(r#"ends_with("hello", "lo")"#), Value::Bool(true));
    assert_eq!(eval_value(r#"replace("a-b-c", "-", "_")"#), Value::str("a_b_c"));
    assert_eq!(eval_value(r#"index_of("hello", "ll")"#), Value::Int(2));
    assert_eq!(eval_value(r#"index_of("hello", "zz")"#), Value::Int(-1));
}

#[test]
fn test_interp_substitutes_placeholders_from_a_map() {
    let code = r#"interp("Hello {name}, you are {age}", {"name": "Ada", "age": 36})"#;
    assert_eq!(eval_value(code), Value::str("Hello Ada, you are 36"));

    assert_eq!(
        error_kind(r#"interp("{missing}", {})"#),
        ErrorKind::TypeError
    );
    assert_eq!(error_kind(r#"interp("{unclosed", {})"#), ErrorKind::TypeError);
}

#[test]
fn test_map_builtin_applies_a_closure_per_element() {
    let code = r#"
        fn double(n) { return n * 2 }
        map([1, 2, 3], double)
    "#;
    assert_eq!(
        eval_value(code),
        Value::list(vec![Value::Int(2), Value::Int(4), Value::Int(6)])
    );
}

#[test]
fn test_filter_find_reduce() {
    let code = r#"
        fn is_big(n) { return n > 2 }
        filter([1, 2, 3, 4], is_big)
    "#;
    assert_eq!(eval_value(code), Value::list(vec![Value::Int(3), Value::Int(4)]));

    let find_code = r#"
        fn is_big(n) { return n > 2 }
        find([1, 2, 3, 4], is_big)
    "#;
    assert_eq!(eval_value(find_code), Value::Int(3));

    let find_none = r#"
        fn is_big(n) { return n > 9 }
        find([1, 2], is_big)
    "#;
    assert_eq!(eval_value(find_none), Value::Null);

    let reduce_code = r#"
        fn add(a, b) { return a + b }
        reduce([1, 2, 3, 4], add)
    "#;
    assert_eq!(eval_value(reduce_code), Value::Int(10));

    let reduce_seeded = r#"
        fn add(a, b) { return a + b }
        reduce([1, 2, 3], add, 100)
    "#;
    assert_eq!(eval_value(reduce_seeded), Value::Int(106));

    let reduce_empty = r#"
        fn add(a, b) { return a + b }
        reduce([], add)
    "#;
    assert_eq!(error_kind(reduce_empty), ErrorKind::TypeError);
}

#[test]
fn test_all_and_any_with_and_without_predicates() {
    assert_eq!(eval_value("all([1, 2, 3])"), Value::Bool(true));
    assert_eq!(eval_value("all([1, 0, 3])"), Value::Bool(false));
    assert_eq!(eval_value("any([0, 0, 2])"), Value::Bool(true));
    assert_eq!(eval_value("any([])"), Value::Bool(false));

    let code = r#"
        fn positive(n) { return n > 0 }
        (all([1, 2], positive), any([-1, 2], positive))
    "#;
    assert_eq!(
        eval_value(code),
        Value::tuple(vec![Value::Bool(true), Value::Bool(true)])
    );
}

#[test]
fn test_higher_order_propagates_callee_throws() {
    let code = r#"
        fn explode(n) { throw "bad element" }
        map([1], explode)
    "#;
    let err = eval_source(code).unwrap_err();
    assert_eq!(err.kind, ErrorKind::RuntimeError);
    assert_eq!(err.message, "bad element");
}

#[test]
fn test_higher_order_accepts_native_functions() {
    assert_eq!(
        eval_value("map([1.0, 4.0, 9.0], sqrt)"),
        Value::list(vec![Value::Float(1.0), Value::Float(2.0), Value::Float(3.0)])
    );
}

#[test]
fn test_map_keys_and_values_preserve_insertion_order() {
    let code = r#"
        let m = {"b": 2, "a": 1}
        (map_keys(m), map_values(m))
    "#;
    let Value::Tuple(items) = eval_value(code) else { panic!("expected a tuple") };
    assert_eq!(items[0], str_list(&["b", "a"]));
    assert_eq!(items[1], Value::list(vec![Value::Int(2), Value::Int(1)]));
}

#[test]
fn test_array_contains_and_index_of() {
    assert_eq!(eval_value("array_contains([1, 2], 2)"), Value::Bool(true));
    assert_eq!(eval_value("array_contains([1, 2], 9)"), Value::Bool(false));
    assert_eq!(eval_value(r#"array_index_of(["a", "b"], "b")"#), Value::Int(1));
    assert_eq!(eval_value("array_index_of([1], 9)"), Value::Int(-1));
}

#[test]
fn test_type_introspection_and_conversions() {
    assert_eq!(eval_value("type_of(1)"), Value::str("int"));
    assert_eq!(eval_value("type_of(1.5)"), Value::str("float"));
    assert_eq!(eval_value("type_of(\"s\")"), Value::str("string"));
    assert_eq!(eval_value("type_of([])"), Value::str("list"));
    assert_eq!(eval_value("type_of(null)"), Value::str("null"));
    assert_eq!(eval_value("type_of(print)"), Value::str("function"));

    assert_eq!(eval_value("to_string(42)"), Value::str("42"));
    assert_eq!(eval_value("to_int(\" 12 \")"), Value::Int(12));
    assert_eq!(eval_value("to_int(3.9)"), Value::Int(3));
    assert_eq!(eval_value("to_float(\"2.5\")"), Value::Float(2.5));
    assert_eq!(error_kind("to_int(\"abc\")"), ErrorKind::TypeError);
}

#[test]
fn test_print_joins_arguments_with_spaces() {
    let tokens = tokenize(r#"print("a", 1, [2])"#).unwrap();
    let stmts = Parser::new(tokens).parse().unwrap();

    let buffer = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let mut interp = Interpreter::new();
    interp.set_output(std::rc::Rc::clone(&buffer));
    interp.run(&stmts).unwrap();

    assert_eq!(String::from_utf8_lossy(&buffer.borrow()), "a 1 [2]\n");
}

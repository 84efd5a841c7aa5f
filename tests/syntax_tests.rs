// Integration tests for static (pre-evaluation) failures
//
// Lex and parse errors are fatal: they carry the offending character or
// token with its source position, and no partial result is produced.

use stel::errors::ErrorKind;
use stel::lexer::{tokenize, TokenKind};
use stel::parser::Parser;

#[test]
fn test_unterminated_string_reports_a_lex_error() {
    let err = tokenize("let s = \"oops").unwrap_err();
    assert_eq!(err.kind, ErrorKind::LexError);
    assert!(err.message.contains("unterminated"));
}

#[test]
fn test_unknown_character_reports_its_position() {
    let err = tokenize("let a = 1\nlet b = @2").unwrap_err();
    assert_eq!(err.kind, ErrorKind::LexError);
    assert_eq!(err.location.line, 2);
    assert_eq!(err.location.column, 9);
}

#[test]
fn test_unknown_escape_sequence_is_rejected() {
    let err = tokenize(r#""bad \q escape""#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::LexError);
    assert!(err.message.contains("\\q"));
}

#[test]
fn test_token_stream_ends_with_eof() {
    let tokens = tokenize("1 + 2").unwrap();
    assert!(matches!(tokens.last().unwrap().kind, TokenKind::Eof));
    assert_eq!(tokens.len(), 4);
}

#[test]
fn test_numeric_literals_lex_to_int_and_float() {
    let tokens = tokenize("7 7.5").unwrap();
    assert!(matches!(tokens[0].kind, TokenKind::Int(7)));
    assert!(matches!(tokens[1].kind, TokenKind::Float(f) if f == 7.5));
}

#[test]
fn test_range_after_integer_does_not_consume_the_dot() {
    let tokens = tokenize("2..9").unwrap();
    assert!(matches!(tokens[0].kind, TokenKind::Int(2)));
    assert!(matches!(&tokens[1].kind, TokenKind::Operator(op) if op == ".."));
    assert!(matches!(tokens[2].kind, TokenKind::Int(9)));
}

fn parse_error(code: &str) -> stel::errors::StelError {
    let tokens = tokenize(code).expect("lexing should succeed");
    Parser::new(tokens).parse().expect_err("parsing should fail")
}

#[test]
fn test_unexpected_token_aborts_with_a_parse_error() {
    let err = parse_error("let = 5");
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert!(err.location.line >= 1);
}

#[test]
fn test_missing_closing_brace_is_reported() {
    let err = parse_error("fn f() { return 1");
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert!(err.message.contains("'}'"), "message was: {}", err.message);
}

#[test]
fn test_parse_error_names_the_unexpected_token() {
    let err = parse_error("if { }");
    assert_eq!(err.kind, ErrorKind::ParseError);

    let err = parse_error("1 + ");
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert!(err.message.contains("end of input"), "message was: {}", err.message);
}

#[test]
fn test_import_requires_a_string_path() {
    let err = parse_error("import math");
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert!(err.message.contains("path"), "message was: {}", err.message);
}

#[test]
fn test_invalid_assignment_targets_are_rejected() {
    let err = parse_error("1 = 2");
    assert_eq!(err.kind, ErrorKind::ParseError);

    let err = parse_error("(a, 1) = (1, 2)");
    assert_eq!(err.kind, ErrorKind::ParseError);
}

#[test]
fn test_match_requires_patterns_not_arbitrary_expressions() {
    let err = parse_error("match 1 { x => 1 }");
    assert_eq!(err.kind, ErrorKind::ParseError);
}

#[test]
fn test_field_access_needs_a_field_name() {
    let err = parse_error("p. ");
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert!(err.message.contains("field name"), "message was: {}", err.message);
}

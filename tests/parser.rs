//! Scanner behaviour and error localization.

mod common;

use common::expect_syntax;
use envfile_rs::{EnvValue, Error, ParseOptions, Span, SyntaxErrorKind, parse_str, parse_str_with};

// -----------------------------------------------------------
// Assignments.
// -----------------------------------------------------------

#[test]
fn counts_unique_keys() {
    let envs = parse_str("A=1\nB=2\nC=3\n").unwrap();
    assert_eq!(envs.len(), 3);
}

#[test]
fn duplicate_keys_collapse_to_last() {
    let envs = parse_str("A=1\nB=2\nA=last\n").unwrap();
    assert_eq!(envs.len(), 2);
    assert_eq!(envs.get("A"), Some(&EnvValue::from("last")));
    assert_eq!(envs.keys().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn no_trailing_newline() {
    let envs = parse_str("A=1\nB=end").unwrap();
    assert_eq!(envs.get("B"), Some(&EnvValue::from("end")));
}

#[test]
fn empty_input() {
    assert!(parse_str("").unwrap().is_empty());
    assert!(parse_str("\n\n# only comments\n").unwrap().is_empty());
}

#[test]
fn leading_spaces_before_name() {
    let envs = parse_str("   INDENTED=yes\n").unwrap();
    assert_eq!(envs.get("INDENTED"), Some(&EnvValue::Bool(true)));
}

#[test]
fn value_may_contain_equals() {
    let envs = parse_str("URL=postgres://u:p@h/db?x=1\n").unwrap();
    assert_eq!(
        envs.get("URL"),
        Some(&EnvValue::from("postgres://u:p@h/db?x=1"))
    );
}

// -----------------------------------------------------------
// Comments.
// -----------------------------------------------------------

#[test]
fn trailing_comment_after_unquoted_value() {
    let envs = parse_str("FOO=bar # trailing comment\n").unwrap();
    assert_eq!(envs.get("FOO"), Some(&EnvValue::from("bar")));
}

#[test]
fn trailing_comment_after_quoted_value() {
    let envs = parse_str("FOO=\"a # not a comment\" # comment\n").unwrap();
    assert_eq!(envs.get("FOO"), Some(&EnvValue::from("a # not a comment")));
}

#[test]
fn comment_without_final_newline() {
    let envs = parse_str("A=1\n# last line").unwrap();
    assert_eq!(envs.len(), 1);
}

// -----------------------------------------------------------
// Quoted values.
// -----------------------------------------------------------

#[test]
fn multi_line_value_is_preserved() {
    let envs = parse_str("M=\"a\nb\n\"\n").unwrap();
    assert_eq!(envs.get("M"), Some(&EnvValue::from("a\nb\n")));
}

#[test]
fn multi_line_value_keeps_carriage_returns() {
    let envs = parse_str("M=\"a\r\nb\"\r\n").unwrap();
    assert_eq!(envs.get("M"), Some(&EnvValue::from("a\r\nb")));
}

#[test]
fn line_numbers_continue_after_multi_line_value() {
    let err = expect_syntax("M=\"one\ntwo\nthree\"\nBAD NAME=1\n");
    assert_eq!(err.kind, SyntaxErrorKind::SpaceInName);
    assert_eq!(err.span.line, 4);
}

// -----------------------------------------------------------
// Interpolation.
// -----------------------------------------------------------

#[test]
fn interpolation_of_earlier_key() {
    let envs = parse_str("B=\"x\"\nA=\"${B}\"\n").unwrap();
    assert_eq!(envs.get("A"), Some(&EnvValue::from("x")));
}

#[test]
fn interpolation_in_raw_mode() {
    let envs = parse_str_with("B=\"x\"\nA=\"${B}\"\n", &ParseOptions::new().raw(true)).unwrap();
    assert_eq!(envs.get("A"), Some(&EnvValue::from("${B}")));
}

#[test]
fn interpolation_of_typed_values() {
    let envs = parse_str("N=null\nT=yes\nI=007\nF=1.50\nA=\"${N}|${T}|${I}|${F}\"\n").unwrap();
    assert_eq!(envs.get("A"), Some(&EnvValue::from("|true|7|1.5")));
}

#[test]
fn interpolation_is_not_transitive() {
    let envs = parse_str("A=1\nB=${A}\nC=\"${B}\"\n").unwrap();
    assert_eq!(envs.get("B"), Some(&EnvValue::from("${A}")));
    assert_eq!(envs.get("C"), Some(&EnvValue::from("${A}")));
}

#[test]
fn forward_reference_fails() {
    let err = parse_str("A=\"${B}\"\nB=x\n").unwrap_err();
    assert!(matches!(err, Error::Interpolation(ref e) if e.name == "B"));
}

#[test]
fn undefined_interpolation_names_key() {
    let err = parse_str("A=\"${UNDEFINED}\"\n").unwrap_err();
    let Error::Interpolation(e) = err else {
        panic!("expected interpolation error");
    };
    assert_eq!(e.name, "UNDEFINED");
    assert!(e.to_string().contains("UNDEFINED"));
}

// -----------------------------------------------------------
// Syntax errors.
// -----------------------------------------------------------

#[test]
fn space_inside_name() {
    let err = expect_syntax("FIRST=1\nSECOND=2\nFOO BAR=1\n");
    assert_eq!(err.kind, SyntaxErrorKind::SpaceInName);
    assert_eq!(err.span, Span::new(3, 4));
}

#[test]
fn spaces_before_equals_are_allowed() {
    let envs = parse_str("FOO   =1\n").unwrap();
    assert_eq!(envs.get("FOO"), Some(&EnvValue::Int(1)));
}

#[test]
fn line_break_in_name() {
    let err = expect_syntax("FOO\r\n");
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEndOfLine);
    assert_eq!(err.span, Span::new(1, 3));
}

#[test]
fn comment_in_name() {
    let err = expect_syntax("A=1\nFO#O=1\n");
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEndOfLine);
    assert_eq!(err.span, Span::new(2, 2));
}

#[test]
fn name_at_end_of_input() {
    let err = expect_syntax("A=1\nDANGLING");
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEndOfLine);
    assert_eq!(err.span, Span::new(2, 8));
}

#[test]
fn unterminated_quote() {
    let err = expect_syntax("A=\"open\nstill open\n");
    assert_eq!(err.kind, SyntaxErrorKind::UnterminatedQuote);
    assert_eq!(err.span, Span::new(1, 2));
}

#[test]
fn unterminated_interpolation_at_end_of_input() {
    let err = expect_syntax("B=1\nA=\"${B");
    assert_eq!(err.kind, SyntaxErrorKind::UnterminatedInterpolation);
    assert_eq!(err.span, Span::new(2, 3));
}

#[test]
fn garbage_after_value() {
    let err = expect_syntax("A=\"x\"y\n");
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedCharacter('y'));
}

#[test]
fn error_display_includes_location() {
    let err = parse_str("FOO BAR=1\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("spaces not allowed in variable name"));
    assert!(msg.contains("line 1"));
    assert!(msg.contains("column 4"));
}

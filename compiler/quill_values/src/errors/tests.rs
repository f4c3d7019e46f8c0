use super::*;
use pretty_assertions::assert_eq;

#[test]
fn constructors_set_kind() {
    assert_eq!(EvalError::operation("x").kind, ErrorKind::Operation);
    assert_eq!(EvalError::syntax("x").kind, ErrorKind::Syntax);
    assert_eq!(EvalError::property("x").kind, ErrorKind::Property);
    assert_eq!(EvalError::unimplemented("x").kind, ErrorKind::Unimplemented);
    assert_eq!(EvalError::datatype("x").kind, ErrorKind::Datatype);
}

#[test]
fn with_source_keeps_innermost() {
    let err = EvalError::operation("bad")
        .with_source("inner")
        .with_source("outer");
    assert_eq!(err.source.as_deref(), Some("inner"));
}

#[test]
fn contains_error_finds_nested_error() {
    let inner = EvalError::property("missing");
    let nested = Value::array(vec![
        Value::Number(1.0),
        Value::array(vec![Value::error(inner.clone())]),
    ]);
    assert_eq!(contains_error(&[&Value::Number(2.0), &nested]), Err(inner));
}

#[test]
fn contains_error_returns_first_error() {
    let first = Value::error(EvalError::syntax("first"));
    let second = Value::error(EvalError::syntax("second"));
    let found = contains_error(&[&first, &second]).unwrap_err();
    assert_eq!(found.message, "first");
}

#[test]
fn contains_error_passes_clean_values() {
    let map = Value::datamap_from_pairs([("a".to_string(), Value::string("b"))]);
    assert!(contains_error(&[&map, &Value::Bool(true)]).is_ok());
}

#[test]
fn type_mismatch_hints_at_conversion() {
    let err = type_mismatch(&Value::Number(1.0), &Value::string("a"));
    assert_eq!(
        err.message,
        "The number 1 isn't the same type of data as the string \"a\"."
    );
    assert!(err.explanation.is_some());

    let err = type_mismatch(&Value::Bool(true), &Value::string("a"));
    assert!(err.explanation.is_none());
}

#[test]
fn only_primitives_names_offender() {
    let err = only_primitives(PrimitiveKind::Boolean, "use 'and' to join", &Value::Number(1.0));
    assert_eq!(
        err.message,
        "I can only use 'and' to join booleans, not the number 1."
    );
}

#[test]
fn diagnostic_carries_everything() {
    let err = EvalError::operation("bad")
        .with_explanation("hint")
        .with_detail("ctx")
        .with_source("1 + \"a\"");
    let diag = err.to_diagnostic();
    assert_eq!(diag.kind, ErrorKind::Operation);
    assert_eq!(diag.hint.as_deref(), Some("hint"));
    assert_eq!(diag.detail.as_deref(), Some("ctx"));
    assert_eq!(diag.source.as_deref(), Some("1 + \"a\""));
}

#[test]
fn capitalize_handles_empty() {
    assert_eq!(capitalize(""), "");
    assert_eq!(capitalize("an array"), "An array");
}

use super::*;
use crate::destructure::Target;
use crate::summary_handler::buffer_handler;
use pretty_assertions::assert_eq;
use quill_values::{ErrorKind, Storage, VarScope};

fn to(dest: impl Into<Target>, src: impl Into<quill_values::Operand>) -> AssignmentRequest {
    AssignmentRequest::create(dest, src, AssignOperator::To).unwrap()
}

fn into(src: impl Into<quill_values::Operand>, dest: impl Into<Target>) -> AssignmentRequest {
    AssignmentRequest::create(dest, src, AssignOperator::Into).unwrap()
}

#[test]
fn set_and_get() {
    let mut eval = Evaluator::new();
    eval.set(&[to(VarRef::story("x"), Value::Number(1.0))]).unwrap();
    assert_eq!(eval.get(&VarRef::story("x")).unwrap(), Value::Number(1.0));
}

#[test]
fn later_requests_see_earlier_ones() {
    let mut eval = Evaluator::new();
    eval.set(&[
        to(VarRef::story("a"), Value::Number(1.0)),
        to(VarRef::story("b"), VarRef::story("a")),
    ])
    .unwrap();
    assert_eq!(eval.get(&VarRef::story("b")).unwrap(), Value::Number(1.0));
}

#[test]
fn wrong_operator_word_is_a_syntax_error() {
    let mut eval = Evaluator::new();
    let err = eval
        .set(&[into(Value::Number(1.0), VarRef::story("x"))])
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(
        err.message,
        "Please say 'to' rather than 'into' when using the (set:) macro."
    );
    assert_eq!(err.source.as_deref(), Some("1 into $x"));

    let err = eval.put(&[to(VarRef::story("x"), Value::Number(1.0))]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(eval.store().lookup(VarScope::Story, "x"), None);
}

#[test]
fn put_stores_and_move_removes() {
    let mut eval = Evaluator::new();
    eval.put(&[into(Value::string("key"), VarRef::story("a"))])
        .unwrap();
    eval.move_into(&[into(VarRef::story("a"), VarRef::story("b"))])
        .unwrap();
    assert_eq!(eval.get(&VarRef::story("b")).unwrap(), Value::string("key"));
    assert_eq!(eval.store().lookup(VarScope::Story, "a"), None);
    // Unset story variables read as 0.
    assert_eq!(eval.get(&VarRef::story("a")).unwrap(), Value::Number(0.0));
}

#[test]
fn debug_mode_reports_summaries() {
    let handler = buffer_handler();
    let mut eval = Evaluator::builder()
        .debug_mode(true)
        .summary_handler(handler.clone())
        .build();
    eval.set(&[
        to(VarRef::story("x"), Value::Number(1.0)),
        to(VarRef::temp("t"), Value::string("a")),
    ])
    .unwrap();
    assert_eq!(handler.lines(), vec!["$x is now 1", "_t is now \"a\""]);
}

#[test]
fn summaries_are_quiet_without_debug_mode() {
    let handler = buffer_handler();
    let mut eval = Evaluator::builder().summary_handler(handler.clone()).build();
    eval.set(&[to(VarRef::story("x"), Value::Number(1.0))]).unwrap();
    assert!(handler.lines().is_empty());
}

#[test]
fn builder_uses_given_store() {
    let mut store = VariableStore::new();
    store.assign(VarScope::Story, "gold", Value::Number(5.0));
    let eval = Evaluator::builder().store(store).build();
    assert_eq!(eval.get(&VarRef::story("gold")).unwrap(), Value::Number(5.0));
    assert!(!eval.debug_mode());
}

#[test]
fn temp_scopes() {
    let mut eval = Evaluator::new();
    eval.push_scope();
    eval.set(&[to(VarRef::temp("t"), Value::Bool(true))]).unwrap();
    assert_eq!(eval.get(&VarRef::temp("t")).unwrap(), Value::Bool(true));
    eval.pop_scope();
    assert_eq!(
        eval.get(&VarRef::temp("t")).unwrap_err().kind,
        ErrorKind::Property
    );
}

#[test]
fn binary_delegates_to_the_operator_table() {
    let eval = Evaluator::new();
    assert_eq!(
        eval.binary(&Value::Number(2.0), BinaryOp::Mul, &Value::Number(3.0))
            .unwrap(),
        Value::Number(6.0)
    );
}

//! End-to-end scenarios driving the evaluator the way story markup would.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use quill_eval::{
    buffer_handler, destructure, determine, make_spreader, typify, AssignOperator,
    AssignmentRequest, BinaryOp, Evaluator, Target,
};
use quill_values::{
    Datatype, DatatypeName, Determiner, ErrorKind, Operand, Storage, Value, VarRef, VarScope,
};

fn nums(ns: &[f64]) -> Value {
    Value::array(ns.iter().copied().map(Value::Number).collect())
}

fn num_type() -> Value {
    Value::Datatype(Datatype::single(DatatypeName::Num))
}

fn set(dest: impl Into<Target>, src: impl Into<Operand>) -> AssignmentRequest {
    AssignmentRequest::create(dest, src, AssignOperator::To).unwrap()
}

#[test]
fn destructure_yields_bindings_left_to_right() {
    let eval = Evaluator::new();
    let target = Target::Array(vec![VarRef::story("x").into(), VarRef::story("y").into()]);
    let bindings = destructure(&target, &nums(&[10.0, 20.0]).into(), true, eval.store())
        .unwrap()
        .unwrap();
    let names: Vec<String> = bindings.iter().map(|b| b.dest.var_ref().to_string()).collect();
    assert_eq!(names, vec!["$x", "$y"]);
    assert_eq!(bindings[0].value, Value::Number(10.0));
    assert_eq!(bindings[1].value, Value::Number(20.0));
}

#[test]
fn move_out_of_an_array_leaves_nothing_behind() {
    let mut eval = Evaluator::new();
    eval.set(&[set(VarRef::story("a"), nums(&[1.0, 2.0, 3.0]))])
        .unwrap();
    let request = AssignmentRequest::create(
        Target::Array(vec![
            VarRef::story("x").into(),
            VarRef::story("y").into(),
            VarRef::story("z").into(),
        ]),
        VarRef::story("a"),
        AssignOperator::Into,
    )
    .unwrap();
    eval.move_into(&[request]).unwrap();

    assert_eq!(eval.get(&VarRef::story("x")).unwrap(), Value::Number(1.0));
    assert_eq!(eval.get(&VarRef::story("y")).unwrap(), Value::Number(2.0));
    assert_eq!(eval.get(&VarRef::story("z")).unwrap(), Value::Number(3.0));
    assert_eq!(eval.get(&VarRef::story("a")).unwrap(), nums(&[]));
}

#[test]
fn single_and_rest_typed_variables() {
    let mut eval = Evaluator::new();
    let x = typify(num_type(), VarRef::temp("x").into()).unwrap();
    let y = make_spreader(&typify(num_type(), VarRef::temp("y").into()).unwrap()).unwrap();
    let pattern = Value::array(vec![x, y]);
    eval.set(&[set(pattern, nums(&[1.0, 2.0, 3.0, 4.0]))]).unwrap();

    assert_eq!(eval.get(&VarRef::temp("x")).unwrap(), Value::Number(1.0));
    assert_eq!(eval.get(&VarRef::temp("y")).unwrap(), nums(&[2.0, 3.0, 4.0]));
    // Both variables keep their types.
    let err = eval
        .set(&[set(VarRef::temp("y"), Value::string("no"))])
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Operation);
}

#[test]
fn constrained_variable_rejects_other_data() {
    let mut eval = Evaluator::new();
    let typed = typify(num_type(), VarRef::story("x").into()).unwrap();
    eval.set(&[set(typed.clone(), Value::Number(3.0))]).unwrap();

    let err = eval
        .set(&[set(typed, Value::string("oops"))])
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Operation);
    assert_eq!(eval.get(&VarRef::story("x")).unwrap(), Value::Number(3.0));

    let err = eval
        .set(&[set(VarRef::story("x"), Value::string("oops"))])
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Operation);
    assert_eq!(
        err.message,
        "I can't set $x to the string \"oops\" because $x is restricted to num-type data."
    );
    assert_eq!(eval.get(&VarRef::story("x")).unwrap(), Value::Number(3.0));
}

#[test]
fn const_variables_are_set_once() {
    let mut eval = Evaluator::new();
    let constant = Value::Datatype(Datatype::single(DatatypeName::Const));
    let typed = typify(constant, VarRef::story("name").into()).unwrap();
    eval.set(&[set(typed, Value::string("Ada"))]).unwrap();
    let err = eval
        .set(&[set(VarRef::story("name"), Value::string("Bo"))])
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Operation);
    assert_eq!(eval.get(&VarRef::story("name")).unwrap(), Value::string("Ada"));
}

#[test]
fn operators_never_coerce() {
    let eval = Evaluator::new();
    assert!(eval
        .binary(&Value::Number(1.0), BinaryOp::And, &Value::Bool(true))
        .is_err());
    assert!(eval
        .binary(&Value::Number(1.0), BinaryOp::Add, &Value::string("a"))
        .is_err());
    for op in [BinaryOp::Div, BinaryOp::Mod] {
        let err = eval
            .binary(&Value::Number(5.0), op, &Value::Number(0.0))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Operation);
    }
}

#[test]
fn start_of_a_string() {
    let eval = Evaluator::new();
    let start = determine(Determiner::Start, &Value::string("abc")).unwrap();
    let is = |text: &str| eval.binary(&start, BinaryOp::Is, &Value::string(text)).unwrap();
    assert_eq!(is("a"), Value::Bool(true));
    assert_eq!(is("ab"), Value::Bool(true));
    assert_eq!(is("z"), Value::Bool(false));
    assert_eq!(
        eval.binary(&start, BinaryOp::IsNot, &Value::string("z"))
            .unwrap(),
        Value::Bool(true)
    );
    // A genuine failure mid-iteration is not inverted away.
    let err = eval
        .binary(&start, BinaryOp::IsNotA, &Value::Number(3.0))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Operation);
}

#[test]
fn debug_summaries_follow_pattern_order() {
    let handler = buffer_handler();
    let mut eval = Evaluator::builder()
        .debug_mode(true)
        .summary_handler(handler.clone())
        .build();
    let target = Target::Array(vec![VarRef::story("x").into(), VarRef::story("y").into()]);
    eval.set(&[set(target, nums(&[10.0, 20.0]))]).unwrap();
    assert_eq!(handler.lines(), vec!["$x is now 10; $y is now 20"]);
    assert_eq!(eval.store().lookup(VarScope::Story, "y"), Some(Value::Number(20.0)));
}

#[test]
fn errors_render_as_diagnostics() {
    let eval = Evaluator::new();
    let err = eval
        .binary(&Value::Number(5.0), BinaryOp::Div, &Value::Number(0.0))
        .unwrap_err()
        .with_source("5 / 0");
    let rendered = err.to_diagnostic().render();
    assert!(rendered.contains("I can't divide the number 5 by zero."), "{rendered}");
    assert!(rendered.contains("5 / 0"), "{rendered}");
}

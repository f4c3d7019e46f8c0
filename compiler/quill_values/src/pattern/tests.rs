use super::*;
use crate::datatype::{Datatype, DatatypeName};
use crate::reference::{Operand, VarRef};
use crate::string_pattern::StringPattern;
use pretty_assertions::assert_eq;

fn dt(name: DatatypeName) -> Value {
    Value::Datatype(Datatype::single(name))
}

fn rest(name: DatatypeName) -> Value {
    Value::Datatype(Datatype::spread(name))
}

fn nums(ns: &[f64]) -> Value {
    Value::array(ns.iter().copied().map(Value::Number).collect())
}

fn map(pairs: &[(&str, Value)]) -> Value {
    Value::datamap_from_pairs(pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())))
}

#[test]
fn datatypes_match_by_predicate() {
    assert!(matches(&Value::Number(1.0), &dt(DatatypeName::Num)));
    assert!(!matches(&Value::string("1"), &dt(DatatypeName::Num)));
}

#[test]
fn typed_vars_delegate_to_their_datatype() {
    let tv = TypedVar::create(dt(DatatypeName::Str), Operand::Ref(VarRef::temp("s"))).unwrap();
    let pattern = Value::typed_var(tv);
    assert!(matches(&Value::string("hi"), &pattern));
    assert!(!matches(&Value::Bool(true), &pattern));
}

#[test]
fn literals_match_by_equality() {
    assert!(matches(&Value::Number(3.0), &Value::Number(3.0)));
    assert!(!matches(&Value::Number(3.0), &Value::Number(4.0)));
    assert!(matches(&nums(&[1.0, 2.0]), &nums(&[1.0, 2.0])));
}

#[test]
fn arrays_match_positionally_with_exact_length() {
    let pattern = Value::array(vec![dt(DatatypeName::Num), dt(DatatypeName::Str)]);
    assert!(matches(
        &Value::array(vec![Value::Number(1.0), Value::string("a")]),
        &pattern
    ));
    assert!(!matches(&nums(&[1.0]), &pattern));
    assert!(!matches(
        &Value::array(vec![Value::Number(1.0), Value::string("a"), Value::Bool(true)]),
        &pattern
    ));
}

#[test]
fn rest_absorbs_any_run_including_none() {
    let pattern = Value::array(vec![rest(DatatypeName::Num)]);
    assert!(matches(&nums(&[1.0, 2.0, 3.0, 4.0]), &pattern));
    assert!(matches(&nums(&[]), &pattern));
    assert!(!matches(
        &Value::array(vec![Value::Number(1.0), Value::string("x")]),
        &pattern
    ));
}

#[test]
fn rest_in_the_middle() {
    let pattern = Value::array(vec![
        dt(DatatypeName::Str),
        rest(DatatypeName::Num),
        dt(DatatypeName::Bool),
    ]);
    let value = Value::array(vec![
        Value::string("a"),
        Value::Number(1.0),
        Value::Number(2.0),
        Value::Bool(true),
    ]);
    assert!(matches(&value, &pattern));
}

#[test]
fn rest_is_greedy_and_never_backtracks() {
    // The rest run takes both numbers, leaving nothing for the final num.
    let pattern = Value::array(vec![rest(DatatypeName::Num), dt(DatatypeName::Num)]);
    assert!(!matches(&nums(&[1.0, 2.0]), &pattern));
}

#[test]
fn datamaps_match_a_subset_of_names() {
    let pattern = map(&[("a", dt(DatatypeName::Num))]);
    assert!(matches(
        &map(&[("a", Value::Number(1.0)), ("b", Value::Number(2.0))]),
        &pattern
    ));
    let both = map(&[("a", dt(DatatypeName::Num)), ("b", dt(DatatypeName::Num))]);
    assert!(!matches(&map(&[("a", Value::Number(1.0))]), &both));
}

#[test]
fn string_patterns_only_match_strings() {
    let p = Value::string_pattern(
        StringPattern::new(vec![Value::string("a"), dt(DatatypeName::Str)]).unwrap(),
    );
    assert!(matches(&Value::string("abc"), &p));
    assert!(!matches(&Value::string("bc"), &p));
    assert!(!matches(&Value::Number(1.0), &p));
}

#[test]
fn pattern_classification() {
    assert!(is_pattern(&dt(DatatypeName::Num)));
    assert!(is_pattern(&Value::array(vec![Value::Number(1.0), dt(DatatypeName::Num)])));
    assert!(!is_pattern(&nums(&[1.0])));
    assert!(is_composite_pattern(&nums(&[])));
    assert!(!is_composite_pattern(&dt(DatatypeName::Num)));
}

#[test]
fn rest_inner_strips_the_spread() {
    assert_eq!(rest_inner(&rest(DatatypeName::Num)), Some(dt(DatatypeName::Num)));
    assert_eq!(rest_inner(&dt(DatatypeName::Num)), None);
}

#[test]
fn signatures_describe_arity() {
    let many = TypeSignature::of(&rest(DatatypeName::Str));
    assert_eq!(many.arity, Arity::ZeroOrMore);
    assert_eq!(many.describe(), "zero or more str");
    assert!(many.accepts(&Value::string("x")));

    let tv = TypedVar::create(dt(DatatypeName::Num), Operand::Ref(VarRef::temp("n"))).unwrap();
    let one = TypeSignature::of(&Value::typed_var(tv));
    assert_eq!(one.arity, Arity::One);
    assert_eq!(one.describe(), "num");
}

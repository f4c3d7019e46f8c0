use super::*;
use crate::datatype::Datatype;
use crate::errors::EvalError;
use crate::reference::VarRef;
use pretty_assertions::assert_eq;

fn nums(ns: &[f64]) -> Value {
    Value::array(ns.iter().copied().map(Value::Number).collect())
}

// Rendering

#[test]
fn renders_primitives() {
    assert_eq!(Value::Number(2.0).to_string(), "2");
    assert_eq!(Value::Number(-0.0).to_string(), "0");
    assert_eq!(Value::Number(0.25).to_string(), "0.25");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::string("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
}

#[test]
fn renders_collections() {
    assert_eq!(nums(&[1.0, 2.0]).to_string(), "(a: 1, 2)");
    assert_eq!(Value::array(vec![]).to_string(), "(a:)");
    let map = Value::datamap_from_pairs([
        ("b".to_string(), Value::Number(2.0)),
        ("a".to_string(), Value::string("x")),
    ]);
    assert_eq!(map.to_string(), "(dm: \"a\", \"x\", \"b\", 2)");
    assert_eq!(
        Value::dataset(vec![Value::Number(1.0)]).to_string(),
        "(ds: 1)"
    );
}

#[test]
fn renders_spreaders_and_determiners() {
    assert_eq!(Value::spreader(nums(&[1.0])).to_string(), "...(a: 1)");
    let d = Determined::new(Determiner::Start, Value::string("abc")).unwrap();
    assert_eq!(Value::determined(d).to_string(), "start of \"abc\"");
}

// Construction

#[test]
fn dataset_drops_duplicates() {
    let ds = Value::dataset(vec![
        Value::Number(1.0),
        nums(&[2.0]),
        Value::Number(1.0),
        nums(&[2.0]),
    ]);
    assert_eq!(ds.length(), Some(2));
}

#[test]
fn datasets_compare_unordered() {
    let a = Value::dataset(vec![Value::Number(1.0), Value::Number(2.0)]);
    let b = Value::dataset(vec![Value::Number(2.0), Value::Number(1.0)]);
    assert_eq!(a, b);
    assert_ne!(a, Value::dataset(vec![Value::Number(1.0)]));
}

#[test]
fn datatypes_compare_by_name_only() {
    let plain = Value::Datatype(Datatype::single(crate::DatatypeName::Num));
    let rest = Value::Datatype(Datatype::spread(crate::DatatypeName::Num));
    assert_eq!(plain, rest);
}

#[test]
fn errors_compare_by_kind_and_message() {
    let a = Value::error(EvalError::operation("bad").with_source("x"));
    let b = Value::error(EvalError::operation("bad"));
    assert_eq!(a, b);
    assert_ne!(a, Value::error(EvalError::syntax("bad")));
}

// Descriptions

#[test]
fn object_names() {
    assert_eq!(Value::Number(2.0).object_name(), "the number 2");
    assert_eq!(Value::string("abc").object_name(), "the string \"abc\"");
    assert_eq!(Value::Bool(true).object_name(), "the boolean value true");
    assert_eq!(Value::array(vec![]).object_name(), "an empty array");
    assert_eq!(nums(&[1.0]).object_name(), "an array (with 1 item)");
    assert_eq!(nums(&[1.0, 2.0, 3.0]).object_name(), "an array (with 3 items)");
    assert_eq!(
        Value::datamap_from_pairs([("a".to_string(), Value::Number(1.0))]).object_name(),
        "a datamap (with 1 name)"
    );
    assert_eq!(
        Value::spreader(nums(&[1.0, 2.0, 3.0])).object_name(),
        "3 spread values"
    );
    assert_eq!(
        Value::changer(Changer::new("bold", vec![])).object_name(),
        "a (bold:) changer"
    );
}

#[test]
fn long_strings_are_summarised() {
    let long = "x".repeat(60);
    assert_eq!(
        Value::string(long).object_name(),
        "a string of 60 characters"
    );
}

#[test]
fn kinds() {
    assert_eq!(Value::Number(1.0).primitive_kind(), PrimitiveKind::Number);
    assert_eq!(nums(&[]).primitive_kind(), PrimitiveKind::Object);
    assert_eq!(nums(&[]).collection_kind(), Some(CollectionKind::Array));
    assert_eq!(Value::string("a").collection_kind(), None);
    assert_eq!(Value::Colour(Colour::rgb(0, 0, 0)).domain_type_name(), Some("colour"));
    assert_eq!(nums(&[]).domain_type_name(), None);
}

// Storability

#[test]
fn unstorable_values_are_found_inside_collections() {
    assert!(!nums(&[1.0]).is_unstorable());
    let spread = Value::spreader(nums(&[1.0]));
    assert!(spread.is_unstorable());
    let nested = Value::array(vec![Value::Number(1.0), spread.clone()]);
    assert_eq!(nested.first_unstorable(), Some(&spread));

    let tv = crate::TypedVar::create(
        Value::Datatype(Datatype::single(crate::DatatypeName::Num)),
        crate::Operand::Ref(VarRef::story("x")),
    )
    .unwrap();
    assert!(Value::typed_var(tv).is_unstorable());
}

#[test]
fn length_counts_characters() {
    assert_eq!(Value::string("héllo").length(), Some(5));
    assert_eq!(Value::Number(1.0).length(), None);
}

// Determined values

#[test]
fn start_and_end_need_ordered_sequences() {
    let ds = Value::dataset(vec![Value::Number(1.0)]);
    assert!(Determined::new(Determiner::Any, ds.clone()).is_ok());
    assert!(Determined::new(Determiner::Start, ds).is_err());
    assert!(Determined::new(Determiner::All, Value::Number(3.0)).is_err());
}

#[test]
fn progressive_parts_grow_from_empty() {
    let start = Determined::new(Determiner::Start, Value::string("abc")).unwrap();
    let parts: Vec<String> = start
        .progressive_parts()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(parts, ["\"\"", "\"a\"", "\"ab\"", "\"abc\""]);

    let end = Determined::new(Determiner::End, nums(&[1.0, 2.0])).unwrap();
    assert_eq!(
        end.progressive_parts(),
        vec![nums(&[]), nums(&[2.0]), nums(&[1.0, 2.0])]
    );
}

#[test]
fn elements_split_strings_into_characters() {
    let all = Determined::new(Determiner::All, Value::string("ab")).unwrap();
    assert_eq!(all.elements(), vec![Value::string("a"), Value::string("b")]);
}

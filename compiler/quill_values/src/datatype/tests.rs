use super::*;
use pretty_assertions::assert_eq;

fn check(name: &str, value: &Value) -> bool {
    Datatype::create(name, false)
        .map(|d| d.is_type_of(value))
        .unwrap_or(false)
}

#[test]
fn synonyms_fold_to_canonical_names() {
    for (long, short) in [
        ("datamap", "dm"),
        ("dataset", "ds"),
        ("number", "num"),
        ("string", "str"),
        ("color", "colour"),
        ("boolean", "bool"),
        ("integer", "int"),
        ("newline", "linebreak"),
        ("alphanumeric", "alnum"),
    ] {
        let d = Datatype::create(long, false).unwrap();
        assert_eq!(d.name.as_str(), short, "{long}");
        assert_eq!(d, Datatype::create(short, false).unwrap());
    }
}

#[test]
fn unknown_names_are_rejected() {
    assert!(Datatype::create("float", false).is_none());
}

#[test]
fn every_canonical_name_round_trips() {
    for name in DatatypeName::all() {
        assert_eq!(DatatypeName::from_name(name.as_str()), Some(name));
    }
}

#[test]
fn rest_flag_does_not_affect_equality() {
    assert_eq!(
        Datatype::spread(DatatypeName::Num),
        Datatype::single(DatatypeName::Num)
    );
    assert_eq!(Datatype::spread(DatatypeName::Num).to_string(), "...num");
}

#[test]
fn primitive_predicates() {
    assert!(check("num", &Value::Number(3.5)));
    assert!(!check("num", &Value::string("3")));
    assert!(check("str", &Value::string("")));
    assert!(check("bool", &Value::Bool(false)));
    assert!(check("array", &Value::array(vec![])));
    assert!(check("dm", &Value::datamap(Default::default())));
    assert!(check("ds", &Value::dataset(vec![])));
}

#[test]
fn numeric_refinements() {
    assert!(check("even", &Value::Number(4.0)));
    assert!(check("even", &Value::Number(-2.5)));
    assert!(check("odd", &Value::Number(-3.0)));
    assert!(!check("odd", &Value::Number(2.0)));
    assert!(check("int", &Value::Number(-7.0)));
    assert!(!check("int", &Value::Number(7.1)));
    assert!(!check("even", &Value::string("2")));
}

#[test]
fn empty_checks_size() {
    assert!(check("empty", &Value::string("")));
    assert!(check("empty", &Value::array(vec![])));
    assert!(!check("empty", &Value::array(vec![Value::Number(1.0)])));
    assert!(!check("empty", &Value::Number(0.0)));
}

#[test]
fn character_classes_need_exactly_one_character() {
    assert!(check("uppercase", &Value::string("A")));
    assert!(!check("uppercase", &Value::string("AB")));
    assert!(!check("uppercase", &Value::string("a")));
    assert!(check("lowercase", &Value::string("é")));
    assert!(check("anycase", &Value::string("q")));
    assert!(!check("anycase", &Value::string("1")));
    assert!(check("whitespace", &Value::string(" ")));
    assert!(!check("whitespace", &Value::string("\n")));
    assert!(check("digit", &Value::string("7")));
    assert!(check("alnum", &Value::string("z")));
    assert!(!check("alnum", &Value::string("-")));
    assert!(check("linebreak", &Value::string("\r\n")));
    assert!(!check("linebreak", &Value::string(" ")));
}

#[test]
fn universal_predicates() {
    assert!(check("any", &Value::Bool(true)));
    assert!(check("const", &Value::Number(1.0)));
}

#[test]
fn character_class_membership() {
    assert!(DatatypeName::Digit.is_character_class());
    assert!(!DatatypeName::Str.is_character_class());
}

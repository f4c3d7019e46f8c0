//! Property-based tests for pattern matching.
//!
//! These generate random literal values and check that:
//! 1. Literal patterns match exactly the values equal to them
//! 2. `matches` is pure: repeated calls agree
//! 3. A spread datatype absorbs any array whose elements all fit it

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use quill_values::{matches, Datatype, DatatypeName, Value};

// -- Value Generation Strategies --

/// Literal leaves: finite numbers, booleans and short strings.
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1000i32..1000).prop_map(|n| Value::Number(f64::from(n))),
        (-1000i32..1000).prop_map(|n| Value::Number(f64::from(n) / 8.0)),
        any::<bool>().prop_map(Value::Bool),
        "[a-z ]{0,6}".prop_map(Value::string),
    ]
}

/// Literal values nested up to three levels in arrays and datamaps.
fn literal_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::array),
            prop::collection::vec(("[a-c]", inner), 0..3).prop_map(Value::datamap_from_pairs),
        ]
    })
}

fn num_run() -> Value {
    Value::array(vec![Value::Datatype(Datatype::spread(DatatypeName::Num))])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn literal_matches_itself(v in literal_strategy()) {
        prop_assert!(matches(&v, &v));
    }

    #[test]
    fn scalar_literals_match_iff_equal(a in leaf_strategy(), b in leaf_strategy()) {
        prop_assert_eq!(matches(&a, &b), a == b);
    }

    #[test]
    fn array_literals_match_iff_equal(
        a in prop::collection::vec(leaf_strategy(), 0..4),
        b in prop::collection::vec(leaf_strategy(), 0..4),
    ) {
        let (a, b) = (Value::array(a), Value::array(b));
        prop_assert_eq!(matches(&a, &b), a == b);
    }

    #[test]
    fn matching_is_repeatable(v in literal_strategy(), p in literal_strategy()) {
        let before = (v.clone(), p.clone());
        let first = matches(&v, &p);
        prop_assert_eq!(first, matches(&v, &p));
        prop_assert_eq!((v, p), before);
    }

    #[test]
    fn spread_num_absorbs_numeric_arrays(ns in prop::collection::vec(-1e6f64..1e6, 0..12)) {
        let value = Value::array(ns.into_iter().map(Value::Number).collect());
        prop_assert!(matches(&value, &num_run()));
    }

    #[test]
    fn spread_num_rejects_any_string_element(
        ns in prop::collection::vec(-100i32..100, 0..6),
        at in 0usize..6,
        s in "[a-z]{1,3}",
    ) {
        let mut items: Vec<Value> = ns.into_iter().map(|n| Value::Number(f64::from(n))).collect();
        let at = at.min(items.len());
        items.insert(at, Value::string(s));
        prop_assert!(!matches(&Value::array(items), &num_run()));
    }
}

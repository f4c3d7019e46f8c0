//! Structural pattern matching.
//!
//! A pattern is any value used to test another value: a datatype, a typed
//! variable, a string pattern, a literal, or an array/datamap whose
//! elements are themselves patterns. [`matches`] is pure; it never
//! mutates either side and never fails. Anything that isn't recognisably a
//! pattern falls through to structural equality.
//!
//! # Rest elements
//!
//! Inside an array pattern, a spread datatype or spread typed variable
//! (`...num`, `...num-type _rest`) absorbs a contiguous run of zero or more
//! elements. Consumption is greedy and never backtracks: once a rest element
//! has taken every element its inner type accepts, later pattern elements
//! only see what is left.

use std::fmt;

use crate::typed_var::TypedVar;
use crate::value::Value;

/// Test `value` against `pattern`.
pub fn matches(value: &Value, pattern: &Value) -> bool {
    crate::ensure_sufficient_stack(|| match (pattern, value) {
        (Value::Datatype(d), _) => d.is_type_of(value),
        (Value::TypedVar(tv), _) => matches(value, &tv.datatype),
        (Value::StringPattern(p), Value::Str(s)) => p.is_match(s),
        (Value::StringPattern(_), _) => false,
        (Value::Array(pats), Value::Array(items)) => match_sequence(items, pats),
        (Value::Datamap(pats), Value::Datamap(entries)) => pats
            .iter()
            .all(|(key, pat)| entries.get(key).is_some_and(|v| matches(v, pat))),
        _ => value == pattern,
    })
}

/// Positional matching with greedy rest runs and exact length.
fn match_sequence(items: &[Value], pats: &[Value]) -> bool {
    let mut v = 0;
    for pat in pats {
        if let Some(inner) = rest_inner(pat) {
            while v < items.len() && matches(&items[v], &inner) {
                v += 1;
            }
        } else {
            if v >= items.len() || !matches(&items[v], pat) {
                return false;
            }
            v += 1;
        }
    }
    v == items.len()
}

/// For a rest element, the pattern each absorbed element must match.
pub fn rest_inner(pattern: &Value) -> Option<Value> {
    match pattern {
        Value::Datatype(d) if d.rest => Some(Value::Datatype(d.as_single())),
        Value::TypedVar(tv) if tv.rest => Some(tv.datatype.clone()),
        _ => None,
    }
}

/// Whether `value` is, or contains, something other than a literal.
pub fn is_pattern(value: &Value) -> bool {
    crate::ensure_sufficient_stack(|| match value {
        Value::Datatype(_) | Value::TypedVar(_) | Value::StringPattern(_) => true,
        Value::Array(items) => items.iter().any(is_pattern),
        Value::Datamap(map) => map.values().any(is_pattern),
        _ => false,
    })
}

/// Patterns with inner structure that destructuring descends into.
pub fn is_composite_pattern(value: &Value) -> bool {
    matches!(
        value,
        Value::Array(_) | Value::Datamap(_) | Value::StringPattern(_)
    )
}

/// One typed variable captured by a pattern, with the part it captured.
#[derive(Clone, Debug, PartialEq)]
pub struct Capture {
    pub target: TypedVar,
    pub value: Value,
}

/// Patterns that can produce their own bindings instead of being walked
/// structurally by the destructurer.
pub trait Destructurable {
    /// Captured parts, in left-to-right order, or `None` if `value` doesn't
    /// match.
    fn captures(&self, value: &Value) -> Option<Vec<Capture>>;
}

impl Value {
    /// The destructuring capability of this value, if it has one.
    pub fn as_destructurable(&self) -> Option<&dyn Destructurable> {
        match self {
            Value::StringPattern(p) => Some(&**p),
            _ => None,
        }
    }
}

/// How many values a signature stands for.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Arity {
    One,
    ZeroOrMore,
}

/// The shape of value a parameter accepts.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeSignature {
    /// Pattern each accepted value must match.
    pub pattern: Value,
    pub arity: Arity,
}

impl TypeSignature {
    /// Signature of a datatype, typed variable or other pattern.
    pub fn of(pattern: &Value) -> TypeSignature {
        match pattern {
            Value::Datatype(d) => TypeSignature {
                pattern: Value::Datatype(d.as_single()),
                arity: if d.rest { Arity::ZeroOrMore } else { Arity::One },
            },
            Value::TypedVar(tv) => TypeSignature {
                pattern: tv.datatype.clone(),
                arity: if tv.rest { Arity::ZeroOrMore } else { Arity::One },
            },
            _ => TypeSignature {
                pattern: pattern.clone(),
                arity: Arity::One,
            },
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        matches(value, &self.pattern)
    }

    /// Text used in messages: `num`, `zero or more num`.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arity == Arity::ZeroOrMore {
            f.write_str("zero or more ")?;
        }
        write!(f, "{}", self.pattern)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;

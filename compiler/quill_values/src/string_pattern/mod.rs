//! String patterns: sequences of parts matched against a whole string.
//!
//! Parts are string literals, character-class datatypes (`digit`,
//! `...whitespace`, …), run datatypes (`str`, `any`, `empty`), nested string
//! patterns, and typed variables wrapping any of those. A typed variable
//! part captures the substring it matched, which is how `(p: "#",
//! ...digit-type _n)` pulls the number out of `"#42"` during destructuring.
//!
//! Matching backtracks: every part tries its longest candidate first and
//! gives characters back when the parts after it can't match.

use std::fmt;

use crate::datatype::DatatypeName;
use crate::errors::{contains_error, EvalError, EvalResult};
use crate::pattern::{Capture, Destructurable};
use crate::value::Value;

/// A whole-string pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct StringPattern {
    parts: Vec<Value>,
}

impl StringPattern {
    /// Build a pattern, rejecting parts that can't describe a substring.
    pub fn new(parts: Vec<Value>) -> EvalResult<StringPattern> {
        let refs: Vec<&Value> = parts.iter().collect();
        contains_error(&refs)?;
        for part in &parts {
            validate_part(part)?;
        }
        Ok(StringPattern { parts })
    }

    /// Single-part pattern for a part already known to be valid.
    pub(crate) fn single(part: Value) -> StringPattern {
        StringPattern { parts: vec![part] }
    }

    pub fn parts(&self) -> &[Value] {
        &self.parts
    }

    /// Whether the whole of `s` matches.
    pub fn is_match(&self, s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        match_from(&self.parts, &chars, 0, &mut Vec::new())
    }
}

fn validate_part(part: &Value) -> EvalResult<()> {
    match part {
        Value::Str(_) | Value::StringPattern(_) => Ok(()),
        Value::Datatype(d) if d.name.is_character_class() => Ok(()),
        Value::Datatype(d)
            if matches!(d.name, DatatypeName::Str | DatatypeName::Any | DatatypeName::Empty) =>
        {
            Ok(())
        }
        Value::Datatype(d) => Err(EvalError::syntax(format!(
            "The {d} datatype can't be used in a string pattern, because it doesn't describe characters."
        ))),
        Value::TypedVar(tv) => validate_part(&tv.datatype),
        other => Err(EvalError::syntax(format!(
            "{} can't be part of a string pattern.",
            crate::errors::capitalize(&other.object_name())
        ))
        .with_explanation("String patterns can only contain strings, string datatypes and other string patterns.")),
    }
}

/// Match `parts` against `chars[pos..]`, requiring the whole remainder to
/// be consumed. Captures are appended left to right; a failed attempt
/// leaves `caps` as it found it.
fn match_from(parts: &[Value], chars: &[char], pos: usize, caps: &mut Vec<Capture>) -> bool {
    crate::ensure_sufficient_stack(|| {
        let Some((part, rest)) = parts.split_first() else {
            return pos == chars.len();
        };
        for end in candidate_ends(part, chars, pos) {
            let mark = caps.len();
            if match_span(part, &chars[pos..end], caps) && match_from(rest, chars, end, caps) {
                return true;
            }
            caps.truncate(mark);
        }
        false
    })
}

/// Where a part could stop, longest first.
fn candidate_ends(part: &Value, chars: &[char], pos: usize) -> Vec<usize> {
    let remaining = chars.len() - pos;
    match part {
        Value::Str(lit) => {
            let len = lit.chars().count();
            if len <= remaining {
                vec![pos + len]
            } else {
                Vec::new()
            }
        }
        Value::Datatype(d) if d.name == DatatypeName::Empty => vec![pos],
        Value::Datatype(d) if d.name.is_character_class() && !d.rest => {
            (1..=remaining.min(2)).rev().map(|n| pos + n).collect()
        }
        _ => (pos..=chars.len()).rev().collect(),
    }
}

/// Whether `part` matches exactly `span`.
fn match_span(part: &Value, span: &[char], caps: &mut Vec<Capture>) -> bool {
    match part {
        Value::Str(lit) => lit.chars().eq(span.iter().copied()),
        Value::Datatype(d) => match d.name {
            DatatypeName::Str | DatatypeName::Any => true,
            DatatypeName::Empty => span.is_empty(),
            name if d.rest => span
                .iter()
                .all(|c| name.predicate()(&Value::string(*c))),
            name => {
                let text: String = span.iter().collect();
                name.predicate()(&Value::string(text))
            }
        },
        Value::StringPattern(sub) => match_from(&sub.parts, span, 0, caps),
        Value::TypedVar(tv) => {
            let mark = caps.len();
            let inner = match (&tv.datatype, tv.rest) {
                (Value::Datatype(d), true) => Value::Datatype(d.as_rest()),
                (other, _) => other.clone(),
            };
            if !match_span(&inner, span, caps) {
                caps.truncate(mark);
                return false;
            }
            caps.insert(
                mark,
                Capture {
                    target: tv.retyped(Value::string_pattern(StringPattern::single(inner))),
                    value: Value::string(span.iter().collect::<String>()),
                },
            );
            true
        }
        _ => false,
    }
}

impl Destructurable for StringPattern {
    fn captures(&self, value: &Value) -> Option<Vec<Capture>> {
        let s = value.as_str()?;
        let chars: Vec<char> = s.chars().collect();
        let mut caps = Vec::new();
        match_from(&self.parts, &chars, 0, &mut caps).then_some(caps)
    }
}

impl fmt::Display for StringPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(p:")?;
        for (i, part) in self.parts.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{part}")?;
        }
        f.write_str(")")
    }
}

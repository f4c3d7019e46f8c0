//! Binary operator implementations.
//!
//! Operators never coerce. Arithmetic on `+`/`-` first checks that both
//! sides are the same fundamental kind of data; `*`, `/`, `%`, `<` and
//! friends only accept numbers; `and`/`or` only booleans. Any `Value::Error`
//! operand is returned before anything else is looked at.
//!
//! Comparison operators also accept determined operands (`some of $a`,
//! `start of $s`); see [`crate::determiners`].

use std::fmt;

use bitflags::bitflags;
use quill_values::{
    contains_error, division_by_zero, invalid_operand, is_pattern, matches, modulo_by_zero,
    non_finite_result, only_primitives, type_mismatch, EvalError, EvalResult, PrimitiveKind, Value,
};

use crate::determiners::compare;

bitflags! {
    /// Static properties of a binary operator.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct OpFlags: u8 {
        /// Produces a boolean and accepts determined operands.
        const COMPARISON = 1 << 0;
        /// The inverse of another operator's predicate.
        const NEGATED = 1 << 1;
        /// Refuses `start of`/`end of` operands.
        const NO_START_END = 1 << 2;
    }
}

/// Binary operators of the story language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Is,
    IsNot,
    Contains,
    DoesNotContain,
    IsIn,
    IsNotIn,
    IsA,
    IsNotA,
    Matches,
    DoesNotMatch,
}

impl BinaryOp {
    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Is => "is",
            BinaryOp::IsNot => "is not",
            BinaryOp::Contains => "contains",
            BinaryOp::DoesNotContain => "does not contain",
            BinaryOp::IsIn => "is in",
            BinaryOp::IsNotIn => "is not in",
            BinaryOp::IsA => "is a",
            BinaryOp::IsNotA => "is not a",
            BinaryOp::Matches => "matches",
            BinaryOp::DoesNotMatch => "does not match",
        }
    }

    pub fn flags(self) -> OpFlags {
        match self {
            BinaryOp::And
            | BinaryOp::Or
            | BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Mod => OpFlags::empty(),
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq | BinaryOp::Contains => {
                OpFlags::COMPARISON | OpFlags::NO_START_END
            }
            BinaryOp::DoesNotContain => {
                OpFlags::COMPARISON | OpFlags::NEGATED | OpFlags::NO_START_END
            }
            BinaryOp::Is | BinaryOp::IsIn | BinaryOp::IsA | BinaryOp::Matches => {
                OpFlags::COMPARISON
            }
            BinaryOp::IsNot | BinaryOp::IsNotIn | BinaryOp::IsNotA | BinaryOp::DoesNotMatch => {
                OpFlags::COMPARISON | OpFlags::NEGATED
            }
        }
    }

    pub fn is_comparison(self) -> bool {
        self.flags().contains(OpFlags::COMPARISON)
    }

    pub fn is_negated(self) -> bool {
        self.flags().contains(OpFlags::NEGATED)
    }

    /// The operator whose predicate this one inverts, or itself.
    #[must_use]
    pub fn positive(self) -> BinaryOp {
        match self {
            BinaryOp::IsNot => BinaryOp::Is,
            BinaryOp::DoesNotContain => BinaryOp::Contains,
            BinaryOp::IsNotIn => BinaryOp::IsIn,
            BinaryOp::IsNotA => BinaryOp::IsA,
            BinaryOp::DoesNotMatch => BinaryOp::Matches,
            other => other,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluate `left op right`.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    contains_error(&[left, right])?;
    for operand in [left, right] {
        let rejected = match operand {
            Value::Spreader(_) => true,
            Value::Determined(_) => !op.is_comparison(),
            _ => false,
        };
        if rejected {
            return Err(invalid_operand(op.as_str(), operand));
        }
    }

    if op.is_comparison() {
        return compare(op, left, right).map(Value::Bool);
    }
    match op {
        BinaryOp::And | BinaryOp::Or => {
            let verb = format!("use '{op}' to join");
            let a = expect_bool(left, &verb)?;
            let b = expect_bool(right, &verb)?;
            Ok(Value::Bool(if op == BinaryOp::And { a && b } else { a || b }))
        }
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            let verb = format!("use '{op}' on");
            let a = expect_number(left, &verb)?;
            let b = expect_number(right, &verb)?;
            let result = match op {
                BinaryOp::Div if b == 0.0 => return Err(division_by_zero(left)),
                BinaryOp::Mod if b == 0.0 => return Err(modulo_by_zero(left)),
                BinaryOp::Div => a / b,
                BinaryOp::Mod => a % b,
                _ => a * b,
            };
            finite(result, op)
        }
        BinaryOp::Add => {
            do_not_coerce(left, right)?;
            add(left, right)
        }
        BinaryOp::Sub => {
            do_not_coerce(left, right)?;
            subtract(left, right)
        }
        _ => Err(invalid_operand(op.as_str(), left)),
    }
}

/// The core predicate of a non-negated comparison on plain operands.
pub(crate) fn compare_plain(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<bool> {
    match op {
        BinaryOp::Is => Ok(left == right),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let verb = format!("use '{op}' to compare");
            let a = expect_number(left, &verb)?;
            let b = expect_number(right, &verb)?;
            Ok(match op {
                BinaryOp::Lt => a < b,
                BinaryOp::LtEq => a <= b,
                BinaryOp::Gt => a > b,
                _ => a >= b,
            })
        }
        BinaryOp::Contains => contains(left, right),
        BinaryOp::IsIn => contains(right, left),
        BinaryOp::IsA => match right {
            Value::Datatype(d) => Ok(d.is_type_of(left)),
            _ => Err(EvalError::operation(format!(
                "'is a' needs a datatype on its right side, not {}.",
                right.object_name()
            ))),
        },
        BinaryOp::Matches => {
            if is_pattern(left) && !is_pattern(right) {
                Ok(matches(right, left))
            } else {
                Ok(matches(left, right))
            }
        }
        negated if negated.is_negated() => compare_plain(negated.positive(), left, right).map(|b| !b),
        other => Err(invalid_operand(other.as_str(), left)),
    }
}

fn contains(container: &Value, item: &Value) -> EvalResult<bool> {
    match container {
        Value::Str(haystack) => match item {
            Value::Str(needle) => Ok(haystack.contains(needle.as_str())),
            _ => Err(only_primitives(PrimitiveKind::String, "search strings for", item)),
        },
        Value::Array(items) | Value::Dataset(items) => Ok(items.contains(item)),
        Value::Datamap(map) => match item {
            Value::Str(key) => Ok(map.contains_key(key.as_str())),
            _ => Err(EvalError::operation(format!(
                "Only strings can be data names of {}, so it can't contain {}.",
                container.object_name(),
                item.object_name()
            ))),
        },
        _ => Err(invalid_operand("contains", container)),
    }
}

/// Both operands must be the same kind of data.
fn do_not_coerce(left: &Value, right: &Value) -> EvalResult<()> {
    let same = left.primitive_kind() == right.primitive_kind()
        && left.domain_type_name() == right.domain_type_name()
        && left.collection_kind() == right.collection_kind();
    if same {
        Ok(())
    } else {
        Err(type_mismatch(left, right))
    }
}

fn add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => finite(a + b, BinaryOp::Add),
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{}{}", a.as_str(), b.as_str()))),
        (Value::Array(a), Value::Array(b)) => {
            Ok(Value::array(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::Datamap(a), Value::Datamap(b)) => {
            let mut merged = (**a).clone();
            merged.extend(b.iter().map(|(k, v)| (k.clone(), v.clone())));
            Ok(Value::datamap(merged))
        }
        (Value::Dataset(a), Value::Dataset(b)) => {
            Ok(Value::dataset(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::Changer(a), Value::Changer(b)) => Ok(Value::changer(a.combine(b))),
        (Value::Colour(a), Value::Colour(b)) => Ok(Value::Colour(a.mix(*b))),
        _ => Err(invalid_operand("+", left)),
    }
}

fn subtract(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => finite(a - b, BinaryOp::Sub),
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(a.replace(b.as_str(), ""))),
        (Value::Array(a), Value::Array(b)) => Ok(Value::array(without(a, b))),
        (Value::Dataset(a), Value::Dataset(b)) => Ok(Value::dataset(without(a, b))),
        _ => Err(invalid_operand("-", left)),
    }
}

/// Every item of `items` not equal to any item of `removed`.
fn without(items: &[Value], removed: &[Value]) -> Vec<Value> {
    items
        .iter()
        .filter(|item| !removed.contains(item))
        .cloned()
        .collect()
}

fn finite(result: f64, op: BinaryOp) -> EvalResult {
    if result.is_finite() {
        Ok(Value::Number(result))
    } else {
        Err(non_finite_result(op.as_str()))
    }
}

pub(crate) fn expect_number(value: &Value, verb: &str) -> EvalResult<f64> {
    value
        .as_number()
        .ok_or_else(|| only_primitives(PrimitiveKind::Number, verb, value))
}

pub(crate) fn expect_bool(value: &Value, verb: &str) -> EvalResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| only_primitives(PrimitiveKind::Boolean, verb, value))
}

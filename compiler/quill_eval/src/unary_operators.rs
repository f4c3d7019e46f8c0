//! Unary operator implementations.
//!
//! `not` and negation are strictly typed like their binary counterparts.
//! The rest build the special, unstorable operand forms: spreaders
//! (`...$a`), determined sequences (`some of $a`) and typed variables
//! (`num-type $x`).

use quill_values::{
    contains_error, invalid_operand, Determined, Determiner, EvalError, EvalResult, Operand,
    TypedVar, Value,
};

use crate::operators::{expect_bool, expect_number};

/// Unary operators of the story language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Not,
    Neg,
    Spread,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Neg => "-",
            UnaryOp::Spread => "...",
        }
    }
}

/// Evaluate `op value`.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    contains_error(&[value])?;
    match op {
        UnaryOp::Spread => make_spreader(value),
        _ if matches!(value, Value::Spreader(_) | Value::Determined(_)) => {
            Err(invalid_operand(op.as_str(), value))
        }
        UnaryOp::Not => expect_bool(value, "use 'not' on").map(|b| Value::Bool(!b)),
        UnaryOp::Neg => expect_number(value, "negate").map(|n| Value::Number(-n)),
    }
}

/// The spread form of `value`.
///
/// Datatypes and typed variables get their rest flag set; sequences are
/// wrapped in a spreader that expands into their items or characters.
pub fn make_spreader(value: &Value) -> EvalResult {
    match value {
        Value::Datatype(d) => Ok(Value::Datatype(d.as_rest())),
        Value::TypedVar(tv) => Ok(Value::typed_var(tv.spread())),
        Value::Array(_) | Value::Str(_) | Value::Dataset(_) => Ok(Value::spreader(value.clone())),
        _ => Err(EvalError::operation(format!(
            "I can't spread out {}, because it isn't a string, dataset, array or datatype.",
            value.object_name()
        ))),
    }
}

/// Tag a sequence with a determiner.
pub fn determine(determiner: Determiner, sequence: &Value) -> EvalResult {
    contains_error(&[sequence])?;
    Determined::new(determiner, sequence.clone()).map(Value::determined)
}

/// The `-type` operator: bind `datatype` to a variable.
pub fn typify(datatype: Value, target: Operand) -> EvalResult {
    TypedVar::create(datatype, target).map(Value::typed_var)
}

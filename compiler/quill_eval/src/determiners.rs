//! Comparison with determined operands.
//!
//! `some of`/`all of` unwind first: the comparison is run per element, left
//! side before right side, and the results are folded with `any`/`all`.
//! Each per-element comparison keeps the operator as written, so
//! `some of $a is not 3` holds when any element isn't 3.
//!
//! `start of`/`end of` then test the positive predicate against every
//! prefix or suffix, shortest first, and a negated operator inverts the
//! overall answer. Errors from any element short-circuit unchanged.

use quill_values::{Determined, Determiner, EvalError, EvalResult, Value};

use crate::operators::{compare_plain, BinaryOp, OpFlags};

/// Evaluate comparison `op` with either side possibly determined.
pub(crate) fn compare(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<bool> {
    quill_values::ensure_sufficient_stack(|| {
        if let Some(d) = quantified(left) {
            return quantify(d, |element| compare(op, element, right));
        }
        if let Some(d) = quantified(right) {
            return quantify(d, |element| compare(op, left, element));
        }

        match (left.as_determined(), right.as_determined()) {
            (Some(l), Some(r)) => Err(EvalError::operation(format!(
                "I can't compare '{}' with '{}' using '{op}'; it's ambiguous.",
                l.determiner.phrase(),
                r.determiner.phrase()
            ))),
            (Some(d), None) => progressive(op, d, |part| compare_plain(op.positive(), part, right)),
            (None, Some(d)) => progressive(op, d, |part| compare_plain(op.positive(), left, part)),
            (None, None) => compare_plain(op, left, right),
        }
    })
}

fn quantified(value: &Value) -> Option<&Determined> {
    value
        .as_determined()
        .filter(|d| d.determiner.is_quantifier())
}

fn quantify(
    determined: &Determined,
    mut test: impl FnMut(&Value) -> EvalResult<bool>,
) -> EvalResult<bool> {
    let elements = determined.elements();
    tracing::trace!(
        determiner = %determined.determiner,
        elements = elements.len(),
        "unwinding determiner"
    );
    for element in &elements {
        let holds = test(element)?;
        match determined.determiner {
            Determiner::Any if holds => return Ok(true),
            Determiner::All if !holds => return Ok(false),
            _ => {}
        }
    }
    Ok(determined.determiner == Determiner::All)
}

fn progressive(
    op: BinaryOp,
    determined: &Determined,
    mut test: impl FnMut(&Value) -> EvalResult<bool>,
) -> EvalResult<bool> {
    if op.flags().contains(OpFlags::NO_START_END) {
        return Err(EvalError::operation(format!(
            "I can't use '{}' with the '{op}' operator.",
            determined.determiner.phrase()
        )));
    }
    let mut found = false;
    for part in determined.progressive_parts() {
        if test(&part)? {
            found = true;
            break;
        }
    }
    Ok(found != op.is_negated())
}

//! Assignment requests: the `$x to 1` / `1 into $x` clauses of
//! `(set:)`, `(put:)` and `(move:)`.
//!
//! A request is built once from its destination pattern and its source
//! operand, then executed against storage. Execution destructures the
//! source into bindings and applies them right to left, so that when the
//! source is a reference and the request is a move, deleting later
//! positions first keeps earlier source paths valid.
//!
//! [`AssignmentRequest`] is never a `Value`; it can't be stored in a
//! variable or nested in a collection.

use std::fmt;

use quill_values::{EvalError, EvalResult, Operand, Storage};

use crate::destructure::{destructure, BindingTarget, Target};

/// Direction word of an assignment clause.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOperator {
    /// `dest to src`, used by `(set:)`.
    To,
    /// `src into dest`, used by `(put:)` and `(move:)`.
    Into,
}

impl AssignOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOperator::To => "to",
            AssignOperator::Into => "into",
        }
    }
}

impl fmt::Display for AssignOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A destination, a source and the word joining them.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentRequest {
    pub dest: Target,
    pub src: Operand,
    pub operator: AssignOperator,
}

impl AssignmentRequest {
    /// Build a request. Errors already present on either side are returned
    /// instead of a request.
    pub fn create(
        dest: impl Into<Target>,
        src: impl Into<Operand>,
        operator: AssignOperator,
    ) -> EvalResult<AssignmentRequest> {
        let dest = dest.into();
        let src = src.into();
        dest.find_error()?;
        if let Operand::Value(value) = &src {
            quill_values::contains_error(&[value])?;
        }
        Ok(AssignmentRequest {
            dest,
            src,
            operator,
        })
    }

    /// Perform the assignment.
    ///
    /// Returns a summary line per binding (`$x is now 1`) joined with
    /// `"; "`, in pattern order. With `delete_source`, every binding that
    /// came from a location in the source is removed from it after its
    /// destination is set.
    pub fn execute(&self, store: &mut dyn Storage, delete_source: bool) -> EvalResult<String> {
        let bindings = destructure(&self.dest, &self.src, true, &*store)?.unwrap_or_default();
        if bindings.is_empty() {
            let shown = match &self.dest {
                Target::Value(value) => value.object_name(),
                other => other.to_string(),
            };
            return Err(EvalError::operation(format!(
                "I can't store a new value inside {shown}, because it isn't a variable."
            )));
        }

        let mut lines = Vec::with_capacity(bindings.len());
        for binding in bindings.iter().rev() {
            if let BindingTarget::Typed(tv) = &binding.dest {
                tv.define_type(store)?;
            }
            let var_ref = binding.dest.var_ref();
            var_ref.set(store, binding.value.clone())?;
            if delete_source {
                if let Some(src) = &binding.src {
                    src.delete(store)?;
                }
            }
            tracing::debug!(var = %var_ref, value = %binding.value, "assigned");
            lines.push(format!("{var_ref} is now {}", binding.value));
        }
        lines.reverse();
        Ok(lines.join("; "))
    }
}

impl fmt::Display for AssignmentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let src = match &self.src {
            Operand::Value(value) => value.to_string(),
            Operand::Ref(var_ref) => var_ref.to_string(),
        };
        match self.operator {
            AssignOperator::To => write!(f, "{} to {src}", self.dest),
            AssignOperator::Into => write!(f, "{src} into {}", self.dest),
        }
    }
}

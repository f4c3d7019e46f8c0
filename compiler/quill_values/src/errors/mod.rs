//! Evaluation errors.
//!
//! A failure anywhere in the value/operator core is an [`EvalError`]
//! returned as ordinary data, never a panic. Callers check and propagate
//! with `?` before treating a result as a value. Errors can also sit inside
//! composite values as [`Value::Error`]; [`contains_error`] finds them.
//!
//! Factory functions below build the common operator errors so that the
//! wording stays in one place.

use std::fmt;

use quill_diagnostic::{Diagnostic, ErrorKind};

use crate::value::{PrimitiveKind, Value};

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// A tagged runtime failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EvalError {
    /// Error category.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Optional hint, e.g. how to convert one operand.
    pub explanation: Option<String>,
    /// Optional captured failure context.
    pub detail: Option<String>,
    /// Source text that produced the error, filled in by the caller that knows it.
    pub source: Option<String>,
}

impl EvalError {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            explanation: None,
            detail: None,
            source: None,
        }
    }

    /// Type mismatch or invalid operator use.
    pub fn operation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Operation, message)
    }

    /// Malformed pattern or typed-variable construction.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    /// Missing key or index.
    pub fn property(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Property, message)
    }

    /// Intentionally unsupported feature.
    pub fn unimplemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unimplemented, message)
    }

    /// Wrong type of data given to a macro.
    pub fn datatype(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Datatype, message)
    }

    /// Attach a hint.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Attach captured failure context.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach the failing source text, unless an inner layer already did.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        if self.source.is_none() {
            self.source = Some(source.into());
        }
        self
    }

    /// Convert into an error marker for display.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::new(self.kind, self.message.clone());
        if let Some(source) = &self.source {
            diag = diag.with_source(source.clone());
        }
        if let Some(explanation) = &self.explanation {
            diag = diag.with_hint(explanation.clone());
        }
        if let Some(detail) = &self.detail {
            diag = diag.with_detail(detail.clone());
        }
        diag
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

/// Return the first error carried by any of `values`, searching inside
/// arrays, datamaps and datasets.
pub fn contains_error(values: &[&Value]) -> Result<(), EvalError> {
    values.iter().try_for_each(|value| find_error(value))
}

fn find_error(value: &Value) -> Result<(), EvalError> {
    crate::ensure_sufficient_stack(|| match value {
        Value::Error(err) => Err((**err).clone()),
        Value::Array(items) | Value::Dataset(items) => items.iter().try_for_each(find_error),
        Value::Datamap(map) => map.values().try_for_each(find_error),
        _ => Ok(()),
    })
}

/// Capitalise the first letter of a phrase.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Operator errors

/// Operands of different fundamental kinds.
#[cold]
pub fn type_mismatch(left: &Value, right: &Value) -> EvalError {
    let err = EvalError::operation(format!(
        "{} isn't the same type of data as {}.",
        capitalize(&left.object_name()),
        right.object_name()
    ));
    let numeric_and_string = matches!(
        (left.primitive_kind(), right.primitive_kind()),
        (PrimitiveKind::Number, PrimitiveKind::String) | (PrimitiveKind::String, PrimitiveKind::Number)
    );
    if numeric_and_string {
        err.with_explanation(
            "You might want to convert one side to a number using (num:), or to a string using (str:).",
        )
    } else {
        err
    }
}

/// An operand of the wrong primitive kind for a strictly-typed operator.
#[cold]
pub fn only_primitives(expected: PrimitiveKind, verb: &str, offending: &Value) -> EvalError {
    EvalError::operation(format!(
        "I can only {verb} {}, not {}.",
        expected.plural(),
        offending.object_name()
    ))
}

/// An operand the operator has no meaning for.
#[cold]
pub fn invalid_operand(op: &str, value: &Value) -> EvalError {
    EvalError::operation(format!("I can't use '{op}' on {}.", value.object_name()))
}

/// Division by zero.
#[cold]
pub fn division_by_zero(dividend: &Value) -> EvalError {
    EvalError::operation(format!("I can't divide {} by zero.", dividend.object_name()))
}

/// Modulo by zero.
#[cold]
pub fn modulo_by_zero(dividend: &Value) -> EvalError {
    EvalError::operation(format!(
        "I can't divide {} by zero to get a remainder.",
        dividend.object_name()
    ))
}

/// Arithmetic produced infinity or NaN.
#[cold]
pub fn non_finite_result(op: &str) -> EvalError {
    EvalError::operation(format!(
        "Using '{op}' here produced a number too large (or too strange) to store."
    ))
}

/// A value that cannot be held in a variable or collection.
#[cold]
pub fn cannot_store(value: &Value) -> EvalError {
    EvalError::operation(format!(
        "{} can't be stored in a variable or inside other data.",
        capitalize(&value.object_name())
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;

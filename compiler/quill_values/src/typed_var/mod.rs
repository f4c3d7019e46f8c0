//! Typed variables: a pattern bound to a variable (`num-type $x`).
//!
//! A typed variable is produced by the `-type` operator. It is immutable;
//! spreading or re-typing makes a new one sharing the same reference.
//! During assignment, [`TypedVar::define_type`] installs the pattern as the
//! variable's standing constraint, so every later `set` re-validates.

use std::fmt;

use crate::datatype::DatatypeName;
use crate::errors::{capitalize, contains_error, EvalError, EvalResult};
use crate::reference::{Operand, Storage, VarRef};
use crate::value::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct TypedVar {
    /// Pattern the variable's value must match. Never a spread datatype;
    /// the spread form is carried by `rest`.
    pub datatype: Value,
    pub var_ref: VarRef,
    /// Spread form: matches (and binds) a run of zero or more values.
    pub rest: bool,
}

impl TypedVar {
    /// Bind `datatype` to `target`, which must be a plain variable.
    pub fn create(datatype: Value, target: Operand) -> EvalResult<TypedVar> {
        Self::build(datatype, target, false)
    }

    /// Like [`TypedVar::create`], but for typed variables nested inside a
    /// larger pattern, whose target may be a location inside a variable.
    pub fn create_nested(datatype: Value, target: Operand) -> EvalResult<TypedVar> {
        Self::build(datatype, target, true)
    }

    fn build(datatype: Value, target: Operand, nested: bool) -> EvalResult<TypedVar> {
        contains_error(&[&datatype])?;
        let var_ref = match target {
            Operand::Ref(var_ref) => var_ref,
            Operand::Value(value) => {
                contains_error(&[&value])?;
                return Err(EvalError::syntax(format!(
                    "I can't give {} a datatype, because it isn't a variable.",
                    value.object_name()
                ))
                .with_explanation("Only variables (like $x or _x) can be typed with '-type'."));
            }
        };
        if !nested && !var_ref.is_variable() {
            return Err(EvalError::unimplemented(format!(
                "I can't give {var_ref} a datatype; only whole variables can be typed."
            )));
        }
        if let Some(bad) = disallowed_part(&datatype) {
            return Err(EvalError::syntax(format!(
                "{} can't be used as the datatype of {var_ref}.",
                capitalize(&bad.object_name())
            )));
        }

        let (datatype, rest) = match datatype {
            Value::Datatype(d) if d.rest => (Value::Datatype(d.as_single()), true),
            other => (other, false),
        };
        Ok(TypedVar {
            datatype,
            var_ref,
            rest,
        })
    }

    /// The spread form of this typed variable.
    #[must_use]
    pub fn spread(&self) -> TypedVar {
        TypedVar {
            rest: true,
            ..self.clone()
        }
    }

    /// Same variable, different pattern.
    #[must_use]
    pub fn retyped(&self, datatype: Value) -> TypedVar {
        TypedVar {
            datatype,
            var_ref: self.var_ref.clone(),
            rest: false,
        }
    }

    /// Pattern the whole variable must match: the datatype itself, or for a
    /// spread typed variable, an array of zero or more such values.
    pub fn constraint(&self) -> Value {
        if !self.rest {
            return self.datatype.clone();
        }
        let element = match &self.datatype {
            Value::Datatype(d) => Value::Datatype(d.as_rest()),
            _ => Value::typed_var(self.clone()),
        };
        Value::array(vec![element])
    }

    /// Whether this constrains nothing at all (`any-type _x`).
    pub fn is_unconstrained(&self) -> bool {
        !self.rest && matches!(&self.datatype, Value::Datatype(d) if d.name == DatatypeName::Any)
    }

    /// Install this typed variable's pattern as its variable's standing
    /// constraint.
    pub fn define_type(&self, store: &mut dyn Storage) -> EvalResult<()> {
        if self.is_unconstrained() {
            return Ok(());
        }
        if !self.var_ref.is_variable() {
            tracing::debug!(var = %self.var_ref, "not constraining a location inside a variable");
            return Ok(());
        }
        let constraint = self.constraint();
        tracing::debug!(var = %self.var_ref, %constraint, "defining variable type");
        store.define_constraint(self.var_ref.scope, &self.var_ref.name, constraint)
    }
}

/// Something inside a datatype that a typed variable can never hold.
/// Nested typed variables are fine; they were checked when they were made.
fn disallowed_part(datatype: &Value) -> Option<&Value> {
    crate::ensure_sufficient_stack(|| match datatype {
        Value::TypedVar(_) => None,
        Value::Spreader(_) | Value::Determined(_) | Value::Error(_) => Some(datatype),
        Value::Array(items) | Value::Dataset(items) => items.iter().find_map(disallowed_part),
        Value::Datamap(map) => map.values().find_map(disallowed_part),
        _ => None,
    })
}

impl fmt::Display for TypedVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rest {
            f.write_str("...")?;
        }
        write!(f, "{}-type {}", self.datatype, self.var_ref)
    }
}

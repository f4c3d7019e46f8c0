//! Custom-macro parameter binding.
//!
//! A custom macro's parameters are typed variables. Each argument is checked
//! against its parameter's [`TypeSignature`] and then assigned through the
//! ordinary assignment path, so parameters pick up standing type constraints
//! just like `(set: num-type _x to 1)` would. Spreader arguments are
//! expanded first. A rest parameter takes every following argument its
//! type accepts. Each parameter gets a fresh slot in the innermost scope,
//! so it shadows any caller variable with the same name.

use quill_values::{
    contains_error, ordinal, Arity, CustomMacro, EvalError, EvalResult, Storage, TypeSignature,
    Value,
};

use crate::assignment::{AssignOperator, AssignmentRequest};
use crate::destructure::position;

/// Bind `args` to the parameters of `mac` in `store`.
pub fn bind_parameters(mac: &CustomMacro, args: &[Value], store: &mut dyn Storage) -> EvalResult<()> {
    let args = expand_spreaders(args)?;
    let mut next = 0;

    for (i, param) in mac.params.iter().enumerate() {
        let signature = TypeSignature::of(&Value::typed_var(param.clone()));
        let value = match signature.arity {
            Arity::ZeroOrMore => {
                let start = next;
                while next < args.len() && signature.accepts(&args[next]) {
                    next += 1;
                }
                Value::array(args[start..next].to_vec())
            }
            Arity::One => {
                let Some(arg) = args.get(next) else {
                    return Err(EvalError::datatype(format!(
                        "The custom macro needs a {} {signature} value, but only got {} value{}.",
                        ordinal(position(i)),
                        args.len(),
                        if args.len() == 1 { "" } else { "s" }
                    )));
                };
                if !signature.accepts(arg) {
                    return Err(EvalError::datatype(format!(
                        "The custom macro's {} value should be {}, not {}.",
                        ordinal(position(i)),
                        signature.describe(),
                        arg.object_name()
                    )));
                }
                next += 1;
                arg.clone()
            }
        };
        tracing::trace!(param = %param, %value, "binding parameter");
        store.declare(param.var_ref.scope, &param.var_ref.name);
        AssignmentRequest::create(param.clone(), value, AssignOperator::To)?.execute(store, false)?;
    }

    if next < args.len() {
        let extra = args.len() - next;
        return Err(EvalError::datatype(format!(
            "The custom macro was given {extra} more value{} than it accepts.",
            if extra == 1 { "" } else { "s" }
        ))
        .with_detail(format!("The extra values begin with {}.", args[next].object_name())));
    }
    Ok(())
}

fn expand_spreaders(args: &[Value]) -> EvalResult<Vec<Value>> {
    let refs: Vec<&Value> = args.iter().collect();
    contains_error(&refs)?;
    let mut expanded = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Value::Spreader(inner) => expanded.extend(inner.sequence_items().unwrap_or_default()),
            other => expanded.push(other.clone()),
        }
    }
    Ok(expanded)
}
